//! File exports of the catalog: episode summaries, single recipes, every
//! stored recipe and whole themes.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::Local;
use ironchef_core::{ChefType, ExportFormat, FormatError};
use regex::Regex;
use serde::Serialize;

use crate::db::Store;
use crate::error::{ExportError, StoreError};
use crate::models::{EpisodeDetails, EpisodeSummary, RecipeWithDish};

const EXPORT_SUBDIR: &str = "exports";
const MAX_STEM_LEN: usize = 200;
const KNOWN_EXTENSIONS: &[&str] = &[".json", ".csv", ".txt", ".md"];

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\-_.]").expect("Invalid filename regex"));
static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("Invalid theme slug regex"));

/// What is being exported; each kind accepts its own set of formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Episodes,
    Recipe,
    AllRecipes,
    Theme,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Episodes => "episodes",
            ExportKind::Recipe => "recipe",
            ExportKind::AllRecipes => "all-recipes",
            ExportKind::Theme => "theme",
        }
    }

    pub fn allowed_formats(&self) -> &'static [ExportFormat] {
        match self {
            ExportKind::Episodes => &[ExportFormat::Json, ExportFormat::Csv],
            ExportKind::Recipe => &[ExportFormat::Json, ExportFormat::Txt],
            ExportKind::AllRecipes | ExportKind::Theme => &[ExportFormat::Json],
        }
    }

    pub fn check(&self, format: ExportFormat) -> Result<(), FormatError> {
        if self.allowed_formats().contains(&format) {
            Ok(())
        } else {
            Err(FormatError::NotAllowed {
                format: format.to_string(),
                kind: self.as_str(),
            })
        }
    }
}

/// Reduce a user-supplied name to a safe file name inside the export
/// directory: basename only, no `..`, only `[A-Za-z0-9._-]`, no leading
/// dots, at most 200 characters, ending in the format's extension.
pub fn sanitize_filename(name: &str, fallback_stem: &str, format: ExportFormat) -> String {
    let extension = format.extension();

    let base = name.rsplit(['/', '\\']).next().unwrap_or("");
    let base = base.replace("..", "");
    let base = UNSAFE_FILENAME_CHARS.replace_all(&base, "_");
    let mut stem: String = base.trim_start_matches('.').chars().take(MAX_STEM_LEN).collect();

    if let Some(ext) = KNOWN_EXTENSIONS.iter().find(|ext| stem.ends_with(*ext)) {
        stem.truncate(stem.len() - ext.len());
    }

    if stem.is_empty() {
        format!("{fallback_stem}{extension}")
    } else {
        format!("{stem}{extension}")
    }
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn episodes_csv(episodes: &[EpisodeSummary]) -> String {
    let mut out =
        String::from("episode_number,theme,iron_chef_name,competitor_name,winner,air_date\n");
    for summary in episodes {
        let ep = &summary.episode;
        let fields = [
            ep.episode_number.to_string(),
            csv_field(&ep.theme),
            csv_field(&summary.iron_chef_name),
            csv_field(&summary.competitor_name),
            csv_field(ep.winner.as_deref().unwrap_or("")),
            csv_field(ep.air_date.as_deref().unwrap_or("")),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Plain-text recipe card.
pub fn recipe_text(export: &RecipeWithDish) -> String {
    let recipe = &export.recipe;
    let info = &export.dish_info;
    let rule = "=".repeat(60);
    let section = "-".repeat(40);
    let chef_type = ChefType::from_str(&info.chef_type)
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|| ironchef_core::title_case(&info.chef_type.replace('_', " ")));

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "{rule}\n{}\n{rule}\n", recipe.recipe_title);
    let _ = writeln!(out, "From Episode #{}: {}", info.episode_number, info.theme);
    let _ = writeln!(out, "Original Dish: {}", info.dish_name);
    let _ = writeln!(out, "Chef Type: {chef_type}\n");

    let servings = recipe
        .servings
        .map_or_else(|| "Unknown".to_string(), |s| s.to_string());
    let _ = writeln!(out, "Servings: {servings}");
    let _ = writeln!(out, "Prep Time: {} minutes", recipe.prep_time.unwrap_or(0));
    let _ = writeln!(out, "Cook Time: {} minutes\n", recipe.cook_time.unwrap_or(0));

    let _ = writeln!(out, "INGREDIENTS:\n{section}");
    for ing in &recipe.ingredients {
        let _ = write!(out, "• {} {}", ing.amount, ing.item);
        if !ing.prep.is_empty() {
            let _ = write!(out, " ({})", ing.prep);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "\nINSTRUCTIONS:\n{section}");
    for (i, step) in recipe.instructions.iter().enumerate() {
        let _ = writeln!(out, "{}. {step}\n", i + 1);
    }

    if !recipe.chef_tips.is_empty() {
        let _ = writeln!(out, "CHEF'S TIPS:\n{section}");
        for tip in &recipe.chef_tips {
            let _ = writeln!(out, "• {tip}");
        }
        out.push('\n');
    }

    if let Some(wine) = recipe.wine_pairing.as_deref().filter(|w| !w.is_empty()) {
        let _ = writeln!(out, "WINE PAIRING: {wine}\n");
    }

    let _ = writeln!(out, "Generated: {}", recipe.generated_date.format("%Y-%m-%d %H:%M:%S"));
    out.push_str("Iron Chef Japan Recipe Database\n");
    out
}

#[derive(Serialize)]
struct ThemeExport<'a> {
    theme: &'a str,
    episodes: Vec<EpisodeDetails>,
}

/// Writes exports under `<output_dir>/exports/`.
pub struct Exporter<'s> {
    store: &'s Store,
    export_path: PathBuf,
    timestamp: String,
}

impl<'s> Exporter<'s> {
    /// `output_dir` must already exist; the `exports` subdirectory is
    /// created on demand.
    pub fn new(store: &'s Store, output_dir: &Path) -> Result<Self, ExportError> {
        if !output_dir.is_dir() {
            return Err(ExportError::MissingOutputDir(output_dir.to_path_buf()));
        }
        let export_path = output_dir.join(EXPORT_SUBDIR);
        fs::create_dir_all(&export_path).map_err(|source| ExportError::Io {
            path: export_path.clone(),
            source,
        })?;
        Ok(Exporter {
            store,
            export_path,
            timestamp: Local::now().format("%Y%m%d_%H%M%S").to_string(),
        })
    }

    fn target(&self, filename: Option<&str>, default_stem: String, format: ExportFormat) -> PathBuf {
        let fallback = format!("export_{}", self.timestamp);
        let name = sanitize_filename(filename.unwrap_or(&default_stem), &fallback, format);
        self.export_path.join(name)
    }

    fn write(&self, path: PathBuf, contents: &str) -> Result<PathBuf, ExportError> {
        fs::write(&path, contents).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Wrote export");
        Ok(path)
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: PathBuf, value: &T) -> Result<PathBuf, ExportError> {
        let json = serde_json::to_string_pretty(value)?;
        self.write(path, &json)
    }

    /// Every episode with both chefs' names.
    pub fn export_episode_summary(
        &self,
        format: ExportFormat,
        filename: Option<&str>,
    ) -> Result<PathBuf, ExportError> {
        ExportKind::Episodes.check(format)?;
        let path = self.target(filename, format!("iron_chef_episodes_{}", self.timestamp), format);
        let episodes = self.store.search_episodes_by_theme("")?;
        match format {
            ExportFormat::Csv => self.write(path, &episodes_csv(&episodes)),
            _ => self.write_json(path, &episodes),
        }
    }

    /// The latest stored recipe for a dish.
    pub fn export_recipe(
        &self,
        dish_id: i32,
        format: ExportFormat,
        filename: Option<&str>,
    ) -> Result<PathBuf, ExportError> {
        ExportKind::Recipe.check(format)?;
        let path = self.target(filename, format!("recipe_{dish_id}_{}", self.timestamp), format);
        let recipe = self
            .store
            .get_recipe_for_dish(dish_id)?
            .ok_or(StoreError::NotFound {
                entity: "Recipe for dish",
                id: dish_id,
            })?;
        match format {
            ExportFormat::Txt => self.write(path, &recipe_text(&recipe)),
            _ => self.write_json(path, &recipe),
        }
    }

    pub fn export_all_recipes(
        &self,
        format: ExportFormat,
        filename: Option<&str>,
    ) -> Result<PathBuf, ExportError> {
        ExportKind::AllRecipes.check(format)?;
        let path = self.target(filename, format!("all_recipes_{}", self.timestamp), format);
        let recipes = self.store.list_recipes_with_context()?;
        self.write_json(path, &recipes)
    }

    /// Full details of every episode matching `theme`.
    pub fn export_dishes_by_theme(
        &self,
        theme: &str,
        format: ExportFormat,
        filename: Option<&str>,
    ) -> Result<PathBuf, ExportError> {
        let theme = theme.trim();
        if theme.is_empty() {
            return Err(ExportError::EmptyTheme);
        }
        ExportKind::Theme.check(format)?;

        let safe_theme = NON_ALNUM.replace_all(&theme.to_lowercase(), "_").into_owned();
        let path = self.target(
            filename,
            format!("dishes_{safe_theme}_{}", self.timestamp),
            format,
        );

        let matches = self.store.search_episodes_by_theme(theme)?;
        if matches.is_empty() {
            return Err(ExportError::NoEpisodesForTheme(theme.to_string()));
        }
        let mut episodes = Vec::with_capacity(matches.len());
        for summary in matches {
            if let Some(details) = self.store.get_episode_details(summary.episode.id)? {
                episodes.push(details);
            }
        }
        self.write_json(path, &ThemeExport { theme, episodes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_store;
    use crate::seed::load_sample_data;
    use ironchef_core::RecipeGenerator;

    #[test]
    fn test_sanitize_strips_traversal() {
        let name = sanitize_filename("../../etc/passwd", "export_x", ExportFormat::Json);
        assert_eq!(name, "passwd.json");
        let name = sanitize_filename("..\\..\\secret.txt", "export_x", ExportFormat::Txt);
        assert_eq!(name, "secret.txt");
        let name = sanitize_filename("a..b", "export_x", ExportFormat::Csv);
        assert_eq!(name, "ab.csv");
    }

    #[test]
    fn test_sanitize_characters_and_dots() {
        assert_eq!(
            sanitize_filename("my recipe!.json", "export_x", ExportFormat::Txt),
            "my_recipe_.txt"
        );
        assert_eq!(sanitize_filename(".hidden", "export_x", ExportFormat::Json), "hidden.json");
        assert_eq!(sanitize_filename("...", "export_x", ExportFormat::Json), "export_x.json");
        assert_eq!(sanitize_filename("", "export_x", ExportFormat::Csv), "export_x.csv");
    }

    #[test]
    fn test_sanitize_truncates_long_names() {
        let long = "a".repeat(500);
        let name = sanitize_filename(&long, "export_x", ExportFormat::Json);
        assert_eq!(name.len(), 200 + ".json".len());
    }

    #[test]
    fn test_format_allowance() {
        assert!(ExportKind::Episodes.check(ExportFormat::Csv).is_ok());
        assert!(ExportKind::Recipe.check(ExportFormat::Txt).is_ok());
        assert!(ExportKind::Recipe.check(ExportFormat::Csv).is_err());
        assert!(ExportKind::AllRecipes.check(ExportFormat::Txt).is_err());
        assert!(ExportKind::Theme.check(ExportFormat::Json).is_ok());
    }

    #[test]
    fn test_csv_quotes_commas() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_missing_output_dir_rejected() {
        let (dir, store) = temp_store();
        let result = Exporter::new(&store, &dir.path().join("missing"));
        assert!(matches!(result, Err(ExportError::MissingOutputDir(_))));
    }

    #[test]
    fn test_episode_exports() {
        let (dir, store) = temp_store();
        load_sample_data(&store).unwrap();
        let exporter = Exporter::new(&store, dir.path()).unwrap();

        let csv_path = exporter
            .export_episode_summary(ExportFormat::Csv, Some("episodes"))
            .unwrap();
        assert_eq!(csv_path, dir.path().join("exports").join("episodes.csv"));
        let csv = fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "episode_number,theme,iron_chef_name,competitor_name,winner,air_date"
        );
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("1,Sea Bream,Rokusaburo Michiba,Yukio Hattori,Iron Chef,"));

        let json_path = exporter.export_episode_summary(ExportFormat::Json, None).unwrap();
        let name = json_path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("iron_chef_episodes_") && name.ends_with(".json"));
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 5);
        assert_eq!(value[3]["theme"], "Lobster");
    }

    #[test]
    fn test_recipe_exports() {
        let (dir, store) = temp_store();
        load_sample_data(&store).unwrap();
        let found = store.get_dishes_by_ingredient("wasabi").unwrap();
        let dish = &found[0].dish;
        let recipe = RecipeGenerator::seeded(12).generate(
            &dish.dish_name,
            dish.main_ingredients(),
            "Japanese",
        );
        store.save_recipe(dish.id, &recipe).unwrap();
        let exporter = Exporter::new(&store, dir.path()).unwrap();

        let txt = exporter
            .export_recipe(dish.id, ExportFormat::Txt, Some("card.json"))
            .unwrap();
        assert!(txt.ends_with("card.txt"));
        let text = fs::read_to_string(txt).unwrap();
        assert!(text.starts_with(&format!("{}\n{}\n", "=".repeat(60), recipe.title)));
        assert!(text.contains("From Episode #1: Sea Bream"));
        assert!(text.contains("Chef Type: Iron Chef"));
        assert!(text.contains("INGREDIENTS:\n----------------------------------------\n• "));
        assert!(text.contains("\n1. "));
        assert!(text.contains("CHEF'S TIPS:"));
        assert!(text.contains(&format!("WINE PAIRING: {}", recipe.wine_pairing)));
        assert!(text.ends_with("Iron Chef Japan Recipe Database\n"));

        assert!(matches!(
            exporter.export_recipe(dish.id, ExportFormat::Csv, None),
            Err(ExportError::Format(FormatError::NotAllowed { .. }))
        ));
        assert!(matches!(
            exporter.export_recipe(9999, ExportFormat::Json, None),
            Err(ExportError::Store(StoreError::NotFound { .. }))
        ));

        let all = exporter.export_all_recipes(ExportFormat::Json, None).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(all).unwrap()).unwrap();
        assert_eq!(value[0]["theme"], "Sea Bream");
        assert_eq!(value[0]["recipe_title"], recipe.title);
    }

    #[test]
    fn test_theme_export() {
        let (dir, store) = temp_store();
        load_sample_data(&store).unwrap();
        let exporter = Exporter::new(&store, dir.path()).unwrap();

        let path = exporter
            .export_dishes_by_theme("Foie Gras", ExportFormat::Json, None)
            .unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("dishes_foie_gras_"));
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["theme"], "Foie Gras");
        assert_eq!(value["episodes"][0]["dishes"]["iron_chef"].as_array().unwrap().len(), 4);

        assert!(matches!(
            exporter.export_dishes_by_theme("  ", ExportFormat::Json, None),
            Err(ExportError::EmptyTheme)
        ));
        assert!(matches!(
            exporter.export_dishes_by_theme("Truffle", ExportFormat::Json, None),
            Err(ExportError::NoEpisodesForTheme(_))
        ));
    }
}

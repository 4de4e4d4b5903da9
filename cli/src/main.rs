mod config;
mod db;
mod display;
mod error;
mod export;
mod interactive;
mod migrate;
mod models;
mod raw_sql;
mod schema;
mod seed;

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ironchef_core::{ExportFormat, RecipeGenerator, DEFAULT_CUISINE};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::db::Store;
use crate::export::Exporter;

#[derive(Parser)]
#[command(name = "ironchef")]
#[command(about = "Iron Chef Japan episode database and recipe generator", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load sample data and walk through queries and recipe generation
    Demo {
        /// Seed for reproducible recipes
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Load the sample Iron Chefs, battles and dishes
    Seed,
    /// Add performance indices to an existing database and refresh statistics
    Migrate,
    /// List every battle theme
    Themes,
    /// List episodes, optionally filtered by theme
    Episodes {
        /// Substring of the theme to match
        #[arg(long)]
        theme: Option<String>,
    },
    /// Show one episode with both chefs' dishes
    Episode {
        /// Episode ID
        id: i32,
    },
    /// Show the latest stored recipe for a dish
    Recipe {
        /// Dish ID
        dish_id: i32,
    },
    /// Find dishes whose main ingredients mention an ingredient
    Dishes {
        /// Ingredient to search for
        #[arg(long)]
        ingredient: String,
    },
    /// Generate a recipe from a dish name or a stored dish
    Generate {
        /// Dish name (free text)
        #[arg(conflicts_with = "dish_id", required_unless_present = "dish_id")]
        dish: Option<String>,
        /// Comma-separated main ingredients for a free-text dish
        #[arg(long, default_value = "")]
        ingredients: String,
        /// Generate for a dish stored in the database
        #[arg(long)]
        dish_id: Option<i32>,
        /// Cuisine style (Japanese, Chinese, French, Italian)
        #[arg(long)]
        cuisine: Option<String>,
        /// Seed for a reproducible recipe
        #[arg(long)]
        seed: Option<u64>,
        /// Store the recipe against --dish-id
        #[arg(long, requires = "dish_id")]
        save: bool,
        /// Print the recipe as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write catalog data to files under <export-dir>/exports
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },
    /// Menu-driven session
    Interactive {
        /// Seed for reproducible recipes
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum ExportTarget {
    /// Summary of all episodes (json or csv)
    Episodes {
        #[arg(long, default_value = "json")]
        format: String,
        #[arg(long)]
        filename: Option<String>,
    },
    /// The latest stored recipe for a dish (json or txt)
    Recipe {
        /// Dish ID
        dish_id: i32,
        #[arg(long, default_value = "json")]
        format: String,
        #[arg(long)]
        filename: Option<String>,
    },
    /// Every stored recipe with its dish and episode (json)
    AllRecipes {
        #[arg(long, default_value = "json")]
        format: String,
        #[arg(long)]
        filename: Option<String>,
    },
    /// Full details of the episodes matching a theme (json)
    Theme {
        theme: String,
        #[arg(long, default_value = "json")]
        format: String,
        #[arg(long)]
        filename: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn generator(seed: Option<u64>) -> RecipeGenerator {
    match seed {
        Some(seed) => RecipeGenerator::seeded(seed),
        None => RecipeGenerator::from_os_rng(),
    }
}

fn open_store(config: &Config) -> Result<Store> {
    Store::open(&config.database_path, config.pool_size).with_context(|| {
        format!(
            "Failed to open database: {}",
            config.database_path.display()
        )
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.config.verbose);
    let config = cli.config;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Migrate => {
            let report = migrate::migrate_database(&config.database_path)?;
            print_migration_report(&mut out, &report)?;
            if !report.is_success() {
                bail!("{} of {} indices failed", report.failed.len(), report.total);
            }
        }
        Commands::Demo { seed } => {
            let store = open_store(&config)?;
            run_demo(&mut out, &store, generator(seed))?;
        }
        Commands::Seed => {
            let store = open_store(&config)?;
            let summary = seed::load_sample_data(&store)?;
            if summary.episodes == 0 {
                writeln!(out, "Database already contains episodes; nothing loaded")?;
            } else {
                writeln!(
                    out,
                    "Loaded {} episodes with {} dishes into the database",
                    summary.episodes, summary.dishes
                )?;
            }
        }
        Commands::Themes => {
            let store = open_store(&config)?;
            for theme in store.get_all_themes()? {
                writeln!(out, "- {theme}")?;
            }
        }
        Commands::Episodes { theme } => {
            let store = open_store(&config)?;
            let episodes = store.search_episodes_by_theme(theme.as_deref().unwrap_or(""))?;
            if episodes.is_empty() {
                writeln!(out, "No episodes found.")?;
            }
            for ep in &episodes {
                display::write_episode_line(&mut out, ep)?;
            }
        }
        Commands::Episode { id } => {
            let store = open_store(&config)?;
            let Some(details) = store.get_episode_details(id)? else {
                bail!("Episode with ID {id} not found");
            };
            display::write_episode(&mut out, &details)?;
        }
        Commands::Recipe { dish_id } => {
            let store = open_store(&config)?;
            let Some(stored) = store.get_recipe_for_dish(dish_id)? else {
                bail!("No recipe found for dish ID {dish_id}");
            };
            let info = &stored.dish_info;
            writeln!(
                out,
                "From Episode #{}: {} ({})",
                info.episode_number, info.theme, info.dish_name
            )?;
            display::write_recipe(&mut out, &stored.recipe.to_recipe())?;
        }
        Commands::Dishes { ingredient } => {
            let store = open_store(&config)?;
            let dishes = store.get_dishes_by_ingredient(&ingredient)?;
            if dishes.is_empty() {
                writeln!(out, "No dishes found containing '{ingredient}'.")?;
            }
            for found in &dishes {
                display::write_dish_match(&mut out, found)?;
            }
        }
        Commands::Generate {
            dish,
            ingredients,
            dish_id,
            cuisine,
            seed,
            save,
            json,
        } => {
            let mut generator = generator(seed);
            let recipe = match dish_id {
                Some(dish_id) => {
                    let store = open_store(&config)?;
                    let Some(dish) = store.get_dish(dish_id)? else {
                        bail!("Dish with ID {dish_id} not found");
                    };
                    let cuisine = cuisine.as_deref().unwrap_or(dish.inferred_cuisine());
                    let recipe =
                        generator.generate(&dish.dish_name, dish.main_ingredients(), cuisine);
                    if save {
                        let recipe_id = store.save_recipe(dish_id, &recipe)?;
                        eprintln!("Recipe saved with ID: {recipe_id}");
                    }
                    recipe
                }
                None => {
                    let dish = dish.unwrap_or_default();
                    let cuisine = cuisine.as_deref().unwrap_or(DEFAULT_CUISINE);
                    generator.generate(&dish, &ingredients, cuisine)
                }
            };

            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&recipe)?)?;
            } else {
                display::write_recipe(&mut out, &recipe)?;
            }
        }
        Commands::Export { target } => {
            let store = open_store(&config)?;
            let exporter = Exporter::new(&store, &config.export_dir)?;
            let path = match target {
                ExportTarget::Episodes { format, filename } => {
                    exporter.export_episode_summary(format.parse()?, filename.as_deref())?
                }
                ExportTarget::Recipe {
                    dish_id,
                    format,
                    filename,
                } => exporter.export_recipe(dish_id, format.parse()?, filename.as_deref())?,
                ExportTarget::AllRecipes { format, filename } => {
                    exporter.export_all_recipes(format.parse()?, filename.as_deref())?
                }
                ExportTarget::Theme {
                    theme,
                    format,
                    filename,
                } => exporter.export_dishes_by_theme(
                    &theme,
                    format.parse::<ExportFormat>()?,
                    filename.as_deref(),
                )?,
            };
            writeln!(out, "Exported to {}", path.display())?;
        }
        Commands::Interactive { seed } => {
            let store = open_store(&config)?;
            let stdin = io::stdin();
            interactive::Session::new(&store, generator(seed), stdin.lock(), &mut out).run()?;
        }
    }

    Ok(())
}

fn print_migration_report<W: Write>(out: &mut W, report: &migrate::MigrationReport) -> Result<()> {
    writeln!(out, "Database statistics before migration:")?;
    for (table, count) in &report.before.row_counts {
        writeln!(out, "  {table}: {count} rows")?;
    }
    writeln!(
        out,
        "  indices: {}, file size: {} bytes",
        report.before.index_count, report.before.file_size_bytes
    )?;
    writeln!(
        out,
        "\nCreated {}/{} indices ({} already present)",
        report.created,
        report.total,
        report.skipped.len()
    )?;
    for failed in &report.failed {
        writeln!(out, "  failed: {failed}")?;
    }
    writeln!(
        out,
        "\nAfter migration: {} indices, {} bytes",
        report.after.index_count, report.after.file_size_bytes
    )?;
    Ok(())
}

/// Seed the catalog and walk through the main features.
fn run_demo<W: Write>(out: &mut W, store: &Store, mut generator: RecipeGenerator) -> Result<()> {
    writeln!(out, "Iron Chef Japan Database and Recipe Generator")?;
    writeln!(out, "{}", "=".repeat(50))?;

    writeln!(out, "\n1. Loading sample data...")?;
    seed::load_sample_data(store)?;

    writeln!(out, "\n2. Available themes in database:")?;
    for theme in store.get_all_themes()? {
        writeln!(out, "   - {theme}")?;
    }

    writeln!(out, "\n3. Searching for Lobster episodes...")?;
    let lobster = store.search_episodes_by_theme("Lobster")?;
    for ep in &lobster {
        writeln!(
            out,
            "   Episode #{}: {} vs {}",
            ep.episode.episode_number, ep.iron_chef_name, ep.competitor_name
        )?;
    }
    let Some(first) = lobster.first() else {
        bail!("Sample data has no Lobster episode");
    };

    writeln!(
        out,
        "\n4. Getting detailed information for Episode #{} ({})...",
        first.episode.episode_number, first.episode.theme
    )?;
    let details = store
        .get_episode_details(first.episode.id)?
        .context("Lobster episode disappeared")?;
    display::write_episode(out, &details)?;

    writeln!(out, "\n5. Generating recipes for selected dishes...")?;
    if let Some(dish) = details.dishes.iron_chef.first() {
        let recipe = generator.generate(&dish.dish_name, dish.main_ingredients(), "Japanese");
        display::write_recipe(out, &recipe)?;
        let recipe_id = store.save_recipe(dish.id, &recipe)?;
        writeln!(out, "\n   Recipe saved to database with ID: {recipe_id}")?;
    }
    if let Some(dish) = details.dishes.competitor.first() {
        let recipe = generator.generate(&dish.dish_name, dish.main_ingredients(), "Italian");
        display::write_recipe(out, &recipe)?;
    }

    writeln!(out, "\n6. Searching for dishes containing 'foie gras'...")?;
    for found in store.get_dishes_by_ingredient("foie gras")?.iter().take(3) {
        writeln!(
            out,
            "   - {} (Episode #{}: {})",
            found.dish.dish_name, found.episode_number, found.theme
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_store;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_requires_dish() {
        assert!(Cli::try_parse_from(["ironchef", "generate"]).is_err());
        assert!(Cli::try_parse_from(["ironchef", "generate", "Lobster Sashimi", "--save"]).is_err());
        assert!(Cli::try_parse_from(["ironchef", "generate", "--dish-id", "3", "--save"]).is_ok());
    }

    #[test]
    fn test_demo_runs_against_fresh_database() {
        let (_dir, store) = temp_store();
        let mut out = Vec::new();
        run_demo(&mut out, &store, RecipeGenerator::seeded(5)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("   - Bamboo Shoots"));
        assert!(text.contains("Episode #150: Masaharu Morimoto vs Masahiko Kobe"));
        assert!(text.contains("Iron Chef Style Lobster Sashimi"));
        assert!(text.contains("Iron Chef Style Lobster Risotto"));
        assert!(text.contains("Recipe saved to database with ID: 1"));
        assert_eq!(store.list_recipes_with_context().unwrap().len(), 1);
    }
}

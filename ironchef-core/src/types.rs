use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// Canonical cooking technique derived from the dish name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CookingMethod {
    PrepareRaw,
    Simmer,
    HotPot,
    Grill,
    Sear,
    StirFry,
    DeepFry,
    Steam,
    Braise,
    Poach,
    Risotto,
    Pasta,
    Bake,
    Terrine,
    Freeze,
    // Only reachable through a cuisine's fallback pool
    Saute,
    Blanch,
    Marinate,
    Roast,
    Smoke,
    Flambe,
    Reduce,
}

impl CookingMethod {
    pub const ALL: &'static [CookingMethod] = &[
        CookingMethod::PrepareRaw,
        CookingMethod::Simmer,
        CookingMethod::HotPot,
        CookingMethod::Grill,
        CookingMethod::Sear,
        CookingMethod::StirFry,
        CookingMethod::DeepFry,
        CookingMethod::Steam,
        CookingMethod::Braise,
        CookingMethod::Poach,
        CookingMethod::Risotto,
        CookingMethod::Pasta,
        CookingMethod::Bake,
        CookingMethod::Terrine,
        CookingMethod::Freeze,
        CookingMethod::Saute,
        CookingMethod::Blanch,
        CookingMethod::Marinate,
        CookingMethod::Roast,
        CookingMethod::Smoke,
        CookingMethod::Flambe,
        CookingMethod::Reduce,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CookingMethod::PrepareRaw => "prepare raw",
            CookingMethod::Simmer => "simmer",
            CookingMethod::HotPot => "hot pot",
            CookingMethod::Grill => "grill",
            CookingMethod::Sear => "sear",
            CookingMethod::StirFry => "stir-fry",
            CookingMethod::DeepFry => "deep-fry",
            CookingMethod::Steam => "steam",
            CookingMethod::Braise => "braise",
            CookingMethod::Poach => "poach",
            CookingMethod::Risotto => "risotto",
            CookingMethod::Pasta => "pasta",
            CookingMethod::Bake => "bake",
            CookingMethod::Terrine => "terrine",
            CookingMethod::Freeze => "freeze",
            CookingMethod::Saute => "sauté",
            CookingMethod::Blanch => "blanch",
            CookingMethod::Marinate => "marinate",
            CookingMethod::Roast => "roast",
            CookingMethod::Smoke => "smoke",
            CookingMethod::Flambe => "flambe",
            CookingMethod::Reduce => "reduce",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        CookingMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
    }
}

impl fmt::Display for CookingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prep and cook time in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub prep_minutes: u32,
    pub cook_minutes: u32,
}

impl Timing {
    pub const fn new(prep_minutes: u32, cook_minutes: u32) -> Self {
        Timing {
            prep_minutes,
            cook_minutes,
        }
    }
}

/// One line of a generated ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: String,
    pub amount: String,
    /// Prep note; empty when nothing needs doing.
    #[serde(default)]
    pub prep: String,
}

impl Ingredient {
    pub fn new(item: impl Into<String>, amount: impl Into<String>, prep: impl Into<String>) -> Self {
        Ingredient {
            item: item.into(),
            amount: amount.into(),
            prep: prep.into(),
        }
    }
}

/// A generated recipe. Serializes to the same JSON shape the exporters and
/// the store expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub description: String,
    pub servings: u32,
    pub prep_time: u32,
    pub cook_time: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub chef_tips: Vec<String>,
    pub wine_pairing: String,
}

/// Which side of Kitchen Stadium cooked a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChefType {
    IronChef,
    Competitor,
}

impl ChefType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChefType::IronChef => "iron_chef",
            ChefType::Competitor => "competitor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "iron_chef" => Some(ChefType::IronChef),
            "competitor" => Some(ChefType::Competitor),
            _ => None,
        }
    }

    /// "Iron Chef" / "Competitor", as printed in text exports.
    pub fn display_name(&self) -> &'static str {
        match self {
            ChefType::IronChef => "Iron Chef",
            ChefType::Competitor => "Competitor",
        }
    }
}

/// Output formats understood by the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Txt,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => ".json",
            ExportFormat::Csv => ".csv",
            ExportFormat::Txt => ".txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "txt" | "text" => Ok(ExportFormat::Txt),
            other => Err(FormatError::Unsupported(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooking_method_names_round_trip() {
        for method in CookingMethod::ALL {
            assert_eq!(CookingMethod::from_str(method.as_str()), Some(*method));
        }
        assert_eq!(CookingMethod::from_str("boil"), None);
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!(" csv ".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Txt);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(FormatError::Unsupported(f)) if f == "xml"
        ));
    }

    #[test]
    fn test_recipe_json_field_names() {
        let recipe = Recipe {
            title: "Iron Chef Style Test".to_string(),
            description: "d".to_string(),
            servings: 4,
            prep_time: 10,
            cook_time: 8,
            ingredients: vec![Ingredient::new("Salt", "To taste", "")],
            instructions: vec!["Cook.".to_string()],
            chef_tips: vec![],
            wine_pairing: "Sake".to_string(),
        };
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["prep_time"], 10);
        assert_eq!(value["ingredients"][0]["amount"], "To taste");
        assert_eq!(value["ingredients"][0]["prep"], "");
        assert_eq!(value["wine_pairing"], "Sake");
    }
}

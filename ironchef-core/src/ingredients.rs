//! Ingredient parsing and the amount / prep-note tables.

use crate::rules::{first_match, mentions, mentions_any, Rule};
use crate::types::Ingredient;

/// Stand-in used in generated text when no ingredients were supplied.
pub const PLACEHOLDER_INGREDIENT: &str = "ingredient";

const RAW_DISH_KEYWORDS: &[&str] = &["sashimi", "carpaccio"];
const NO_OIL_KEYWORDS: &[&str] = &["sashimi", "carpaccio", "ice cream", "soup"];

/// Comma-separated ingredient string split into primary and secondaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIngredients {
    /// First listed ingredient, or `None` when the input had none.
    pub primary: Option<String>,
    pub secondary: Vec<String>,
}

impl ParsedIngredients {
    pub fn parse(main_ingredients: &str) -> Self {
        let mut parts = main_ingredients
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string);

        let primary = parts.next();
        ParsedIngredients {
            primary,
            secondary: parts.collect(),
        }
    }

    /// Primary ingredient name for use in prose.
    pub fn primary_name(&self) -> &str {
        self.primary.as_deref().unwrap_or(PLACEHOLDER_INGREDIENT)
    }
}

/// How a raw dish is cut, which changes amounts and prep for seafood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawStyle {
    Sashimi,
    Carpaccio,
    Cooked,
}

impl RawStyle {
    pub fn of_dish(dish_name: &str) -> Self {
        if mentions(dish_name, "sashimi") {
            RawStyle::Sashimi
        } else if mentions(dish_name, "carpaccio") {
            RawStyle::Carpaccio
        } else {
            RawStyle::Cooked
        }
    }
}

/// A table value that may differ between sashimi, carpaccio and cooked dishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByStyle {
    pub sashimi: &'static str,
    pub carpaccio: &'static str,
    pub cooked: &'static str,
}

impl ByStyle {
    pub const fn uniform(value: &'static str) -> Self {
        ByStyle {
            sashimi: value,
            carpaccio: value,
            cooked: value,
        }
    }

    pub fn get(&self, style: RawStyle) -> &'static str {
        match style {
            RawStyle::Sashimi => self.sashimi,
            RawStyle::Carpaccio => self.carpaccio,
            RawStyle::Cooked => self.cooked,
        }
    }
}

pub const DEFAULT_PRIMARY_AMOUNT: &str = "1 lb";

pub const PRIMARY_AMOUNT_RULES: &[Rule<ByStyle>] = &[
    // Seafood
    Rule::any(
        &["lobster", "crab"],
        ByStyle {
            sashimi: "8 oz",
            carpaccio: "8 oz",
            cooked: "1 lb",
        },
    ),
    Rule::any(
        &["sea bream", "fish", "salmon", "tuna"],
        ByStyle {
            sashimi: "6 oz, sashimi grade",
            carpaccio: "1 lb, fresh",
            cooked: "1 lb, fresh",
        },
    ),
    // Specialty proteins
    Rule::any(&["foie gras"], ByStyle::uniform("6 oz")),
    Rule::any(&["shark fin"], ByStyle::uniform("4 oz, prepared")),
    // Vegetables
    Rule::any(&["bamboo shoots"], ByStyle::uniform("1 lb, fresh")),
    Rule::any(&["meat", "beef", "pork"], ByStyle::uniform("1 lb")),
];

pub const DEFAULT_PREP: &str = "prepared";

pub const PREP_RULES: &[Rule<ByStyle>] = &[
    Rule::any(
        &["lobster", "crab"],
        ByStyle {
            sashimi: "cleaned, shell removed",
            carpaccio: "cleaned and prepared",
            cooked: "cleaned and prepared",
        },
    ),
    Rule::any(
        &["sea bream", "fish"],
        ByStyle {
            sashimi: "filleted, skin removed",
            carpaccio: "cleaned and scaled",
            cooked: "cleaned and scaled",
        },
    ),
    Rule::any(&["foie gras"], ByStyle::uniform("cleaned, veins removed")),
    Rule::any(&["bamboo shoots"], ByStyle::uniform("peeled and sliced")),
    Rule::any(&["vegetable", "mushroom"], ByStyle::uniform("cleaned and sliced")),
];

pub const DEFAULT_AMOUNT: &str = "1/2 cup";

/// Amounts for secondary ingredients, most specific categories first.
pub const AMOUNT_RULES: &[Rule<&str>] = &[
    // Sauces and liquids
    Rule::any(&["soy sauce", "ponzu", "miso"], "2-3 tbsp"),
    Rule::any(&["sauce", "oil", "vinegar", "wine", "sake", "cognac"], "2 tbsp"),
    Rule::any(&["dashi", "stock", "broth"], "2 cups"),
    Rule::any(&["cream"], "1/2 cup"),
    // Aromatics
    Rule::any(&["garlic", "ginger", "shallot"], "1 tbsp, minced"),
    Rule::exactly("wasabi", "1 tsp"),
    Rule::exactly("truffle", "1 small, shaved"),
    // Herbs and garnishes
    Rule::any(
        &["herb", "cilantro", "parsley", "basil", "chives", "scallions", "shiso"],
        "2 tbsp, chopped",
    ),
    Rule::any(&["arugula"], "2 cups"),
    // Vegetables
    Rule::any(
        &["vegetable", "mushroom", "onion", "turnip", "bamboo"],
        "1 cup, sliced",
    ),
    Rule::any(&["tofu"], "4 oz, cubed"),
    // Proteins
    Rule::any(&["crab", "shrimp", "scallop"], "4 oz"),
    Rule::any(&["egg"], "2 large"),
    // Grains and starches
    Rule::any(&["rice"], "1 cup"),
    Rule::any(&["pasta", "dough"], "12 oz"),
    // Cheese
    Rule::any(&["parmesan", "gruyere", "ricotta"], "1/2 cup, grated"),
    // Specialty items
    Rule::any(&["uni", "sea urchin"], "2 oz"),
    Rule::any(&["foie gras"], "4 oz"),
    Rule::any(&["caviar"], "1 oz"),
    Rule::any(&["saffron"], "Pinch"),
];

pub fn primary_amount(primary: &str, dish_name: &str) -> &'static str {
    first_match(PRIMARY_AMOUNT_RULES, primary)
        .map(|amount| amount.get(RawStyle::of_dish(dish_name)))
        .unwrap_or(DEFAULT_PRIMARY_AMOUNT)
}

pub fn prep_method(ingredient: &str, dish_name: &str) -> &'static str {
    first_match(PREP_RULES, ingredient)
        .map(|prep| prep.get(RawStyle::of_dish(dish_name)))
        .unwrap_or(DEFAULT_PREP)
}

pub fn estimate_amount(ingredient: &str) -> &'static str {
    first_match(AMOUNT_RULES, ingredient.trim()).unwrap_or(DEFAULT_AMOUNT)
}

/// Raw preparations skip salt and pepper.
pub fn is_raw_dish(dish_name: &str) -> bool {
    mentions_any(dish_name, RAW_DISH_KEYWORDS)
}

pub fn needs_cooking_oil(dish_name: &str) -> bool {
    !mentions_any(dish_name, NO_OIL_KEYWORDS)
}

/// Assemble the full ingredient list: primary, secondaries, then seasoning
/// and oil where the dish calls for them.
pub fn build_ingredient_list(parsed: &ParsedIngredients, dish_name: &str) -> Vec<Ingredient> {
    let mut ingredients = Vec::with_capacity(parsed.secondary.len() + 4);

    if let Some(primary) = &parsed.primary {
        ingredients.push(Ingredient::new(
            title_case(primary),
            primary_amount(primary, dish_name),
            prep_method(primary, dish_name),
        ));
    }

    for ingredient in &parsed.secondary {
        if parsed.primary.as_ref() == Some(ingredient) {
            continue;
        }
        ingredients.push(Ingredient::new(
            title_case(ingredient),
            estimate_amount(ingredient),
            prep_method(ingredient, dish_name),
        ));
    }

    if !is_raw_dish(dish_name) {
        ingredients.push(Ingredient::new("Salt", "To taste", ""));
        ingredients.push(Ingredient::new("White Pepper", "1/4 tsp", "freshly ground"));
    }

    if needs_cooking_oil(dish_name) {
        ingredients.push(Ingredient::new("High-quality Oil", "2 tbsp", "for cooking"));
    }

    ingredients
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest
/// ("XO sauce" -> "Xo Sauce", "sea bream" -> "Sea Bream").
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }
    result
}

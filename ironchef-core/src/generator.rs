//! Recipe generation.
//!
//! [`RecipeGenerator`] turns a dish name, a comma-separated ingredient string
//! and a cuisine name into a [`Recipe`]. Everything except the fallback cooking
//! method, the description wording, tip sampling and the wine is a fixed
//! function of the inputs; those four draw from the generator's RNG, so a
//! seeded generator reproduces its output exactly.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::chef_tips::generate_chef_tips;
use crate::cooking_method::{estimate_times, select_cooking_method};
use crate::cuisine::CuisineProfile;
use crate::ingredients::{build_ingredient_list, ParsedIngredients};
use crate::instructions::generate_instructions;
use crate::types::Recipe;

pub const DEFAULT_CUISINE: &str = "Japanese";
pub const SERVINGS: u32 = 4;

/// Values substituted into a description template.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionParts<'a> {
    pub flavor: &'a str,
    pub dish_name: &'a str,
    pub primary: &'a str,
    pub cuisine: &'a str,
}

pub type DescriptionTemplate = fn(&DescriptionParts<'_>) -> String;

pub const DESCRIPTION_TEMPLATES: &[DescriptionTemplate] = &[
    interpretation_of,
    highlights_flavors,
    masterpiece,
    traditional_techniques,
];

fn interpretation_of(d: &DescriptionParts<'_>) -> String {
    format!(
        "A {} interpretation of {}, showcasing the mastery of {} cuisine.",
        d.flavor, d.primary, d.cuisine
    )
}

fn highlights_flavors(d: &DescriptionParts<'_>) -> String {
    format!(
        "This exquisite {} highlights the natural flavors of {} with {} notes.",
        d.dish_name, d.primary, d.flavor
    )
}

fn masterpiece(d: &DescriptionParts<'_>) -> String {
    format!(
        "An Iron Chef masterpiece that transforms humble {} into a {} culinary experience.",
        d.primary, d.flavor
    )
}

fn traditional_techniques(d: &DescriptionParts<'_>) -> String {
    format!(
        "Inspired by traditional {} techniques, this dish brings out the {} essence of {}.",
        d.cuisine, d.flavor, d.primary
    )
}

pub struct RecipeGenerator<R = ChaCha8Rng> {
    rng: R,
}

impl RecipeGenerator<ChaCha8Rng> {
    /// Generator with a fixed seed; identical inputs give identical recipes.
    pub fn seeded(seed: u64) -> Self {
        RecipeGenerator::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        RecipeGenerator::new(ChaCha8Rng::from_os_rng())
    }
}

impl Default for RecipeGenerator<ChaCha8Rng> {
    fn default() -> Self {
        RecipeGenerator::from_os_rng()
    }
}

impl<R: Rng> RecipeGenerator<R> {
    pub fn new(rng: R) -> Self {
        RecipeGenerator { rng }
    }

    /// Generate a recipe. Never fails: empty inputs fall back to a
    /// placeholder ingredient and unknown cuisines use the Japanese profile
    /// while keeping the given name in the prose.
    pub fn generate(
        &mut self,
        dish_name: &str,
        main_ingredients: &str,
        cuisine_style: &str,
    ) -> Recipe {
        let profile = CuisineProfile::for_name(cuisine_style);
        let parsed = ParsedIngredients::parse(main_ingredients);
        let primary = parsed.primary_name();

        let method = select_cooking_method(&mut self.rng, dish_name, profile);
        let timing = estimate_times(dish_name, method);
        tracing::debug!(dish = dish_name, method = %method, "selected cooking method");

        let description =
            generate_description(&mut self.rng, dish_name, primary, cuisine_style, profile);
        let ingredients = build_ingredient_list(&parsed, dish_name);
        let instructions = generate_instructions(dish_name, primary, method);
        let chef_tips = generate_chef_tips(&mut self.rng, primary, profile);
        let wine_pairing = suggest_wine_pairing(&mut self.rng, profile);

        Recipe {
            title: format!("Iron Chef Style {dish_name}"),
            description,
            servings: SERVINGS,
            prep_time: timing.prep_minutes,
            cook_time: timing.cook_minutes,
            ingredients,
            instructions,
            chef_tips,
            wine_pairing,
        }
    }
}

/// Pick a flavor word and a template, then fill it in.
pub fn generate_description<R: Rng + ?Sized>(
    rng: &mut R,
    dish_name: &str,
    primary: &str,
    cuisine: &str,
    profile: &CuisineProfile,
) -> String {
    let flavor = profile
        .flavor_descriptors
        .choose(rng)
        .copied()
        .unwrap_or("balanced");
    let parts = DescriptionParts {
        flavor,
        dish_name,
        primary,
        cuisine,
    };
    let template = DESCRIPTION_TEMPLATES[rng.random_range(0..DESCRIPTION_TEMPLATES.len())];
    template(&parts)
}

pub fn suggest_wine_pairing<R: Rng + ?Sized>(rng: &mut R, profile: &CuisineProfile) -> String {
    profile
        .wine_options
        .choose(rng)
        .copied()
        .unwrap_or("Sake")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuisine::{ITALIAN, JAPANESE};

    #[test]
    fn test_every_template_interpolates() {
        let parts = DescriptionParts {
            flavor: "umami",
            dish_name: "Lobster Sashimi",
            primary: "lobster",
            cuisine: "Japanese",
        };
        for template in DESCRIPTION_TEMPLATES {
            let text = template(&parts);
            assert!(text.contains("umami"), "{text}");
            assert!(text.contains("lobster"), "{text}");
        }
        assert_eq!(DESCRIPTION_TEMPLATES.len(), 4);
    }

    #[test]
    fn test_description_uses_profile_flavors() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let text =
                generate_description(&mut rng, "Lobster Risotto", "lobster", "Italian", &ITALIAN);
            assert!(ITALIAN.flavor_descriptors.iter().any(|f| text.contains(f)));
        }
    }

    #[test]
    fn test_wine_comes_from_profile() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..20 {
            let wine = suggest_wine_pairing(&mut rng, &JAPANESE);
            assert!(JAPANESE.wine_options.contains(&wine.as_str()));
        }
    }

    #[test]
    fn test_all_templates_reachable() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let text = generate_description(&mut rng, "Dish", "tuna", "Japanese", &JAPANESE);
            if text.starts_with("A ") {
                seen[0] = true;
            } else if text.starts_with("This exquisite") {
                seen[1] = true;
            } else if text.starts_with("An Iron Chef") {
                seen[2] = true;
            } else if text.starts_with("Inspired by") {
                seen[3] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}

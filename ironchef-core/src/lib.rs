pub mod chef_tips;
pub mod cooking_method;
pub mod cuisine;
pub mod error;
pub mod generator;
pub mod ingredients;
pub mod instructions;
pub mod rules;
pub mod types;

pub use cooking_method::{estimate_times, method_from_dish_name, select_cooking_method};
pub use cuisine::{CuisineProfile, CuisineStyle};
pub use error::FormatError;
pub use generator::{RecipeGenerator, DEFAULT_CUISINE, SERVINGS};
pub use ingredients::{title_case, ParsedIngredients};
pub use types::{ChefType, CookingMethod, ExportFormat, Ingredient, Recipe, Timing};

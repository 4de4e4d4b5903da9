use chrono::NaiveDateTime;
use diesel::prelude::*;
use ironchef_core::{ChefType, Ingredient, Recipe};
use serde::Serialize;

#[derive(Insertable, Default)]
#[diesel(table_name = crate::schema::iron_chefs)]
pub struct NewIronChef<'a> {
    pub name: &'a str,
    pub title: Option<&'a str>,
    pub specialty: Option<&'a str>,
    pub active_years: Option<&'a str>,
}

#[derive(Insertable, Default)]
#[diesel(table_name = crate::schema::competitors)]
pub struct NewCompetitor<'a> {
    pub name: &'a str,
    pub restaurant: Option<&'a str>,
    pub specialty: Option<&'a str>,
    pub location: Option<&'a str>,
}

#[derive(Queryable, Selectable, Serialize, Debug, Clone)]
#[diesel(table_name = crate::schema::episodes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Episode {
    pub id: i32,
    pub episode_number: i32,
    pub air_date: Option<String>,
    pub theme: String,
    pub iron_chef_id: i32,
    pub competitor_id: i32,
    pub winner: Option<String>,
    pub judges_scores: Option<String>,
}

#[derive(Insertable, Default)]
#[diesel(table_name = crate::schema::episodes)]
pub struct NewEpisode<'a> {
    pub episode_number: i32,
    pub air_date: Option<&'a str>,
    pub theme: &'a str,
    pub iron_chef_id: i32,
    pub competitor_id: i32,
    pub winner: Option<&'a str>,
    pub judges_scores: Option<&'a str>,
}

/// An episode with both chefs' names resolved.
#[derive(Serialize, Debug, Clone)]
pub struct EpisodeSummary {
    #[serde(flatten)]
    pub episode: Episode,
    pub iron_chef_name: String,
    pub competitor_name: String,
}

#[derive(Queryable, Selectable, Serialize, Debug, Clone)]
#[diesel(table_name = crate::schema::dishes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Dish {
    pub id: i32,
    pub episode_id: i32,
    pub chef_type: String,
    pub dish_number: i32,
    pub dish_name: String,
    pub description: Option<String>,
    pub main_ingredients: Option<String>,
    pub cooking_techniques: Option<String>,
}

impl Dish {
    pub fn chef_type(&self) -> Option<ChefType> {
        ChefType::from_str(&self.chef_type)
    }

    pub fn main_ingredients(&self) -> &str {
        self.main_ingredients.as_deref().unwrap_or("")
    }

    /// Cuisine used when generating a recipe for this dish without an
    /// explicit choice: Iron Chef dishes are Japanese, challenger pasta and
    /// risotto Italian, everything else French.
    pub fn inferred_cuisine(&self) -> &'static str {
        match self.chef_type() {
            Some(ChefType::IronChef) => "Japanese",
            _ => {
                let name = self.dish_name.to_lowercase();
                if name.contains("risotto") || name.contains("pasta") {
                    "Italian"
                } else {
                    "French"
                }
            }
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::dishes)]
pub struct NewDish<'a> {
    pub episode_id: i32,
    pub chef_type: &'a str,
    pub dish_number: i32,
    pub dish_name: &'a str,
    pub description: Option<&'a str>,
    pub main_ingredients: Option<&'a str>,
    pub cooking_techniques: Option<&'a str>,
}

/// A dish together with the episode it was served in.
#[derive(Serialize, Debug, Clone)]
pub struct DishWithEpisode {
    #[serde(flatten)]
    pub dish: Dish,
    pub theme: String,
    pub episode_number: i32,
}

/// Everything shown for one episode: the battle and both chefs' courses.
#[derive(Serialize, Debug, Clone)]
pub struct EpisodeDetails {
    #[serde(flatten)]
    pub summary: EpisodeSummary,
    pub dishes: DishesByChef,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct DishesByChef {
    pub iron_chef: Vec<Dish>,
    pub competitor: Vec<Dish>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub name: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::dish_ingredients)]
pub struct NewDishIngredient<'a> {
    pub dish_id: i32,
    pub ingredient_id: i32,
    pub quantity: Option<&'a str>,
    pub unit: Option<&'a str>,
}

/// A generated recipe as stored; list columns hold JSON text.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StoredRecipe {
    pub id: i32,
    pub dish_id: i32,
    pub recipe_title: String,
    pub description: Option<String>,
    pub ingredients: String,
    pub instructions: String,
    pub chef_tips: Option<String>,
    pub wine_pairing: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub generated_date: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub dish_id: i32,
    pub recipe_title: &'a str,
    pub description: Option<&'a str>,
    pub ingredients: &'a str,
    pub instructions: &'a str,
    pub chef_tips: Option<&'a str>,
    pub wine_pairing: Option<&'a str>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
}

/// A stored recipe with its JSON columns decoded.
#[derive(Serialize, Debug, Clone)]
pub struct RecipeRecord {
    pub id: i32,
    pub dish_id: i32,
    pub recipe_title: String,
    pub description: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub chef_tips: Vec<String>,
    pub wine_pairing: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub generated_date: NaiveDateTime,
}

impl RecipeRecord {
    /// Decode the JSON columns. Malformed JSON is reported, not masked.
    pub fn decode(row: StoredRecipe) -> Result<Self, serde_json::Error> {
        let ingredients = serde_json::from_str(&row.ingredients)?;
        let instructions = serde_json::from_str(&row.instructions)?;
        let chef_tips = match row.chef_tips.as_deref() {
            Some(json) => serde_json::from_str(json)?,
            None => Vec::new(),
        };
        Ok(RecipeRecord {
            id: row.id,
            dish_id: row.dish_id,
            recipe_title: row.recipe_title,
            description: row.description,
            ingredients,
            instructions,
            chef_tips,
            wine_pairing: row.wine_pairing,
            prep_time: row.prep_time,
            cook_time: row.cook_time,
            servings: row.servings,
            generated_date: row.generated_date,
        })
    }

    /// Decode the JSON columns, falling back to empty lists for rows that
    /// cannot be parsed so a bulk listing survives one bad row.
    pub fn decode_lenient(row: StoredRecipe) -> Self {
        let id = row.id;
        match RecipeRecord::decode(row.clone()) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(recipe_id = id, error = %e, "Stored recipe has malformed JSON");
                RecipeRecord {
                    id: row.id,
                    dish_id: row.dish_id,
                    recipe_title: row.recipe_title,
                    description: row.description,
                    ingredients: serde_json::from_str(&row.ingredients).unwrap_or_default(),
                    instructions: serde_json::from_str(&row.instructions).unwrap_or_default(),
                    chef_tips: row
                        .chef_tips
                        .as_deref()
                        .and_then(|json| serde_json::from_str(json).ok())
                        .unwrap_or_default(),
                    wine_pairing: row.wine_pairing,
                    prep_time: row.prep_time,
                    cook_time: row.cook_time,
                    servings: row.servings,
                    generated_date: row.generated_date,
                }
            }
        }
    }

    /// Rebuild the generator's view of this recipe.
    pub fn to_recipe(&self) -> Recipe {
        Recipe {
            title: self.recipe_title.clone(),
            description: self.description.clone().unwrap_or_default(),
            servings: self.servings.map_or(0, |s| s.max(0) as u32),
            prep_time: self.prep_time.map_or(0, |t| t.max(0) as u32),
            cook_time: self.cook_time.map_or(0, |t| t.max(0) as u32),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            chef_tips: self.chef_tips.clone(),
            wine_pairing: self.wine_pairing.clone().unwrap_or_default(),
        }
    }
}

/// Where a recipe came from, as shown in exports.
#[derive(Serialize, Debug, Clone)]
pub struct DishInfo {
    pub dish_name: String,
    pub chef_type: String,
    pub theme: String,
    pub episode_number: i32,
    pub iron_chef_name: String,
    pub competitor_name: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct RecipeWithDish {
    #[serde(flatten)]
    pub recipe: RecipeRecord,
    pub dish_info: DishInfo,
}

/// A recipe row joined to its dish and episode, for bulk export.
#[derive(Serialize, Debug, Clone)]
pub struct RecipeWithContext {
    #[serde(flatten)]
    pub recipe: RecipeRecord,
    pub dish_name: String,
    pub chef_type: String,
    pub theme: String,
    pub episode_number: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(chef_type: &str, name: &str) -> Dish {
        Dish {
            id: 1,
            episode_id: 1,
            chef_type: chef_type.to_string(),
            dish_number: 1,
            dish_name: name.to_string(),
            description: None,
            main_ingredients: None,
            cooking_techniques: None,
        }
    }

    fn stored(ingredients: &str) -> StoredRecipe {
        StoredRecipe {
            id: 7,
            dish_id: 3,
            recipe_title: "Iron Chef Style Lobster Sashimi".to_string(),
            description: None,
            ingredients: ingredients.to_string(),
            instructions: r#"["Slice."]"#.to_string(),
            chef_tips: None,
            wine_pairing: Some("Sake".to_string()),
            prep_time: Some(20),
            cook_time: Some(0),
            servings: Some(4),
            generated_date: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_inferred_cuisine() {
        assert_eq!(dish("iron_chef", "Lobster Risotto").inferred_cuisine(), "Japanese");
        assert_eq!(dish("competitor", "Lobster Risotto").inferred_cuisine(), "Italian");
        assert_eq!(dish("competitor", "Squid Ink Pasta").inferred_cuisine(), "Italian");
        assert_eq!(dish("competitor", "Lobster Thermidor").inferred_cuisine(), "French");
    }

    #[test]
    fn test_decode_valid_row() {
        let row = stored(r#"[{"item":"Lobster","amount":"8 oz","prep":"cleaned, shell removed"}]"#);
        let record = RecipeRecord::decode(row).unwrap();
        assert_eq!(record.ingredients[0].item, "Lobster");
        assert_eq!(record.instructions, vec!["Slice."]);
        assert!(record.chef_tips.is_empty());
        assert_eq!(record.to_recipe().servings, 4);
    }

    #[test]
    fn test_decode_malformed_row() {
        assert!(RecipeRecord::decode(stored("not json")).is_err());
        let record = RecipeRecord::decode_lenient(stored("not json"));
        assert!(record.ingredients.is_empty());
        assert_eq!(record.instructions, vec!["Slice."]);
    }
}

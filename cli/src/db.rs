use std::path::Path;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use ironchef_core::{ChefType, Recipe};

use crate::error::StoreError;
use crate::models::{
    Dish, DishInfo, DishWithEpisode, DishesByChef, Episode, EpisodeDetails, EpisodeSummary,
    NewCompetitor, NewDish, NewDishIngredient, NewEpisode, NewIngredient, NewIronChef, NewRecipe,
    RecipeRecord, RecipeWithContext, RecipeWithDish, StoredRecipe,
};
use crate::schema::{
    competitors, dish_ingredients, dishes, episodes, ingredients, iron_chefs, recipes,
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Per-connection SQLite settings. Foreign keys are off by default in SQLite.
#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(r2d2::Error::QueryError)
    }
}

pub fn create_pool(database_path: &Path, pool_size: u32) -> Result<DbPool, StoreError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_path.to_string_lossy());
    let pool = r2d2::Pool::builder()
        .max_size(pool_size.max(1))
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)?;

    // Run pending migrations on startup
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Migration(e.to_string()))?;
    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "Applied database migrations");
    }

    Ok(pool)
}

/// Inserts that trip a constraint are integrity errors, not generic failures.
fn map_insert_error(e: DieselError) -> StoreError {
    match e {
        DieselError::DatabaseError(
            kind @ (DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::NotNullViolation),
            info,
        ) => StoreError::Integrity(format!("{kind:?}: {}", info.message())),
        other => StoreError::Database(other),
    }
}

/// The episode catalog: chefs, battles, dishes, ingredients and generated
/// recipes. Every operation checks out its own pooled connection.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    /// Open (creating if needed) the database file and bring its schema up
    /// to date.
    pub fn open(database_path: &Path, pool_size: u32) -> Result<Self, StoreError> {
        tracing::info!(path = %database_path.display(), "Opening recipe database");
        Ok(Store {
            pool: create_pool(database_path, pool_size)?,
        })
    }

    fn conn(&self) -> Result<DbConn, StoreError> {
        Ok(self.pool.get()?)
    }

    pub fn add_iron_chef(&self, chef: &NewIronChef<'_>) -> Result<i32, StoreError> {
        let mut conn = self.conn()?;
        let id = diesel::insert_into(iron_chefs::table)
            .values(chef)
            .returning(iron_chefs::id)
            .get_result(&mut conn)
            .map_err(map_insert_error)?;
        tracing::debug!(id, name = chef.name, "Added Iron Chef");
        Ok(id)
    }

    pub fn add_competitor(&self, competitor: &NewCompetitor<'_>) -> Result<i32, StoreError> {
        let mut conn = self.conn()?;
        let id = diesel::insert_into(competitors::table)
            .values(competitor)
            .returning(competitors::id)
            .get_result(&mut conn)
            .map_err(map_insert_error)?;
        tracing::debug!(id, name = competitor.name, "Added competitor");
        Ok(id)
    }

    pub fn add_episode(&self, episode: &NewEpisode<'_>) -> Result<i32, StoreError> {
        let mut conn = self.conn()?;
        let id = diesel::insert_into(episodes::table)
            .values(episode)
            .returning(episodes::id)
            .get_result(&mut conn)
            .map_err(map_insert_error)?;
        tracing::debug!(id, number = episode.episode_number, theme = episode.theme, "Added episode");
        Ok(id)
    }

    pub fn add_dish(&self, dish: &NewDish<'_>) -> Result<i32, StoreError> {
        if ChefType::from_str(dish.chef_type).is_none() {
            return Err(StoreError::Integrity(format!(
                "unknown chef type: {}",
                dish.chef_type
            )));
        }
        let mut conn = self.conn()?;
        let id = diesel::insert_into(dishes::table)
            .values(dish)
            .returning(dishes::id)
            .get_result(&mut conn)
            .map_err(map_insert_error)?;
        Ok(id)
    }

    /// Add an ingredient to the master list, returning the existing id when
    /// the name is already present.
    pub fn add_ingredient(&self, name: &str) -> Result<i32, StoreError> {
        let mut conn = self.conn()?;
        let inserted = diesel::insert_into(ingredients::table)
            .values(&NewIngredient { name })
            .returning(ingredients::id)
            .get_result::<i32>(&mut conn);

        match inserted {
            Ok(id) => Ok(id),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                let id = ingredients::table
                    .filter(ingredients::name.eq(name))
                    .select(ingredients::id)
                    .first(&mut conn)?;
                tracing::debug!(id, name, "Reusing existing ingredient");
                Ok(id)
            }
            Err(e) => Err(map_insert_error(e)),
        }
    }

    pub fn link_dish_ingredient(
        &self,
        dish_id: i32,
        ingredient_id: i32,
        quantity: Option<&str>,
        unit: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        diesel::insert_into(dish_ingredients::table)
            .values(&NewDishIngredient {
                dish_id,
                ingredient_id,
                quantity,
                unit,
            })
            .execute(&mut conn)
            .map_err(map_insert_error)?;
        Ok(())
    }

    pub fn episode_count(&self) -> Result<i64, StoreError> {
        let mut conn = self.conn()?;
        Ok(episodes::table.count().get_result(&mut conn)?)
    }

    /// An episode with chef names and both chefs' dishes, or `None`.
    pub fn get_episode_details(&self, episode_id: i32) -> Result<Option<EpisodeDetails>, StoreError> {
        let mut conn = self.conn()?;
        let row = episodes::table
            .inner_join(iron_chefs::table)
            .inner_join(competitors::table)
            .filter(episodes::id.eq(episode_id))
            .select((Episode::as_select(), iron_chefs::name, competitors::name))
            .first::<(Episode, String, String)>(&mut conn)
            .optional()?;

        let Some((episode, iron_chef_name, competitor_name)) = row else {
            return Ok(None);
        };

        let all_dishes: Vec<Dish> = dishes::table
            .filter(dishes::episode_id.eq(episode_id))
            .order((dishes::chef_type.asc(), dishes::dish_number.asc()))
            .select(Dish::as_select())
            .load(&mut conn)?;

        let mut grouped = DishesByChef::default();
        for dish in all_dishes {
            match dish.chef_type() {
                Some(ChefType::IronChef) => grouped.iron_chef.push(dish),
                Some(ChefType::Competitor) => grouped.competitor.push(dish),
                None => tracing::warn!(
                    dish_id = dish.id,
                    chef_type = %dish.chef_type,
                    "Skipping dish with unknown chef type"
                ),
            }
        }

        Ok(Some(EpisodeDetails {
            summary: EpisodeSummary {
                episode,
                iron_chef_name,
                competitor_name,
            },
            dishes: grouped,
        }))
    }

    /// Episodes whose theme contains `theme` (case-insensitive for ASCII),
    /// ordered by episode number. An empty theme lists every episode.
    pub fn search_episodes_by_theme(&self, theme: &str) -> Result<Vec<EpisodeSummary>, StoreError> {
        let mut conn = self.conn()?;
        let pattern = format!("%{theme}%");
        let rows = episodes::table
            .inner_join(iron_chefs::table)
            .inner_join(competitors::table)
            .filter(episodes::theme.like(pattern))
            .order(episodes::episode_number.asc())
            .select((Episode::as_select(), iron_chefs::name, competitors::name))
            .load::<(Episode, String, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(episode, iron_chef_name, competitor_name)| EpisodeSummary {
                episode,
                iron_chef_name,
                competitor_name,
            })
            .collect())
    }

    pub fn get_all_themes(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn()?;
        Ok(episodes::table
            .select(episodes::theme)
            .distinct()
            .order(episodes::theme.asc())
            .load(&mut conn)?)
    }

    /// Dishes whose main ingredients mention `ingredient`.
    pub fn get_dishes_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<DishWithEpisode>, StoreError> {
        let mut conn = self.conn()?;
        let pattern = format!("%{ingredient}%");
        let rows = dishes::table
            .inner_join(episodes::table)
            .filter(dishes::main_ingredients.like(pattern))
            .order((
                episodes::episode_number.asc(),
                dishes::chef_type.asc(),
                dishes::dish_number.asc(),
            ))
            .select((Dish::as_select(), episodes::theme, episodes::episode_number))
            .load::<(Dish, String, i32)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(dish, theme, episode_number)| DishWithEpisode {
                dish,
                theme,
                episode_number,
            })
            .collect())
    }

    pub fn get_dish(&self, dish_id: i32) -> Result<Option<Dish>, StoreError> {
        let mut conn = self.conn()?;
        Ok(dishes::table
            .find(dish_id)
            .select(Dish::as_select())
            .first(&mut conn)
            .optional()?)
    }

    pub fn add_recipe(&self, recipe: &NewRecipe<'_>) -> Result<i32, StoreError> {
        let mut conn = self.conn()?;
        let id = diesel::insert_into(recipes::table)
            .values(recipe)
            .returning(recipes::id)
            .get_result(&mut conn)
            .map_err(map_insert_error)?;
        Ok(id)
    }

    /// Persist a generated recipe against a dish, returning the new row id.
    pub fn save_recipe(&self, dish_id: i32, recipe: &Recipe) -> Result<i32, StoreError> {
        let ingredients = serde_json::to_string(&recipe.ingredients)?;
        let instructions = serde_json::to_string(&recipe.instructions)?;
        let chef_tips = serde_json::to_string(&recipe.chef_tips)?;

        let id = self.add_recipe(&NewRecipe {
            dish_id,
            recipe_title: &recipe.title,
            description: Some(&recipe.description),
            ingredients: &ingredients,
            instructions: &instructions,
            chef_tips: Some(&chef_tips),
            wine_pairing: Some(&recipe.wine_pairing),
            prep_time: Some(recipe.prep_time as i32),
            cook_time: Some(recipe.cook_time as i32),
            servings: Some(recipe.servings as i32),
        })?;
        tracing::info!(recipe_id = id, dish_id, title = %recipe.title, "Saved recipe");
        Ok(id)
    }

    /// The most recently generated recipe for a dish, with where it came from.
    pub fn get_recipe_for_dish(&self, dish_id: i32) -> Result<Option<RecipeWithDish>, StoreError> {
        let mut conn = self.conn()?;
        let row = recipes::table
            .filter(recipes::dish_id.eq(dish_id))
            .order((recipes::generated_date.desc(), recipes::id.desc()))
            .select(StoredRecipe::as_select())
            .first::<StoredRecipe>(&mut conn)
            .optional()?;
        let Some(row) = row else {
            return Ok(None);
        };

        let (dish, episode) = dishes::table
            .inner_join(episodes::table)
            .filter(dishes::id.eq(dish_id))
            .select((Dish::as_select(), Episode::as_select()))
            .first::<(Dish, Episode)>(&mut conn)?;
        let iron_chef_name = iron_chefs::table
            .find(episode.iron_chef_id)
            .select(iron_chefs::name)
            .first::<String>(&mut conn)?;
        let competitor_name = competitors::table
            .find(episode.competitor_id)
            .select(competitors::name)
            .first::<String>(&mut conn)?;

        Ok(Some(RecipeWithDish {
            recipe: RecipeRecord::decode(row)?,
            dish_info: DishInfo {
                dish_name: dish.dish_name,
                chef_type: dish.chef_type,
                theme: episode.theme,
                episode_number: episode.episode_number,
                iron_chef_name,
                competitor_name,
            },
        }))
    }

    /// Every stored recipe with its dish and episode, ordered by episode,
    /// chef type and dish number. Rows with malformed JSON come back with
    /// empty lists.
    pub fn list_recipes_with_context(&self) -> Result<Vec<RecipeWithContext>, StoreError> {
        let mut conn = self.conn()?;
        let rows = recipes::table
            .inner_join(dishes::table.inner_join(episodes::table))
            .order((
                episodes::episode_number.asc(),
                dishes::chef_type.asc(),
                dishes::dish_number.asc(),
                recipes::id.asc(),
            ))
            .select((
                StoredRecipe::as_select(),
                dishes::dish_name,
                dishes::chef_type,
                episodes::theme,
                episodes::episode_number,
            ))
            .load::<(StoredRecipe, String, String, String, i32)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(row, dish_name, chef_type, theme, episode_number)| RecipeWithContext {
                recipe: RecipeRecord::decode_lenient(row),
                dish_name,
                chef_type,
                theme,
                episode_number,
            })
            .collect())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::temp_store;
    use super::*;
    use ironchef_core::RecipeGenerator;

    fn seed_episode(store: &Store) -> (i32, i32) {
        let chef = store
            .add_iron_chef(&NewIronChef {
                name: "Rokusaburo Michiba",
                title: Some("Iron Chef Japanese"),
                ..Default::default()
            })
            .unwrap();
        let challenger = store
            .add_competitor(&NewCompetitor {
                name: "Challenger",
                ..Default::default()
            })
            .unwrap();
        let episode = store
            .add_episode(&NewEpisode {
                episode_number: 150,
                theme: "Lobster",
                iron_chef_id: chef,
                competitor_id: challenger,
                winner: Some("iron_chef"),
                ..Default::default()
            })
            .unwrap();
        let dish = store
            .add_dish(&NewDish {
                episode_id: episode,
                chef_type: "iron_chef",
                dish_number: 1,
                dish_name: "Lobster Sashimi",
                description: None,
                main_ingredients: Some("lobster, wasabi, soy sauce"),
                cooking_techniques: Some("raw preparation"),
            })
            .unwrap();
        (episode, dish)
    }

    #[test]
    fn test_add_ingredient_reuses_existing_id() {
        let (_dir, store) = temp_store();
        let first = store.add_ingredient("lobster").unwrap();
        let second = store.add_ingredient("lobster").unwrap();
        let other = store.add_ingredient("wasabi").unwrap();
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_episode_details_groups_dishes() {
        let (_dir, store) = temp_store();
        let (episode_id, _) = seed_episode(&store);
        store
            .add_dish(&NewDish {
                episode_id,
                chef_type: "competitor",
                dish_number: 1,
                dish_name: "Lobster Thermidor",
                description: None,
                main_ingredients: Some("lobster, cream"),
                cooking_techniques: None,
            })
            .unwrap();

        let details = store.get_episode_details(episode_id).unwrap().unwrap();
        assert_eq!(details.summary.iron_chef_name, "Rokusaburo Michiba");
        assert_eq!(details.dishes.iron_chef.len(), 1);
        assert_eq!(details.dishes.competitor[0].dish_name, "Lobster Thermidor");

        assert!(store.get_episode_details(episode_id + 100).unwrap().is_none());
    }

    #[test]
    fn test_theme_search_and_themes() {
        let (_dir, store) = temp_store();
        seed_episode(&store);
        assert_eq!(store.search_episodes_by_theme("lob").unwrap().len(), 1);
        assert_eq!(store.search_episodes_by_theme("").unwrap().len(), 1);
        assert!(store.search_episodes_by_theme("Truffle").unwrap().is_empty());
        assert_eq!(store.get_all_themes().unwrap(), vec!["Lobster"]);
    }

    #[test]
    fn test_dishes_by_ingredient() {
        let (_dir, store) = temp_store();
        seed_episode(&store);
        let found = store.get_dishes_by_ingredient("wasabi").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].theme, "Lobster");
        assert_eq!(found[0].episode_number, 150);
        assert!(store.get_dishes_by_ingredient("truffle").unwrap().is_empty());
    }

    #[test]
    fn test_saved_recipe_round_trips() {
        let (_dir, store) = temp_store();
        let (_, dish_id) = seed_episode(&store);
        let recipe = RecipeGenerator::seeded(8).generate("Lobster Sashimi", "lobster, wasabi", "Japanese");

        let id = store.save_recipe(dish_id, &recipe).unwrap();
        assert!(id > 0);

        let loaded = store.get_recipe_for_dish(dish_id).unwrap().unwrap();
        assert_eq!(loaded.recipe.to_recipe(), recipe);
        assert_eq!(loaded.dish_info.episode_number, 150);
        assert_eq!(loaded.dish_info.competitor_name, "Challenger");

        let all = store.list_recipes_with_context().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].dish_name, "Lobster Sashimi");
    }

    #[test]
    fn test_recipe_for_unknown_dish_is_integrity_error() {
        let (_dir, store) = temp_store();
        let recipe = RecipeGenerator::seeded(1).generate("Dish", "tuna", "Japanese");
        assert!(matches!(
            store.save_recipe(999, &recipe),
            Err(StoreError::Integrity(_))
        ));
        assert!(store.get_recipe_for_dish(999).unwrap().is_none());
    }

    #[test]
    fn test_unknown_chef_type_rejected() {
        let (_dir, store) = temp_store();
        let (episode_id, _) = seed_episode(&store);
        let result = store.add_dish(&NewDish {
            episode_id,
            chef_type: "judge",
            dish_number: 1,
            dish_name: "Nothing",
            description: None,
            main_ingredients: None,
            cooking_techniques: None,
        });
        assert!(matches!(result, Err(StoreError::Integrity(_))));
    }
}

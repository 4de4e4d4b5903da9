//! Raw SQL that Diesel's DSL can't express: DDL, SQLite catalog lookups and
//! per-table counts over a fixed table list.
//!
//! # Safety
//!
//! Nothing in this module interpolates user input. Table and index names
//! come from the static lists below; anything else is passed via `.bind()`.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};

/// Tables whose row counts appear in migration statistics.
pub const STAT_TABLES: &[&str] = &[
    "iron_chefs",
    "competitors",
    "episodes",
    "dishes",
    "ingredients",
    "dish_ingredients",
    "recipes",
];

/// A performance index and the statement that creates it.
#[derive(Debug, Clone, Copy)]
pub struct IndexDef {
    pub name: &'static str,
    pub create_sql: &'static str,
}

pub const PERFORMANCE_INDICES: &[IndexDef] = &[
    IndexDef {
        name: "idx_episodes_air_date",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_episodes_air_date ON episodes(air_date)",
    },
    IndexDef {
        name: "idx_episodes_episode_number",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_episodes_episode_number ON episodes(episode_number)",
    },
    IndexDef {
        name: "idx_recipes_dish_id",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_recipes_dish_id ON recipes(dish_id)",
    },
    IndexDef {
        name: "idx_recipes_generated_date",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_recipes_generated_date ON recipes(generated_date)",
    },
    IndexDef {
        name: "idx_dish_ingredients_dish_id",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_dish_ingredients_dish_id ON dish_ingredients(dish_id)",
    },
    IndexDef {
        name: "idx_dish_ingredients_ingredient_id",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_dish_ingredients_ingredient_id ON dish_ingredients(ingredient_id)",
    },
    IndexDef {
        name: "idx_ingredients_name",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_ingredients_name ON ingredients(name)",
    },
    IndexDef {
        name: "idx_episodes_theme_date",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_episodes_theme_date ON episodes(theme, air_date)",
    },
    IndexDef {
        name: "idx_dishes_episode_chef",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_dishes_episode_chef ON dishes(episode_id, chef_type)",
    },
    IndexDef {
        name: "idx_recipes_dish_date",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_recipes_dish_date ON recipes(dish_id, generated_date)",
    },
];

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Names of user-created indices. SQLite's automatic indices have no SQL.
///
/// # Why raw SQL?
/// `sqlite_master` isn't part of the Diesel schema.
pub fn existing_indices(conn: &mut SqliteConnection) -> QueryResult<Vec<String>> {
    let rows: Vec<NameRow> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'index' AND sql IS NOT NULL ORDER BY name",
    )
    .load(conn)?;
    Ok(rows.into_iter().map(|r| r.name).collect())
}

pub fn table_exists(conn: &mut SqliteConnection, table: &str) -> QueryResult<bool> {
    let rows: Vec<NameRow> =
        diesel::sql_query("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind::<Text, _>(table)
            .load(conn)?;
    Ok(!rows.is_empty())
}

/// Row count of a table from [`STAT_TABLES`].
///
/// # Safety
/// The table name is interpolated, so callers must only pass entries of
/// [`STAT_TABLES`]; anything else is refused.
pub fn count_rows(conn: &mut SqliteConnection, table: &str) -> QueryResult<i64> {
    if !STAT_TABLES.contains(&table) {
        return Err(diesel::result::Error::NotFound);
    }
    let row: CountRow = diesel::sql_query(format!("SELECT COUNT(*) AS count FROM {table}"))
        .get_result(conn)?;
    Ok(row.count)
}

pub fn create_index(conn: &mut SqliteConnection, index: &IndexDef) -> QueryResult<()> {
    diesel::sql_query(index.create_sql).execute(conn)?;
    Ok(())
}

/// Refresh the query planner's statistics.
pub fn analyze(conn: &mut SqliteConnection) -> QueryResult<()> {
    diesel::sql_query("ANALYZE").execute(conn)?;
    Ok(())
}

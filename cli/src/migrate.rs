//! Adds the performance indices to an existing database file and reports
//! before/after statistics.

use std::collections::BTreeMap;
use std::path::Path;

use diesel::prelude::*;
use serde::Serialize;

use crate::error::StoreError;
use crate::raw_sql::{self, PERFORMANCE_INDICES, STAT_TABLES};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DatabaseStats {
    /// Row count per table; missing tables count as zero.
    pub row_counts: BTreeMap<String, i64>,
    pub index_count: usize,
    pub file_size_bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub created: usize,
    pub total: usize,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
    pub before: DatabaseStats,
    pub after: DatabaseStats,
}

impl MigrationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub fn collect_stats(conn: &mut SqliteConnection, path: &Path) -> Result<DatabaseStats, StoreError> {
    let mut row_counts = BTreeMap::new();
    for table in STAT_TABLES {
        let count = if raw_sql::table_exists(conn, table)? {
            raw_sql::count_rows(conn, table)?
        } else {
            0
        };
        row_counts.insert(table.to_string(), count);
    }
    let index_count = raw_sql::existing_indices(conn)?.len();
    let file_size_bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    Ok(DatabaseStats {
        row_counts,
        index_count,
        file_size_bytes,
    })
}

/// Create any missing performance indices on the database at `path`, then
/// run `ANALYZE`. Safe to run repeatedly: existing indices are skipped. A
/// failed index is logged and reported without aborting the others.
pub fn migrate_database(path: &Path) -> Result<MigrationReport, StoreError> {
    if !path.exists() {
        return Err(StoreError::MissingDatabase(path.to_path_buf()));
    }
    let mut conn = SqliteConnection::establish(&path.to_string_lossy())?;

    let before = collect_stats(&mut conn, path)?;
    tracing::info!(
        indices = before.index_count,
        bytes = before.file_size_bytes,
        "Database statistics before migration"
    );

    let existing = raw_sql::existing_indices(&mut conn)?;
    let mut created = 0;
    let mut skipped = Vec::new();
    let mut failed = Vec::new();

    for index in PERFORMANCE_INDICES {
        if existing.iter().any(|name| name == index.name) {
            tracing::info!(index = index.name, "Index already exists, skipping");
            skipped.push(index.name.to_string());
            continue;
        }
        match raw_sql::create_index(&mut conn, index) {
            Ok(()) => {
                tracing::info!(index = index.name, "Created index");
                created += 1;
            }
            Err(e) => {
                tracing::error!(index = index.name, error = %e, "Failed to create index");
                failed.push(index.name.to_string());
            }
        }
    }

    raw_sql::analyze(&mut conn)?;
    tracing::info!("Updated query planner statistics");

    let after = collect_stats(&mut conn, path)?;
    tracing::info!(
        created,
        total = PERFORMANCE_INDICES.len(),
        indices = after.index_count,
        "Index migration finished"
    );

    Ok(MigrationReport {
        created,
        total: PERFORMANCE_INDICES.len(),
        skipped,
        failed,
        before,
        after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::connection::SimpleConnection;

    const BARE_SCHEMA: &str = "
        CREATE TABLE iron_chefs (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
        CREATE TABLE competitors (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
        CREATE TABLE episodes (id INTEGER PRIMARY KEY, episode_number INTEGER, air_date TEXT,
            theme TEXT, iron_chef_id INTEGER, competitor_id INTEGER, winner TEXT);
        CREATE TABLE dishes (id INTEGER PRIMARY KEY, episode_id INTEGER, chef_type TEXT,
            dish_number INTEGER, dish_name TEXT);
        CREATE TABLE ingredients (id INTEGER PRIMARY KEY, name TEXT UNIQUE);
        CREATE TABLE dish_ingredients (dish_id INTEGER, ingredient_id INTEGER);
        CREATE TABLE recipes (id INTEGER PRIMARY KEY, dish_id INTEGER, generated_date TEXT);
        INSERT INTO iron_chefs (name) VALUES ('Chen Kenichi');
    ";

    fn bare_database(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("legacy.db");
        let mut conn = SqliteConnection::establish(&path.to_string_lossy()).unwrap();
        conn.batch_execute(BARE_SCHEMA).unwrap();
        path
    }

    #[test]
    fn test_missing_database_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = migrate_database(&dir.path().join("nope.db"));
        assert!(matches!(result, Err(StoreError::MissingDatabase(_))));
    }

    #[test]
    fn test_migration_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = bare_database(dir.path());

        let first = migrate_database(&path).unwrap();
        assert_eq!((first.created, first.total), (10, 10));
        assert!(first.is_success());
        assert_eq!(first.before.row_counts["iron_chefs"], 1);
        assert!(first.after.index_count >= first.before.index_count + 10);

        let second = migrate_database(&path).unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped.len(), 10);
    }

    #[test]
    fn test_missing_table_counts_zero_and_fails_its_indices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.db");
        let mut conn = SqliteConnection::establish(&path.to_string_lossy()).unwrap();
        conn.batch_execute("CREATE TABLE ingredients (id INTEGER PRIMARY KEY, name TEXT);")
            .unwrap();

        let report = migrate_database(&path).unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(report.failed.len(), 9);
        assert!(!report.is_success());
        assert_eq!(report.before.row_counts["recipes"], 0);
    }

    #[test]
    fn test_store_database_already_has_indices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.db");
        crate::db::Store::open(&path, 1).unwrap();
        let report = migrate_database(&path).unwrap();
        assert_eq!(report.created, 0);
    }
}

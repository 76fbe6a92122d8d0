//! SQLite databases for tests

use std::path::Path;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use super::migrator::Migrator;
use crate::config::DatabaseConfig;

/// Fresh, migrated in-memory database.
///
/// The pool holds exactly one connection: every connection to
/// `sqlite::memory:` would otherwise see its own empty database.
pub(crate) async fn memory_database() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// Migrated SQLite file under `dir`, behind a pool of several connections
/// so writers really contend for the database lock.
pub(crate) async fn file_database(dir: &Path) -> DatabaseConnection {
    let path = dir.join("skillswap.db");
    let config = DatabaseConfig {
        max_connections: 10,
        ..DatabaseConfig::sqlite(&path.display().to_string())
    };

    let db = super::init_database(&config)
        .await
        .expect("connect to sqlite file");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

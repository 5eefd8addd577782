//! Database configuration - connection and schema creation.
//!
//! Tables are generated from the entity definitions with `SeaORM`'s
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs.
//! Creation uses `IF NOT EXISTS` and is safe to run on every start.

use crate::entities::Warning;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/shinobu.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or the default `SQLite` path.
#[must_use]
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the configured database.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let url = database_url();
    tracing::debug!(url = %url, "Connecting to database");
    Database::connect(&url).await.map_err(Into::into)
}

/// Creates all tables that do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut warnings = schema.create_table_from_entity(Warning);
    warnings.if_not_exists();
    db.execute(builder.build(&warnings)).await?;

    Ok(())
}

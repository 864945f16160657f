//! `SQLite` database connection and table creation using `SeaORM`.
//!
//! The schema is generated straight from the entity definitions via
//! `Schema::create_table_from_entity`, so the database always matches the
//! Rust struct definitions without hand-written SQL.

use crate::entities::{Product, Vote};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file next to the binary.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/atelier_buddy.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the `SQLite` database.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates the product and vote tables from the entity definitions.
///
/// Safe to call on every startup: the statements carry `IF NOT EXISTS`.
///
/// # Errors
/// Returns an error if a create-table statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table = schema.create_table_from_entity(Product);
    product_table.if_not_exists();
    db.execute(builder.build(&product_table)).await?;

    let mut vote_table = schema.create_table_from_entity(Vote);
    vote_table.if_not_exists();
    db.execute(builder.build(&vote_table)).await?;

    Ok(())
}

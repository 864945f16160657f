//! Shared test utilities.
//!
//! Common helpers for setting up in-memory test databases and building test
//! products with sensible defaults.

use crate::{
    core::{catalog::ProductKind, product::ProductDraft},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a printed test product from a blank-form draft.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    crate::core::product::create_product(db, ProductDraft::new(name, ProductKind::Printed)).await
}

/// Sets up a complete test environment with one product.
/// Returns (db, product) for common test scenarios.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Test Product").await?;
    Ok((db, product))
}

/// Builds an in-memory product model for pure-function tests, without
/// touching a database. Only `code` and `version` vary; everything else is
/// a plain printed product.
#[must_use]
pub fn sample_product(code: &str, version: &str) -> entities::product::Model {
    let now = chrono::Utc::now().naive_utc();
    entities::product::Model {
        id: 0,
        kind: "printed".to_string(),
        name: format!("Sample {code}"),
        code: code.to_string(),
        version: version.to_string(),
        description: String::new(),
        status: "Prototype".to_string(),
        folder: None,
        tags: String::new(),
        author: None,
        weight_grams: 0.0,
        dimensions: None,
        filament_type: None,
        color: None,
        grams_used: None,
        spool_cost_per_kg: None,
        print_hours: None,
        machine_rate: None,
        labor_rate: None,
        energy_kwh: None,
        supplier: None,
        supplier_contact: None,
        unit_cost: None,
        import_per_unit: None,
        customization_cost: None,
        moq: None,
        lead_time: None,
        margin: 0.45,
        retail_price: 0.0,
        reseller_price: 0.0,
        reseller_discount: 0.30,
        reminder_date: None,
        reminder_done: false,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}

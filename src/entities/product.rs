//! Product entity - one row per tracked product version.
//!
//! A product is either printed in-house (`kind = "printed"`) or ordered from a
//! supplier (`kind = "ordered"`); the kind decides which of the nullable build
//! columns are meaningful. The unit cost is never stored - it is recomputed
//! from the build columns on every read so the stored record can never drift
//! from its inputs.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// `"printed"` (made in-house) or `"ordered"` (bought from a supplier)
    pub kind: String,
    /// Display name (e.g., "Boîte protège-dents")
    pub name: String,
    /// Stable family identifier shared across versions of the same product
    pub code: String,
    /// Revision label, normally of the form `V<n>`
    pub version: String,
    /// Free-form description (may be empty)
    pub description: String,
    /// Pipeline status label - the kanban column this product sits in
    pub status: String,
    /// Optional folder used to group related products
    pub folder: Option<String>,
    /// Comma-separated tag list; parsed by the core layer
    pub tags: String,
    /// Who filled in the record
    pub author: Option<String>,
    /// Finished-product weight in grams
    pub weight_grams: f64,
    /// Free-form dimensions string (e.g., "120×80×45 mm")
    pub dimensions: Option<String>,

    /// Filament material, printed products only
    pub filament_type: Option<String>,
    /// Filament color, printed products only
    pub color: Option<String>,
    /// Grams of filament consumed per unit
    pub grams_used: Option<f64>,
    /// Spool cost per kilogram
    pub spool_cost_per_kg: Option<f64>,
    /// Print time per unit, in hours
    pub print_hours: Option<f64>,
    /// Machine rate in $/h
    pub machine_rate: Option<f64>,
    /// Labor rate in $/h
    pub labor_rate: Option<f64>,
    /// Electricity consumed per unit, in kWh
    pub energy_kwh: Option<f64>,

    /// Supplier name, ordered products only
    pub supplier: Option<String>,
    /// Supplier contact details
    pub supplier_contact: Option<String>,
    /// Supplier unit cost
    pub unit_cost: Option<f64>,
    /// Import fees per unit
    pub import_per_unit: Option<f64>,
    /// Customization cost per unit
    pub customization_cost: Option<f64>,
    /// Minimum order quantity
    pub moq: Option<i64>,
    /// Supplier lead time (free-form, e.g. "30 jours")
    pub lead_time: Option<String>,

    /// Target margin applied on top of cost for the retail suggestion
    pub margin: f64,
    /// Manually entered retail price
    pub retail_price: f64,
    /// Manually entered reseller price
    pub reseller_price: f64,
    /// Discount off retail used for the reseller suggestion
    pub reseller_discount: f64,

    /// Optional follow-up date shown on the dashboard
    pub reminder_date: Option<Date>,
    /// Whether the follow-up has been handled
    pub reminder_done: bool,

    /// Soft delete flag - if true, product is hidden but data is preserved
    pub is_deleted: bool,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many reviewer votes
    #[sea_orm(has_many = "super::vote::Entity")]
    Votes,
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

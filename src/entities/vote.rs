//! Vote entity - one reviewer reaction per product.
//!
//! Each row records which emoji a reviewer currently assigns to a product.
//! Casting again replaces the emoji rather than adding a second row, so the
//! table holds at most one vote per (product, user) pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vote database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    /// Unique identifier for the vote
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product this vote applies to
    pub product_id: i64,
    /// Discord user ID of the reviewer
    pub user_id: String,
    /// The reaction emoji (one of the allowed vote emojis)
    pub emoji: String,
    /// When the vote was first cast
    pub created_at: DateTime,
    /// When the vote was last changed
    pub updated_at: DateTime,
}

/// Defines relationships between Vote and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each vote belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

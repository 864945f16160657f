//! Dashboard indicators and display formatting.
//!
//! The summary mirrors the indicator cards at the top of the old dashboard:
//! how many products exist, which reminders still need attention, which
//! products the whole team loves, and which ones nobody has reviewed yet.
//! Formatting helpers are framework-agnostic; the bot layer assembles them
//! into embeds.

use crate::{
    core::{pricing, product, vote},
    entities::product as product_entity,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Aggregate indicators shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Active products in the catalog
    pub total_products: usize,
    /// Reminders set but not yet handled
    pub pending_reminders: usize,
    /// Products unanimously approved by the reviewer roster
    pub unanimous_favorites: usize,
    /// Products nobody has voted on yet
    pub missing_votes: usize,
}

/// Computes the dashboard indicators over all active products.
///
/// # Errors
/// Returns an error if a database query fails.
pub async fn generate_dashboard_summary(
    db: &DatabaseConnection,
    reviewer_count: usize,
) -> Result<DashboardSummary> {
    let products = product::get_all_active_products(db).await?;

    let mut unanimous_favorites = 0;
    let mut missing_votes = 0;
    for p in &products {
        let emojis: Vec<String> = vote::get_votes_for_product(db, p.id)
            .await?
            .into_iter()
            .map(|v| v.emoji)
            .collect();

        if emojis.is_empty() {
            missing_votes += 1;
        }
        if vote::is_unanimous_approval(&emojis, reviewer_count) {
            unanimous_favorites += 1;
        }
    }

    let pending_reminders = products
        .iter()
        .filter(|p| p.reminder_date.is_some() && !p.reminder_done)
        .count();

    Ok(DashboardSummary {
        total_products: products.len(),
        pending_reminders,
        unanimous_favorites,
        missing_votes,
    })
}

/// Formats a price for display; non-finite amounts render as "-".
#[must_use]
pub fn format_price(amount: f64) -> String {
    if amount.is_finite() {
        format!("${amount:.2}")
    } else {
        "-".to_string()
    }
}

/// One-line cost breakdown for a product's build parameters.
#[must_use]
pub fn format_cost_breakdown(build: &pricing::BuildParams) -> String {
    match build {
        pricing::BuildParams::Printed(p) => format!(
            "Material {} · Time {} · Energy {}",
            format_price(pricing::material_cost(p)),
            format_price(pricing::time_cost(p)),
            format_price(pricing::energy_cost(p)),
        ),
        pricing::BuildParams::Ordered(o) => format!(
            "Unit {} · Import {} · Customization {}",
            format_price(o.unit_cost),
            format_price(o.import_per_unit),
            format_price(o.customization_cost),
        ),
    }
}

/// Short catalog line for a product: name, version, kind tag, and cost.
#[must_use]
pub fn format_product_summary(product: &product_entity::Model) -> String {
    let kind = crate::core::catalog::ProductKind::from_stored(&product.kind);
    format!(
        "{} ({}) [{}] — cost {}",
        product.name,
        product.version,
        kind.tag(),
        format_price(product::current_cost(product)),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::catalog::ProductKind;
    use crate::core::pipeline;
    use crate::core::product::{ProductDraft, create_product};
    use crate::core::vote::cast_vote;
    use crate::test_utils::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(9.0), "$9.00");
        assert_eq!(format_price(10.154), "$10.15");
        assert_eq!(format_price(f64::NAN), "-");
        assert_eq!(format_price(f64::INFINITY), "-");
    }

    #[test]
    fn test_format_cost_breakdown_printed() {
        let build = pricing::BuildParams::Printed(pricing::PrintBuild::default());
        assert_eq!(
            format_cost_breakdown(&build),
            "Material $3.00 · Time $6.00 · Energy $0.00"
        );
    }

    #[test]
    fn test_format_product_summary() {
        let mut product = sample_product("BO", "V2");
        product.name = "Bô".to_string();
        product.kind = "ordered".to_string();
        product.unit_cost = Some(20.0);
        product.import_per_unit = Some(2.5);

        assert_eq!(format_product_summary(&product), "Bô (V2) [ORD] — cost $22.50");
    }

    #[tokio::test]
    async fn test_dashboard_summary_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let loved = create_product(&db, ProductDraft::new("Bô", ProductKind::Printed)).await?;
        let ignored = create_product(&db, ProductDraft::new("Kama", ProductKind::Printed)).await?;
        let divisive =
            create_product(&db, ProductDraft::new("Boîtier", ProductKind::Ordered)).await?;

        // Both reviewers love one product, split on another, ignore the third
        cast_vote(&db, loved.id, "user_david", "❤️").await?;
        cast_vote(&db, loved.id, "user_guillaume", "❤️").await?;
        cast_vote(&db, divisive.id, "user_david", "👍").await?;
        cast_vote(&db, divisive.id, "user_guillaume", "💀").await?;

        // One pending reminder, one handled
        let date = chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        pipeline::set_reminder(&db, loved.id, date).await?;
        pipeline::set_reminder(&db, ignored.id, date).await?;
        pipeline::complete_reminder(&db, ignored.id).await?;

        let summary = generate_dashboard_summary(&db, 2).await?;

        assert_eq!(summary.total_products, 3);
        assert_eq!(summary.pending_reminders, 1);
        assert_eq!(summary.unanimous_favorites, 1);
        assert_eq!(summary.missing_votes, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_summary_empty_catalog() -> Result<()> {
        let db = setup_test_db().await?;

        let summary = generate_dashboard_summary(&db, 2).await?;
        assert_eq!(
            summary,
            DashboardSummary {
                total_products: 0,
                pending_reminders: 0,
                unanimous_favorites: 0,
                missing_votes: 0,
            }
        );

        Ok(())
    }
}

//! Pipeline business logic - kanban grouping, status moves, and reminders.
//!
//! The board is a pure grouping over the in-memory product list; moving a
//! card only ever persists the status label change, exactly like dropping a
//! card into another column. Reminders are lightweight follow-up dates with
//! a three-bucket urgency scheme.

use crate::{
    core::product::require_active_product,
    entities::product,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Status a fresh product starts in.
pub const DEFAULT_STATUS: &str = "Prototype";

/// Days of slack before a reminder stops counting as "soon".
const SOON_THRESHOLD_DAYS: i64 = 3;

/// Groups products into kanban columns, one per status label in roster
/// order. Empty columns are kept so the board always shows the full
/// pipeline; products with a status outside the roster are not shown.
#[must_use]
pub fn group_by_status<'a>(
    products: &'a [product::Model],
    statuses: &[String],
) -> Vec<(String, Vec<&'a product::Model>)> {
    statuses
        .iter()
        .map(|status| {
            let column: Vec<&product::Model> =
                products.iter().filter(|p| &p.status == status).collect();
            (status.clone(), column)
        })
        .collect()
}

/// Moves a product to another pipeline status.
///
/// The caller is responsible for checking the label against the configured
/// roster; this function just persists the column change.
///
/// # Errors
/// Returns an error if the product does not exist, is deleted, or the
/// database update fails.
pub async fn move_product(
    db: &DatabaseConnection,
    product_id: i64,
    new_status: &str,
) -> Result<product::Model> {
    let existing = require_active_product(db, product_id).await?;
    let mut model: product::ActiveModel = existing.into();

    model.status = Set(new_status.to_string());
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    model.update(db).await.map_err(Into::into)
}

/// Sets (or replaces) a product's follow-up reminder and marks it pending.
///
/// # Errors
/// Returns an error if the product does not exist, is deleted, or the
/// database update fails.
pub async fn set_reminder(
    db: &DatabaseConnection,
    product_id: i64,
    date: NaiveDate,
) -> Result<product::Model> {
    let existing = require_active_product(db, product_id).await?;
    let mut model: product::ActiveModel = existing.into();

    model.reminder_date = Set(Some(date));
    model.reminder_done = Set(false);
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    model.update(db).await.map_err(Into::into)
}

/// Marks a product's reminder as handled.
///
/// # Errors
/// Returns an error if the product does not exist, is deleted, or the
/// database update fails.
pub async fn complete_reminder(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<product::Model> {
    let existing = require_active_product(db, product_id).await?;
    let mut model: product::ActiveModel = existing.into();

    model.reminder_done = Set(true);
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    model.update(db).await.map_err(Into::into)
}

/// How urgently a reminder needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderUrgency {
    /// Due today or already past
    Overdue,
    /// Due within the next few days
    Soon,
    /// Comfortably in the future
    Ok,
}

impl ReminderUrgency {
    /// Traffic-light marker shown next to the reminder.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Overdue => "🔴",
            Self::Soon => "🟠",
            Self::Ok => "🟢",
        }
    }
}

/// Buckets a reminder by how many days remain until it is due.
#[must_use]
pub const fn reminder_urgency(days_until: i64) -> ReminderUrgency {
    if days_until <= 0 {
        ReminderUrgency::Overdue
    } else if days_until <= SOON_THRESHOLD_DAYS {
        ReminderUrgency::Soon
    } else {
        ReminderUrgency::Ok
    }
}

/// Products carrying a reminder, paired with days until due and sorted
/// soonest-first. Handled reminders are included; callers that only care
/// about pending ones filter on `reminder_done`.
#[must_use]
pub fn due_reminders<'a>(
    products: &'a [product::Model],
    today: NaiveDate,
) -> Vec<(&'a product::Model, i64)> {
    let mut due: Vec<(&product::Model, i64)> = products
        .iter()
        .filter_map(|p| {
            p.reminder_date
                .map(|date| (p, date.signed_duration_since(today).num_days()))
        })
        .collect();
    due.sort_by_key(|(_, days)| *days);
    due
}

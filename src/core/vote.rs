//! Vote business logic - casting reviewer reactions and checking unanimity.
//!
//! Each reviewer holds at most one vote per product; casting again simply
//! replaces the emoji. Unanimity feeds the dashboard's "validated by
//! everyone" indicator.

use crate::{
    core::product::require_active_product,
    entities::{Vote, vote},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// The allowed reaction emojis, from most to least enthusiastic.
pub const VOTE_EMOJIS: [&str; 5] = ["❤️", "👍", "😐", "👎", "💀"];

/// Whether `emoji` is one of the allowed reactions.
#[must_use]
pub fn is_valid_emoji(emoji: &str) -> bool {
    VOTE_EMOJIS.contains(&emoji)
}

/// Casts (or replaces) a reviewer's vote on a product.
///
/// # Errors
/// Returns an error if the emoji is not in the allowed set, the product does
/// not exist or is deleted, or the database operation fails.
pub async fn cast_vote(
    db: &DatabaseConnection,
    product_id: i64,
    user_id: &str,
    emoji: &str,
) -> Result<vote::Model> {
    if !is_valid_emoji(emoji) {
        return Err(Error::InvalidVote {
            emoji: emoji.to_string(),
        });
    }

    require_active_product(db, product_id).await?;

    let now = chrono::Utc::now().naive_utc();
    let existing = Vote::find()
        .filter(vote::Column::ProductId.eq(product_id))
        .filter(vote::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    match existing {
        Some(vote) => {
            let mut model: vote::ActiveModel = vote.into();
            model.emoji = Set(emoji.to_string());
            model.updated_at = Set(now);
            model.update(db).await.map_err(Into::into)
        }
        None => {
            let model = vote::ActiveModel {
                product_id: Set(product_id),
                user_id: Set(user_id.to_string()),
                emoji: Set(emoji.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            model.insert(db).await.map_err(Into::into)
        }
    }
}

/// Retrieves all votes for a product, oldest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_votes_for_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<vote::Model>> {
    Vote::find()
        .filter(vote::Column::ProductId.eq(product_id))
        .order_by_asc(vote::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Whether a product is unanimously approved: every configured reviewer has
/// voted, all votes agree, and the shared emoji is ❤️ or 👍. Always false
/// when no reviewers are configured.
#[must_use]
pub fn is_unanimous_approval(emojis: &[String], reviewer_count: usize) -> bool {
    if reviewer_count == 0 || emojis.len() != reviewer_count {
        return false;
    }

    let first = &emojis[0];
    (first == "❤️" || first == "👍") && emojis.iter().all(|e| e == first)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn emojis(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_unanimity_truth_table() {
        // Both reviewers agree on an approving emoji
        assert!(is_unanimous_approval(&emojis(&["❤️", "❤️"]), 2));
        assert!(is_unanimous_approval(&emojis(&["👍", "👍"]), 2));

        // Agreement on a non-approving emoji does not count
        assert!(!is_unanimous_approval(&emojis(&["💀", "💀"]), 2));

        // Mixed approving votes do not count
        assert!(!is_unanimous_approval(&emojis(&["❤️", "👍"]), 2));

        // A missing vote does not count
        assert!(!is_unanimous_approval(&emojis(&["❤️"]), 2));

        // No configured reviewers: never unanimous
        assert!(!is_unanimous_approval(&emojis(&[]), 0));
        assert!(!is_unanimous_approval(&emojis(&["❤️"]), 0));
    }

    #[test]
    fn test_emoji_roster() {
        assert!(is_valid_emoji("❤️"));
        assert!(is_valid_emoji("💀"));
        assert!(!is_valid_emoji("🚀"));
        assert!(!is_valid_emoji(""));
    }

    #[tokio::test]
    async fn test_cast_vote_inserts_then_replaces() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let first = cast_vote(&db, product.id, "user_david", "👍").await?;
        assert_eq!(first.emoji, "👍");

        // Same reviewer changes their mind: still a single row
        let second = cast_vote(&db, product.id, "user_david", "❤️").await?;
        assert_eq!(second.id, first.id);
        assert_eq!(second.emoji, "❤️");

        let votes = get_votes_for_product(&db, product.id).await?;
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].emoji, "❤️");

        // A second reviewer adds their own row
        cast_vote(&db, product.id, "user_guillaume", "❤️").await?;
        let votes = get_votes_for_product(&db, product.id).await?;
        assert_eq!(votes.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_cast_vote_rejects_unknown_emoji() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let result = cast_vote(&db, product.id, "user_david", "🚀").await;
        assert!(matches!(result.unwrap_err(), Error::InvalidVote { emoji: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_cast_vote_requires_existing_product() -> Result<()> {
        let db = setup_test_db().await?;

        let result = cast_vote(&db, 999, "user_david", "👍").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { name: _ }
        ));

        Ok(())
    }
}

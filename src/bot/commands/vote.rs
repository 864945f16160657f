//! Vote Discord commands - casting reactions and viewing tallies.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        config,
        core::{product, vote},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Renders "emoji Name" lines for a product's votes, with the unanimity
    /// banner when the whole roster agrees.
    async fn format_tally(
        db: &sea_orm::DatabaseConnection,
        product_id: i64,
    ) -> Result<String> {
        let votes = vote::get_votes_for_product(db, product_id).await?;

        if votes.is_empty() {
            return Ok("_No votes yet._".to_string());
        }

        let mut tally = String::new();
        let mut emojis = Vec::new();
        for v in &votes {
            let reviewer = config::users::get_nickname(&v.user_id)
                .unwrap_or_else(|| format!("User {}", v.user_id));
            writeln!(&mut tally, "{} {}", v.emoji, reviewer)?;
            emojis.push(v.emoji.clone());
        }

        if vote::is_unanimous_approval(&emojis, config::users::reviewer_count()) {
            tally.push_str("🎉 Unanimously approved!");
        }

        Ok(tally)
    }

    /// Casts (or changes) your vote on a product.
    #[poise::command(slash_command)]
    pub async fn vote(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to vote on"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Your reaction: ❤️ 👍 😐 👎 💀"]
        #[autocomplete = "autocomplete::autocomplete_vote_emoji"]
        emoji: String,
    ) -> Result<()> {
        if !vote::is_valid_emoji(&emoji) {
            ctx.say(format!(
                "❌ '{}' is not a valid vote. Allowed: {}",
                emoji,
                vote::VOTE_EMOJIS.join(" ")
            ))
            .await?;
            return Ok(());
        }

        let db = &ctx.data().database;
        let Some(prod) = product::get_product_by_name(db, &name).await? else {
            ctx.say(format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        let user_id = ctx.author().id.to_string();
        vote::cast_vote(db, prod.id, &user_id, &emoji).await?;

        let tally = format_tally(db, prod.id).await?;
        ctx.say(format!("✅ Vote recorded on **{name}**.\n{tally}"))
            .await?;
        Ok(())
    }

    /// Shows the vote tally for a product.
    #[poise::command(slash_command)]
    pub async fn votes(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(prod) = product::get_product_by_name(db, &name).await? else {
            ctx.say(format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        let tally = format_tally(db, prod.id).await?;
        ctx.say(format!("🗳️ **Votes for {name}**\n{tally}")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

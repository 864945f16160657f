//! Pipeline Discord commands - board, move, reminders, and dashboard.
//!
//! The board renders the kanban columns as embed fields; `/move` is the
//! command-surface version of dragging a card into another column.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        config,
        core::{pipeline, product, report},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Shows the product pipeline as a kanban board, one column per status.
    #[poise::command(slash_command)]
    pub async fn board(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;

        let db = &ctx.data().database;
        let products = product::get_all_active_products(db).await?;
        let columns = pipeline::group_by_status(&products, &ctx.data().presets.statuses);

        let mut embed_fields = Vec::new();
        for (status, column) in &columns {
            let value = if column.is_empty() {
                "—".to_string()
            } else {
                let mut lines = String::new();
                for prod in column {
                    writeln!(&mut lines, "• {} ({})", prod.name, prod.version)?;
                }
                lines
            };
            embed_fields.push((format!("{status} ({})", column.len()), value, true));
        }

        let board_embed = serenity::CreateEmbed::default()
            .title("📦 Product Pipeline")
            .color(0x0058_65F2)
            .fields(embed_fields)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} active product{}",
                products.len(),
                if products.len() == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(board_embed))
            .await?;
        Ok(())
    }

    /// Moves a product to another pipeline status.
    #[poise::command(slash_command, rename = "move")]
    pub async fn move_card(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to move"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Destination status"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: String,
    ) -> Result<()> {
        if !ctx.data().presets.is_known_status(&status) {
            ctx.say(format!(
                "❌ Unknown status '{}'. Configured statuses: {}",
                status,
                ctx.data().presets.statuses.join(", ")
            ))
            .await?;
            return Ok(());
        }

        let db = &ctx.data().database;
        let Some(prod) = product::get_product_by_name(db, &name).await? else {
            ctx.say(format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        if prod.status == status {
            ctx.say(format!("ℹ️ '{name}' is already in '{status}'."))
                .await?;
            return Ok(());
        }

        let moved = pipeline::move_product(db, prod.id, &status).await?;

        ctx.say(format!(
            "✅ Moved **{}** from '{}' to '{}'.",
            moved.name, prod.status, moved.status
        ))
        .await?;
        Ok(())
    }

    /// Parent command for follow-up reminders.
    #[poise::command(
        slash_command,
        subcommands("reminder_set", "reminder_done", "reminder_list")
    )]
    pub async fn reminder(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Reminder command. Available subcommands:\n\
            `/reminder set` - Set a follow-up date on a product\n\
            `/reminder done` - Mark a product's reminder as handled\n\
            `/reminder list` - List all reminders by urgency";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Sets (or replaces) a follow-up reminder on a product.
    #[poise::command(slash_command, rename = "set")]
    pub async fn reminder_set(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Follow-up date, YYYY-MM-DD"] date: String,
    ) -> Result<()> {
        let Ok(date) = chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
            ctx.say("❌ Invalid date. Use the YYYY-MM-DD format, e.g. 2026-09-01.")
                .await?;
            return Ok(());
        };

        let db = &ctx.data().database;
        let Some(prod) = product::get_product_by_name(db, &name).await? else {
            ctx.say(format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        pipeline::set_reminder(db, prod.id, date).await?;

        let today = chrono::Local::now().date_naive();
        let days = date.signed_duration_since(today).num_days();
        let marker = pipeline::reminder_urgency(days).marker();

        ctx.say(format!("✅ {marker} Reminder set on **{name}** for {date}."))
            .await?;
        Ok(())
    }

    /// Marks a product's reminder as handled.
    #[poise::command(slash_command, rename = "done")]
    pub async fn reminder_done(
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

        if prod.reminder_date.is_none() {
            ctx.say(format!("ℹ️ '{name}' has no reminder set.")).await?;
            return Ok(());
        }

        pipeline::complete_reminder(db, prod.id).await?;

        ctx.say(format!("✅ Reminder on **{name}** marked as handled."))
            .await?;
        Ok(())
    }

    /// Lists all reminders, soonest first, with urgency markers.
    #[poise::command(slash_command, rename = "list")]
    pub async fn reminder_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let products = product::get_all_active_products(db).await?;
        let today = chrono::Local::now().date_naive();
        let due = pipeline::due_reminders(&products, today);

        if due.is_empty() {
            ctx.say("No reminders set. Use `/reminder set` to add one!")
                .await?;
            return Ok(());
        }

        let mut response = String::from("⏰ **Reminders**\n\n");
        for (prod, days) in due {
            // prod always carries a date here; due_reminders filtered on it
            let Some(date) = prod.reminder_date else {
                continue;
            };

            if prod.reminder_done {
                writeln!(&mut response, "✅ {date} — {} (handled)", prod.name)?;
                continue;
            }

            let marker = pipeline::reminder_urgency(days).marker();
            let when = if days < 0 {
                format!("{} day{} overdue", -days, if days == -1 { "" } else { "s" })
            } else if days == 0 {
                "due today".to_string()
            } else {
                format!("in {days} day{}", if days == 1 { "" } else { "s" })
            };
            writeln!(&mut response, "{marker} {date} — {} ({when})", prod.name)?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows the global dashboard indicators.
    #[poise::command(slash_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;

        let db = &ctx.data().database;
        let summary =
            report::generate_dashboard_summary(db, config::users::reviewer_count()).await?;

        let embed = serenity::CreateEmbed::default()
            .title("📈 Dashboard")
            .color(0x0034_98DB)
            .field("📦 Products", summary.total_products.to_string(), true)
            .field(
                "📅 Pending reminders",
                summary.pending_reminders.to_string(),
                true,
            )
            .field(
                "❤️ Unanimous favorites",
                summary.unanimous_favorites.to_string(),
                true,
            )
            .field("⚠️ Missing votes", summary.missing_votes.to_string(), true)
            .footer(serenity::CreateEmbedFooter::new("AtelierBuddy v0.1.0"));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

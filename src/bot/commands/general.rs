//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database
//! operations and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't require any database operations.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**AtelierBuddy Help**\n\
        Here is a summary of all available commands.\n\n\
        **Catalog**\n\
        • `/product_manage add|list|show|edit|clone|delete` - Manage the product catalog.\n\
        • `/product_manage print-cost|supplier-cost` - Set cost inputs and preview the cost.\n\
        • `/product_manage price` - Set margin and prices with suggestions.\n\n\
        **Pipeline**\n\
        • `/board` - Show the kanban board.\n\
        • `/move <product> <status>` - Move a product to another column.\n\
        • `/reminder set|done|list` - Track follow-up reminders.\n\
        • `/dashboard` - Global indicators.\n\n\
        **Reviews**\n\
        • `/vote <product> <emoji>` - Cast or change your vote (❤️ 👍 😐 👎 💀).\n\
        • `/votes <product>` - Show a product's vote tally.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

//! Bot layer - Discord-specific interface and command handlers.
//!
//! This module provides the Discord interface for the application, including
//! all slash commands, autocomplete handlers, and bot context management.

/// Discord command implementations (product, pipeline, vote, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::config::presets::Presets;
use crate::errors::{Error, Result};
use sea_orm::DatabaseConnection;
use tracing::info;

/// Shared data available to all bot commands: the database connection and
/// the preset rosters loaded at startup.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Status/filament/color rosters from config.toml
    pub presets: Presets,
}

impl BotData {
    /// Creates a new `BotData` instance. Called once during bot setup.
    #[must_use]
    pub const fn new(database: DatabaseConnection, presets: Presets) -> Self {
        Self { database, presets }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Builds the poise framework, registers the slash commands globally, and
/// runs the Discord client until it disconnects.
///
/// # Errors
/// Returns an error if the client cannot be created or the gateway
/// connection fails.
pub async fn run_bot(
    token: String,
    presets: Presets,
    database: DatabaseConnection,
) -> Result<()> {
    use poise::serenity_prelude as serenity;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::product_manage(),
                commands::board(),
                commands::move_card(),
                commands::reminder(),
                commands::dashboard(),
                commands::vote(),
                commands::votes(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, presets))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .map_err(Error::from)?;

    info!("Starting bot client...");
    client.start().await.map_err(Error::from)
}

//! Binary entry point: loads configuration, prepares the database, and runs
//! the Discord bot.

use atelier_buddy::{bot, config, errors::Result};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load preset rosters (falls back to built-ins without a config.toml)
    let presets = config::presets::load_or_default();
    info!(
        "Loaded presets: {} statuses, {} filaments, {} colors.",
        presets.statuses.len(),
        presets.filaments.len(),
        presets.colors.len()
    );

    // 4. Connect to the database and make sure the tables exist
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;

    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Run the bot. The token is read here, directly before use.
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))?;

    bot::run_bot(token, presets, db).await
}

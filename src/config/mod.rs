/// Database connection and table creation
pub mod database;

/// Preset rosters (statuses, filaments, colors) from config.toml
pub mod presets;

/// Reviewer roster and nicknames from environment variables
pub mod users;

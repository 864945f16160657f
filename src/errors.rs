//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. Expected user
//! mistakes (bad status label, unknown product) get their own variants so the
//! bot layer can turn them into friendly messages; everything else wraps the
//! underlying library error.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem: missing required field, unreadable config file.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what was wrong
        message: String,
    },

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A monetary or numeric field was negative or not a finite number.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending value
        amount: f64,
    },

    /// No active product matched the given name or id.
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// Name (or stringified id) that was looked up
        name: String,
    },

    /// A vote emoji outside the allowed reaction set.
    #[error("Invalid vote emoji: {emoji}")]
    InvalidVote {
        /// The rejected emoji
        emoji: String,
    },

    /// A required environment variable was missing or malformed.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// String formatting failed while building a reply.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error.
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

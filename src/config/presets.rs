//! Preset roster loading from config.toml.
//!
//! The pipeline statuses, filament materials, and color options offered by
//! the bot come from a `[presets]` table in config.toml. The file is optional:
//! when it is missing or unreadable the built-in rosters (the ones the shop
//! started with) are used instead.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Top-level structure of the config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// The preset rosters
    pub presets: Presets,
}

/// Preset rosters for the product form and the pipeline board
#[derive(Debug, Deserialize, Clone)]
pub struct Presets {
    /// Pipeline status labels, in kanban column order
    pub statuses: Vec<String>,
    /// Filament materials offered for printed products
    pub filaments: Vec<String>,
    /// Color options offered for printed products
    pub colors: Vec<String>,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            statuses: [
                "Idée",
                "Prototype",
                "En attente",
                "Validé",
                "Commandé",
                "Production",
                "Commercialisé",
            ]
            .map(String::from)
            .to_vec(),
            filaments: ["PLA", "PETG", "ABS", "TPU"].map(String::from).to_vec(),
            colors: ["Noir", "Blanc", "Rouge", "Bleu", "Vert", "Gris", "Or", "Argent"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Presets {
    /// Whether `status` is one of the configured pipeline labels.
    #[must_use]
    pub fn is_known_status(&self, status: &str) -> bool {
        self.statuses.iter().any(|s| s == status)
    }
}

/// Loads the preset configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads presets from ./config.toml, falling back to the built-in rosters
/// when the file is missing or malformed.
#[must_use]
pub fn load_or_default() -> Presets {
    match load_config("config.toml") {
        Ok(config) => config.presets,
        Err(e) => {
            tracing::warn!("Using built-in presets: {e}");
            Presets::default()
        }
    }
}

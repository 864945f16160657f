//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as
//! autocomplete suggestions for command parameters.

/// Autocomplete handlers for product names, statuses, presets, and emojis
pub mod autocomplete;

//! Autocomplete handlers for Discord slash command parameters.
//!
//! These handlers suggest valid options as the user types: product names
//! from the catalog, statuses and materials from the configured presets,
//! and folders/tags already in use (so the catalog's vocabulary stays
//! consistent without being enforced).

use crate::{
    bot::BotData,
    core::{product, vote},
    errors::Error,
};

/// Filters a list of owned strings down to the 25 Discord allows,
/// case-insensitively, and sorts for a stable dropdown.
fn filter_choices(choices: impl IntoIterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = choices
        .into_iter()
        .filter(|choice| choice.to_lowercase().contains(&partial_lower))
        .take(25)
        .collect();
    matching.sort();
    matching.dedup();
    matching
}

/// Suggests active product names matching the partial input.
pub async fn autocomplete_product_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(products) = product::get_all_active_products(db).await else {
        return Vec::new();
    };

    filter_choices(products.into_iter().map(|p| p.name), partial)
}

/// Suggests pipeline status labels from the configured roster.
pub async fn autocomplete_status(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_choices(ctx.data().presets.statuses.iter().cloned(), partial)
}

/// Suggests the two product kinds.
pub async fn autocomplete_kind(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_choices(["printed", "ordered"].map(String::from), partial)
}

/// Suggests filament materials from the configured roster.
pub async fn autocomplete_filament(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_choices(ctx.data().presets.filaments.iter().cloned(), partial)
}

/// Suggests colors from the configured roster.
pub async fn autocomplete_color(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_choices(ctx.data().presets.colors.iter().cloned(), partial)
}

/// Suggests folders already used by existing products.
pub async fn autocomplete_folder(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(products) = product::get_all_active_products(db).await else {
        return Vec::new();
    };

    filter_choices(products.into_iter().filter_map(|p| p.folder), partial)
}

/// Suggests tags already used by existing products.
pub async fn autocomplete_tag(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(products) = product::get_all_active_products(db).await else {
        return Vec::new();
    };

    filter_choices(
        products
            .iter()
            .flat_map(|p| product::parse_tags(&p.tags)),
        partial,
    )
}

/// Suggests the allowed vote emojis.
pub async fn autocomplete_vote_emoji(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    vote::VOTE_EMOJIS
        .iter()
        .filter(|emoji| partial.is_empty() || emoji.contains(partial))
        .map(ToString::to_string)
        .collect()
}

//! Product Discord commands - the `/product_manage` subcommand tree.
//!
//! Catalog CRUD plus the cost and price helpers. The cost subcommands reply
//! with the freshly recomputed cost and price suggestions, which is the
//! command-surface version of the old form's live preview.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            catalog::ProductKind,
            pricing::{self, PrintBuild, SupplierBuild},
            product, report,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Looks up an active product by name, replying with a ❌ message and
    /// returning `None` when it does not exist.
    async fn find_product_or_reply(
        ctx: poise::Context<'_, BotData, Error>,
        name: &str,
    ) -> Result<Option<crate::entities::product::Model>> {
        let product = product::get_product_by_name(&ctx.data().database, name).await?;
        if product.is_none() {
            ctx.say(format!("❌ Product '{name}' not found.")).await?;
        }
        Ok(product)
    }

    /// Builds the cost + suggestion lines shown after a cost or price change.
    fn cost_preview(product: &crate::entities::product::Model) -> String {
        let build = product::build_params(product);
        let cost = pricing::compute_cost(&build);
        let retail = pricing::suggested_retail(cost, product.margin);
        let reseller = pricing::suggested_reseller(retail, product.reseller_discount);

        format!(
            "{}\n**Cost:** {}\nHint: {} × (1 + {:.0}%) = {} retail · − {:.0}% = {} reseller",
            report::format_cost_breakdown(&build),
            report::format_price(cost),
            report::format_price(cost),
            product.margin * 100.0,
            report::format_price(retail),
            product.reseller_discount * 100.0,
            report::format_price(reseller),
        )
    }

    /// Parent command for managing the product catalog.
    ///
    /// Groups subcommands for adding, listing, inspecting, editing, costing,
    /// pricing, cloning, and deleting products.
    #[poise::command(
        slash_command,
        subcommands(
            "product_add",
            "product_list",
            "product_show",
            "product_edit",
            "product_print_cost",
            "product_supplier_cost",
            "product_price",
            "product_clone",
            "product_delete"
        )
    )]
    pub async fn product_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Product management command. Available subcommands:\n\
            `/product_manage add` - Add a new product\n\
            `/product_manage list` - List products (with optional filters)\n\
            `/product_manage show` - Show one product in detail\n\
            `/product_manage edit` - Edit identity and detail fields\n\
            `/product_manage print-cost` - Set 3D printing cost inputs\n\
            `/product_manage supplier-cost` - Set supplier cost inputs\n\
            `/product_manage price` - Set margin and prices\n\
            `/product_manage clone` - Clone a product as the next version\n\
            `/product_manage delete` - Delete a product";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new product to the catalog.
    ///
    /// The code is derived from the name, kind, and today's date when left
    /// blank, and the version defaults to the next one for that code. Both
    /// are suggestions and can be overridden here or edited later.
    #[poise::command(slash_command, rename = "add")]
    pub async fn product_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product name (e.g., 'Boîte protège-dents')"] name: String,
        #[description = "printed (made in-house) or ordered (from a supplier)"]
        #[autocomplete = "autocomplete::autocomplete_kind"]
        kind: String,
        #[description = "Family code / SKU (derived automatically if blank)"] code: Option<String>,
        #[description = "Version label, e.g. V1 (suggested automatically if blank)"]
        version: Option<String>,
        #[description = "Pipeline status (default: Prototype)"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: Option<String>,
        #[description = "Short description"] description: Option<String>,
        #[description = "Folder to group related products"]
        #[autocomplete = "autocomplete::autocomplete_folder"]
        folder: Option<String>,
        #[description = "Comma-separated tags (e.g., 'armes, rangement')"]
        #[autocomplete = "autocomplete::autocomplete_tag"]
        tags: Option<String>,
        #[description = "Who is filling in this record"] author: Option<String>,
    ) -> Result<()> {
        let Some(kind) = ProductKind::parse(&kind) else {
            ctx.say("❌ Kind must be either `printed` or `ordered`.")
                .await?;
            return Ok(());
        };

        if let Some(ref status) = status {
            if !ctx.data().presets.is_known_status(status) {
                ctx.say(format!(
                    "❌ Unknown status '{}'. Configured statuses: {}",
                    status,
                    ctx.data().presets.statuses.join(", ")
                ))
                .await?;
                return Ok(());
            }
        }

        let mut draft = product::ProductDraft::new(name.clone(), kind);
        draft.code = code;
        draft.version = version;
        if let Some(status) = status {
            draft.status = status;
        }
        if let Some(description) = description {
            draft.description = description;
        }
        draft.folder = folder;
        draft.tags = tags.as_deref().map(product::parse_tags).unwrap_or_default();
        draft.author = author;

        let db = &ctx.data().database;
        match product::create_product(db, draft).await {
            Ok(created) => {
                let mut message = format!(
                    "✅ Product **{}** saved as `{}` ({}).\n{}",
                    created.name,
                    created.code,
                    created.version,
                    cost_preview(&created),
                );

                // Codes are suggestions, not guarantees: point out collisions
                // instead of refusing them.
                let twins = product::get_all_active_products(db)
                    .await?
                    .into_iter()
                    .filter(|p| {
                        p.id != created.id && p.code == created.code && p.version == created.version
                    })
                    .count();
                if twins > 0 {
                    write!(
                        &mut message,
                        "\n⚠️ {twins} other product(s) already use `{}` {} - consider adjusting the code or version.",
                        created.code, created.version
                    )?;
                }

                ctx.say(message).await?;
            }
            Err(Error::Config { message }) => {
                ctx.say(format!("❌ {message}.")).await?;
            }
            Err(Error::InvalidAmount { amount }) => {
                ctx.say(format!("❌ Invalid amount: {amount}")).await?;
            }
            Err(e) => {
                ctx.say(format!("❌ Failed to add product '{name}'. Please try again later."))
                    .await?;
                return Err(e);
            }
        }

        Ok(())
    }

    /// Lists products, optionally filtered by kind and a search over
    /// name, code, description, and tags.
    #[poise::command(slash_command, rename = "list")]
    pub async fn product_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show this kind (printed or ordered)"]
        #[autocomplete = "autocomplete::autocomplete_kind"]
        kind: Option<String>,
        #[description = "Search text (name, code, description, tags)"] query: Option<String>,
    ) -> Result<()> {
        let kind_filter = match kind.as_deref() {
            None => None,
            Some(raw) => match ProductKind::parse(raw) {
                Some(parsed) => Some(parsed),
                None => {
                    ctx.say("❌ Kind must be either `printed` or `ordered`.")
                        .await?;
                    return Ok(());
                }
            },
        };

        let db = &ctx.data().database;
        let products = product::search_products(db, kind_filter, query.as_deref()).await?;

        if products.is_empty() {
            ctx.say("No products match. Use `/product_manage add` to create one!")
                .await?;
            return Ok(());
        }

        let total = products.len();
        let mut embed_fields = Vec::new();
        for prod in products.into_iter().take(25) {
            let field_name = report::format_product_summary(&prod);
            let field_value = format!("`{}` · {}", prod.code, prod.status);
            embed_fields.push((field_name, field_value, false));
        }

        let list_embed = serenity::CreateEmbed::default()
            .title("**Product Catalog**")
            .color(0x0058_65F2)
            .fields(embed_fields)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{total} product{} (showing up to 25)",
                if total == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }

    /// Shows one product in full detail, including the recomputed cost.
    #[poise::command(slash_command, rename = "show")]
    pub async fn product_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to show"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
    ) -> Result<()> {
        let Some(prod) = find_product_or_reply(ctx, &name).await? else {
            return Ok(());
        };

        let kind = ProductKind::from_stored(&prod.kind);
        let mut details = String::new();
        writeln!(&mut details, "**Code:** `{}` · **Version:** {}", prod.code, prod.version)?;
        writeln!(&mut details, "**Kind:** {} · **Status:** {}", kind.as_str(), prod.status)?;
        if !prod.description.is_empty() {
            writeln!(&mut details, "**Description:** {}", prod.description)?;
        }
        if let Some(ref folder) = prod.folder {
            writeln!(&mut details, "**Folder:** {folder}")?;
        }
        if !prod.tags.is_empty() {
            writeln!(&mut details, "**Tags:** {}", prod.tags)?;
        }
        if let Some(ref author) = prod.author {
            writeln!(&mut details, "**Author:** {author}")?;
        }
        if prod.weight_grams > 0.0 {
            writeln!(&mut details, "**Weight:** {} g", prod.weight_grams)?;
        }
        if let Some(ref dimensions) = prod.dimensions {
            writeln!(&mut details, "**Dimensions:** {dimensions}")?;
        }
        match kind {
            ProductKind::Printed => {
                if let (Some(filament), Some(color)) = (&prod.filament_type, &prod.color) {
                    writeln!(&mut details, "**Filament:** {filament} ({color})")?;
                }
            }
            ProductKind::Ordered => {
                if let Some(ref supplier) = prod.supplier {
                    writeln!(&mut details, "**Supplier:** {supplier}")?;
                }
                if let Some(moq) = prod.moq {
                    writeln!(&mut details, "**MOQ:** {moq}")?;
                }
                if let Some(ref lead_time) = prod.lead_time {
                    writeln!(&mut details, "**Lead time:** {lead_time}")?;
                }
            }
        }
        if let Some(date) = prod.reminder_date {
            let state = if prod.reminder_done { "handled" } else { "pending" };
            writeln!(&mut details, "**Reminder:** {date} ({state})")?;
        }

        let pricing_block = format!(
            "{}\n**Retail:** {} · **Reseller:** {}",
            cost_preview(&prod),
            report::format_price(prod.retail_price),
            report::format_price(prod.reseller_price),
        );

        let embed = serenity::CreateEmbed::default()
            .title(format!("{} ({})", prod.name, prod.version))
            .color(0x0058_65F2)
            .field("Details", details, false)
            .field("Pricing", pricing_block, false);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Edits a product's identity and detail fields. Only the provided
    /// fields change.
    #[poise::command(slash_command, rename = "edit")]
    #[allow(clippy::too_many_arguments)]
    pub async fn product_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to edit"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "New name"] new_name: Option<String>,
        #[description = "New description"] description: Option<String>,
        #[description = "New pipeline status"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: Option<String>,
        #[description = "New folder"]
        #[autocomplete = "autocomplete::autocomplete_folder"]
        folder: Option<String>,
        #[description = "New comma-separated tags (replaces the old list)"]
        #[autocomplete = "autocomplete::autocomplete_tag"]
        tags: Option<String>,
        #[description = "New author"] author: Option<String>,
        #[description = "New weight in grams"] weight_grams: Option<f64>,
        #[description = "New dimensions (e.g., '120×80×45 mm')"] dimensions: Option<String>,
    ) -> Result<()> {
        if new_name.is_none()
            && description.is_none()
            && status.is_none()
            && folder.is_none()
            && tags.is_none()
            && author.is_none()
            && weight_grams.is_none()
            && dimensions.is_none()
        {
            ctx.say("❌ Please specify at least one field to change.")
                .await?;
            return Ok(());
        }

        if let Some(ref status) = status {
            if !ctx.data().presets.is_known_status(status) {
                ctx.say(format!(
                    "❌ Unknown status '{}'. Configured statuses: {}",
                    status,
                    ctx.data().presets.statuses.join(", ")
                ))
                .await?;
                return Ok(());
            }
        }

        let Some(prod) = find_product_or_reply(ctx, &name).await? else {
            return Ok(());
        };

        let mut draft = product::draft_from_model(&prod);
        let mut changes = Vec::new();

        if let Some(new_name) = new_name {
            changes.push(format!("name to '{new_name}'"));
            draft.name = new_name;
        }
        if let Some(description) = description {
            changes.push("description".to_string());
            draft.description = description;
        }
        if let Some(status) = status {
            changes.push(format!("status to '{status}'"));
            draft.status = status;
        }
        if let Some(folder) = folder {
            changes.push(format!("folder to '{folder}'"));
            draft.folder = Some(folder);
        }
        if let Some(ref tags_text) = tags {
            changes.push("tags".to_string());
            draft.tags = product::parse_tags(tags_text);
        }
        if let Some(author) = author {
            changes.push(format!("author to '{author}'"));
            draft.author = Some(author);
        }
        if let Some(weight) = weight_grams {
            changes.push(format!("weight to {weight} g"));
            draft.weight_grams = weight;
        }
        if let Some(dimensions) = dimensions {
            changes.push(format!("dimensions to '{dimensions}'"));
            draft.dimensions = Some(dimensions);
        }

        product::update_product(&ctx.data().database, prod.id, draft).await?;

        ctx.say(format!(
            "✅ Updated product **{}**: {}",
            name,
            changes.join(", ")
        ))
        .await?;
        Ok(())
    }

    /// Sets the 3D printing cost inputs and shows the recomputed cost.
    ///
    /// No input validation beyond the product's kind: the calculator treats
    /// malformed numbers as zero so a wrong value only produces a wrong
    /// suggestion, never an error.
    #[poise::command(slash_command, rename = "print-cost")]
    #[allow(clippy::too_many_arguments)]
    pub async fn product_print_cost(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the printed product"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Grams of filament per unit"] grams_used: f64,
        #[description = "Spool cost per kg"] spool_cost_per_kg: f64,
        #[description = "Print time per unit, in hours"] print_hours: f64,
        #[description = "Machine rate in $/h"] machine_rate: f64,
        #[description = "Labor rate in $/h (default 0)"] labor_rate: Option<f64>,
        #[description = "Electricity per unit in kWh (default 0)"] energy_kwh: Option<f64>,
        #[description = "Filament material"]
        #[autocomplete = "autocomplete::autocomplete_filament"]
        filament: Option<String>,
        #[description = "Filament color"]
        #[autocomplete = "autocomplete::autocomplete_color"]
        color: Option<String>,
    ) -> Result<()> {
        let Some(prod) = find_product_or_reply(ctx, &name).await? else {
            return Ok(());
        };

        if ProductKind::from_stored(&prod.kind) != ProductKind::Printed {
            ctx.say(format!(
                "❌ '{name}' is a supplier-ordered product. Use `/product_manage supplier-cost` instead."
            ))
            .await?;
            return Ok(());
        }

        let mut draft = product::draft_from_model(&prod);
        draft.print_build = Some(PrintBuild {
            grams_used,
            spool_cost_per_kg,
            print_hours,
            machine_rate,
            labor_rate: labor_rate.unwrap_or(0.0),
            energy_kwh: energy_kwh.unwrap_or(0.0),
        });
        if filament.is_some() {
            draft.filament_type = filament;
        }
        if color.is_some() {
            draft.color = color;
        }

        let updated = product::update_product(&ctx.data().database, prod.id, draft).await?;

        ctx.say(format!(
            "✅ Print cost updated for **{}**.\n{}",
            updated.name,
            cost_preview(&updated)
        ))
        .await?;
        Ok(())
    }

    /// Sets the supplier cost inputs and shows the recomputed cost.
    #[poise::command(slash_command, rename = "supplier-cost")]
    #[allow(clippy::too_many_arguments)]
    pub async fn product_supplier_cost(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the ordered product"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Supplier unit cost"] unit_cost: f64,
        #[description = "Import fees per unit"] import_per_unit: f64,
        #[description = "Customization cost per unit (default 0)"] customization_cost: Option<f64>,
        #[description = "Supplier name"] supplier: Option<String>,
        #[description = "Supplier contact"] supplier_contact: Option<String>,
        #[description = "Minimum order quantity"] moq: Option<i64>,
        #[description = "Lead time (e.g., '30 jours')"] lead_time: Option<String>,
    ) -> Result<()> {
        let Some(prod) = find_product_or_reply(ctx, &name).await? else {
            return Ok(());
        };

        if ProductKind::from_stored(&prod.kind) != ProductKind::Ordered {
            ctx.say(format!(
                "❌ '{name}' is a printed product. Use `/product_manage print-cost` instead."
            ))
            .await?;
            return Ok(());
        }

        let mut draft = product::draft_from_model(&prod);
        draft.supplier_build = Some(SupplierBuild {
            unit_cost,
            import_per_unit,
            customization_cost: customization_cost.unwrap_or(0.0),
        });
        if supplier.is_some() {
            draft.supplier = supplier;
        }
        if supplier_contact.is_some() {
            draft.supplier_contact = supplier_contact;
        }
        if moq.is_some() {
            draft.moq = moq;
        }
        if lead_time.is_some() {
            draft.lead_time = lead_time;
        }

        let updated = product::update_product(&ctx.data().database, prod.id, draft).await?;

        ctx.say(format!(
            "✅ Supplier cost updated for **{}**.\n{}",
            updated.name,
            cost_preview(&updated)
        ))
        .await?;
        Ok(())
    }

    /// Sets the margin, discount, and manually chosen prices.
    #[poise::command(slash_command, rename = "price")]
    pub async fn product_price(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Retail price you want to charge"] retail_price: Option<f64>,
        #[description = "Reseller price you want to charge"] reseller_price: Option<f64>,
        #[description = "Target margin in percent (e.g., 45)"] margin_percent: Option<f64>,
        #[description = "Reseller discount in percent (e.g., 30)"] reseller_discount_percent: Option<f64>,
    ) -> Result<()> {
        if retail_price.is_none()
            && reseller_price.is_none()
            && margin_percent.is_none()
            && reseller_discount_percent.is_none()
        {
            ctx.say("❌ Please specify at least one field to change.")
                .await?;
            return Ok(());
        }

        for value in [retail_price, reseller_price, margin_percent, reseller_discount_percent]
            .into_iter()
            .flatten()
        {
            if !value.is_finite() || value < 0.0 {
                ctx.say(format!("❌ Invalid amount: {value}")).await?;
                return Ok(());
            }
        }

        let Some(prod) = find_product_or_reply(ctx, &name).await? else {
            return Ok(());
        };

        let mut draft = product::draft_from_model(&prod);
        if let Some(retail) = retail_price {
            draft.retail_price = retail;
        }
        if let Some(reseller) = reseller_price {
            draft.reseller_price = reseller;
        }
        if let Some(margin) = margin_percent {
            draft.margin = margin / 100.0;
        }
        if let Some(discount) = reseller_discount_percent {
            draft.reseller_discount = discount / 100.0;
        }

        let updated = product::update_product(&ctx.data().database, prod.id, draft).await?;

        ctx.say(format!(
            "✅ Pricing updated for **{}**.\n{}\n**Retail:** {} · **Reseller:** {}",
            updated.name,
            cost_preview(&updated),
            report::format_price(updated.retail_price),
            report::format_price(updated.reseller_price),
        ))
        .await?;
        Ok(())
    }

    /// Clones a product as a new draft of the next version.
    ///
    /// Every field is copied; the version is bumped to the next one for the
    /// family code, and the author and reminder start fresh.
    #[poise::command(slash_command, rename = "clone")]
    pub async fn product_clone(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to clone"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Name for the new product (defaults to the source name)"]
        new_name: Option<String>,
    ) -> Result<()> {
        let Some(source) = find_product_or_reply(ctx, &name).await? else {
            return Ok(());
        };

        let db = &ctx.data().database;
        let existing = product::get_all_active_products(db).await?;
        let mut draft = product::clone_draft(&source, &existing);
        if let Some(new_name) = new_name {
            draft.name = new_name;
        }

        let created = product::create_product(db, draft).await?;

        ctx.say(format!(
            "✅ Cloned **{}** ({}) → **{}** ({}) under code `{}`.",
            source.name, source.version, created.name, created.version, created.code
        ))
        .await?;
        Ok(())
    }

    /// Deletes a product from the catalog (soft delete - votes and history
    /// are preserved).
    #[poise::command(slash_command, rename = "delete")]
    pub async fn product_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to delete"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
    ) -> Result<()> {
        let Some(prod) = find_product_or_reply(ctx, &name).await? else {
            return Ok(());
        };

        match product::delete_product(&ctx.data().database, prod.id).await {
            Ok(_) => {
                ctx.say(format!("✅ Product '{name}' has been deleted."))
                    .await?;
            }
            Err(e) => {
                ctx.say(format!("❌ Failed to delete product '{name}'."))
                    .await?;
                return Err(e);
            }
        }

        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

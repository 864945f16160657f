//! Product business logic - drafts, CRUD, cloning, and catalog filtering.
//!
//! A [`ProductDraft`] is the single immutable value that a form submission or
//! clone produces; creating or updating a product applies a whole draft at
//! once instead of mutating fields one by one. Code and version suggestions
//! are filled in at creation time from the calculator helpers. All functions
//! are async and return Result types for proper error handling.

use crate::{
    core::{
        catalog::{self, ProductKind},
        pricing::{self, BuildParams, PrintBuild, SupplierBuild},
    },
    entities::{Product, product},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Everything a form submission carries for one product.
///
/// `code` and `version` are optional: blank values are filled in with the
/// derived code and the next version for that code when the draft is saved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    /// Printed in-house or ordered from a supplier
    pub kind: ProductKind,
    /// Display name (required, validated on save)
    pub name: String,
    /// Family code; None or blank means "derive one"
    pub code: Option<String>,
    /// Version label; None or blank means "suggest the next one"
    pub version: Option<String>,
    /// Free-form description
    pub description: String,
    /// Pipeline status label
    pub status: String,
    /// Optional grouping folder
    pub folder: Option<String>,
    /// Tag list (stored comma-separated)
    pub tags: Vec<String>,
    /// Who filled in the record
    pub author: Option<String>,
    /// Finished-product weight in grams
    pub weight_grams: f64,
    /// Free-form dimensions string
    pub dimensions: Option<String>,
    /// Filament material, printed products only
    pub filament_type: Option<String>,
    /// Filament color, printed products only
    pub color: Option<String>,
    /// Cost inputs for printed products
    pub print_build: Option<PrintBuild>,
    /// Supplier name, ordered products only
    pub supplier: Option<String>,
    /// Supplier contact details
    pub supplier_contact: Option<String>,
    /// Cost inputs for ordered products
    pub supplier_build: Option<SupplierBuild>,
    /// Minimum order quantity
    pub moq: Option<i64>,
    /// Supplier lead time
    pub lead_time: Option<String>,
    /// Target margin for the retail suggestion
    pub margin: f64,
    /// Manually entered retail price
    pub retail_price: f64,
    /// Manually entered reseller price
    pub reseller_price: f64,
    /// Discount off retail for the reseller suggestion
    pub reseller_discount: f64,
    /// Optional follow-up date
    pub reminder_date: Option<NaiveDate>,
}

impl ProductDraft {
    /// A blank form for the given name and kind, pre-filled the way the
    /// product form starts out: default build parameters for the kind,
    /// default margin and reseller discount, status "Prototype".
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ProductKind) -> Self {
        Self {
            kind,
            name: name.into(),
            code: None,
            version: None,
            description: String::new(),
            status: crate::core::pipeline::DEFAULT_STATUS.to_string(),
            folder: None,
            tags: Vec::new(),
            author: None,
            weight_grams: 0.0,
            dimensions: None,
            filament_type: matches!(kind, ProductKind::Printed).then(|| "PLA".to_string()),
            color: matches!(kind, ProductKind::Printed).then(|| "Noir".to_string()),
            print_build: matches!(kind, ProductKind::Printed).then(PrintBuild::default),
            supplier: None,
            supplier_contact: None,
            supplier_build: matches!(kind, ProductKind::Ordered).then(SupplierBuild::default),
            moq: None,
            lead_time: None,
            margin: pricing::DEFAULT_MARGIN,
            retail_price: 0.0,
            reseller_price: 0.0,
            reseller_discount: pricing::DEFAULT_RESELLER_DISCOUNT,
            reminder_date: None,
        }
    }
}

/// Rebuilds an editable draft from a stored product.
///
/// Missing build columns fall back to the blank-form defaults for printed
/// products and to zero for ordered ones, so old records open cleanly in
/// the edit flow.
#[must_use]
pub fn draft_from_model(source: &product::Model) -> ProductDraft {
    let kind = ProductKind::from_stored(&source.kind);
    let print_defaults = PrintBuild::default();

    let print_build = matches!(kind, ProductKind::Printed).then(|| PrintBuild {
        grams_used: source.grams_used.unwrap_or(print_defaults.grams_used),
        spool_cost_per_kg: source
            .spool_cost_per_kg
            .unwrap_or(print_defaults.spool_cost_per_kg),
        print_hours: source.print_hours.unwrap_or(print_defaults.print_hours),
        machine_rate: source.machine_rate.unwrap_or(print_defaults.machine_rate),
        labor_rate: source.labor_rate.unwrap_or(print_defaults.labor_rate),
        energy_kwh: source.energy_kwh.unwrap_or(print_defaults.energy_kwh),
    });

    let supplier_build = matches!(kind, ProductKind::Ordered).then(|| SupplierBuild {
        unit_cost: source.unit_cost.unwrap_or(0.0),
        import_per_unit: source.import_per_unit.unwrap_or(0.0),
        customization_cost: source.customization_cost.unwrap_or(0.0),
    });

    ProductDraft {
        kind,
        name: source.name.clone(),
        code: Some(source.code.clone()),
        version: Some(source.version.clone()),
        description: source.description.clone(),
        status: source.status.clone(),
        folder: source.folder.clone(),
        tags: parse_tags(&source.tags),
        author: source.author.clone(),
        weight_grams: source.weight_grams,
        dimensions: source.dimensions.clone(),
        filament_type: source.filament_type.clone(),
        color: source.color.clone(),
        print_build,
        supplier: source.supplier.clone(),
        supplier_contact: source.supplier_contact.clone(),
        supplier_build,
        moq: source.moq,
        lead_time: source.lead_time.clone(),
        margin: source.margin,
        retail_price: source.retail_price,
        reseller_price: source.reseller_price,
        reseller_discount: source.reseller_discount,
        reminder_date: source.reminder_date,
    }
}

/// Builds a new-product draft seeded from an existing product.
///
/// Copies every field, keeps the family code, and suggests the next version
/// from the products already sharing that code. The author and the reminder
/// are cleared - they belong to the new record, not the old one.
#[must_use]
pub fn clone_draft(source: &product::Model, existing: &[product::Model]) -> ProductDraft {
    let mut draft = draft_from_model(source);
    draft.version = Some(catalog::next_version(existing, &source.code));
    draft.author = None;
    draft.reminder_date = None;
    draft
}

/// Assembles the kind-specific cost inputs stored on a product row.
/// Missing columns count as zero.
#[must_use]
pub fn build_params(product: &product::Model) -> BuildParams {
    match ProductKind::from_stored(&product.kind) {
        ProductKind::Printed => BuildParams::Printed(PrintBuild {
            grams_used: product.grams_used.unwrap_or(0.0),
            spool_cost_per_kg: product.spool_cost_per_kg.unwrap_or(0.0),
            print_hours: product.print_hours.unwrap_or(0.0),
            machine_rate: product.machine_rate.unwrap_or(0.0),
            labor_rate: product.labor_rate.unwrap_or(0.0),
            energy_kwh: product.energy_kwh.unwrap_or(0.0),
        }),
        ProductKind::Ordered => BuildParams::Ordered(SupplierBuild {
            unit_cost: product.unit_cost.unwrap_or(0.0),
            import_per_unit: product.import_per_unit.unwrap_or(0.0),
            customization_cost: product.customization_cost.unwrap_or(0.0),
        }),
    }
}

/// The cost of record: recomputed from the stored build columns on every
/// read, never persisted.
#[must_use]
pub fn current_cost(product: &product::Model) -> f64 {
    pricing::compute_cost(&build_params(product))
}

/// Splits a comma-separated tag string into trimmed, non-empty tags.
#[must_use]
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Joins tags back into the stored comma-separated form.
#[must_use]
pub fn format_tags(tags: &[String]) -> String {
    tags.join(", ")
}

fn nonblank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn validate_draft(draft: &ProductDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    for amount in [
        draft.margin,
        draft.retail_price,
        draft.reseller_price,
        draft.reseller_discount,
    ] {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount { amount });
        }
    }

    Ok(())
}

/// Writes every draft-editable field into the active model. Code, version,
/// and lifecycle columns are handled by the callers.
fn apply_draft(model: &mut product::ActiveModel, draft: &ProductDraft) {
    let print = draft.print_build.as_ref();
    let order = draft.supplier_build.as_ref();

    model.kind = Set(draft.kind.as_str().to_string());
    model.name = Set(draft.name.trim().to_string());
    model.description = Set(draft.description.clone());
    model.status = Set(draft.status.clone());
    model.folder = Set(draft.folder.clone());
    model.tags = Set(format_tags(&draft.tags));
    model.author = Set(draft.author.clone());
    model.weight_grams = Set(draft.weight_grams);
    model.dimensions = Set(draft.dimensions.clone());

    model.filament_type = Set(draft.filament_type.clone());
    model.color = Set(draft.color.clone());
    model.grams_used = Set(print.map(|p| p.grams_used));
    model.spool_cost_per_kg = Set(print.map(|p| p.spool_cost_per_kg));
    model.print_hours = Set(print.map(|p| p.print_hours));
    model.machine_rate = Set(print.map(|p| p.machine_rate));
    model.labor_rate = Set(print.map(|p| p.labor_rate));
    model.energy_kwh = Set(print.map(|p| p.energy_kwh));

    model.supplier = Set(draft.supplier.clone());
    model.supplier_contact = Set(draft.supplier_contact.clone());
    model.unit_cost = Set(order.map(|o| o.unit_cost));
    model.import_per_unit = Set(order.map(|o| o.import_per_unit));
    model.customization_cost = Set(order.map(|o| o.customization_cost));
    model.moq = Set(draft.moq);
    model.lead_time = Set(draft.lead_time.clone());

    model.margin = Set(draft.margin);
    model.retail_price = Set(draft.retail_price);
    model.reseller_price = Set(draft.reseller_price);
    model.reseller_discount = Set(draft.reseller_discount);
    model.reminder_date = Set(draft.reminder_date);
}

/// Creates a new product from a draft.
///
/// Fills in a derived code (from the name, kind, and today's date) when the
/// draft has none, and suggests the next version for that code when the
/// draft has none.
///
/// # Errors
/// Returns an error if the name is empty, a price field is negative or not
/// finite, or the database insert fails.
pub async fn create_product(
    db: &DatabaseConnection,
    draft: ProductDraft,
) -> Result<product::Model> {
    validate_draft(&draft)?;

    let code = nonblank(draft.code.as_deref()).unwrap_or_else(|| {
        catalog::derive_code(&draft.name, draft.kind, chrono::Local::now().date_naive())
    });

    let version = match nonblank(draft.version.as_deref()) {
        Some(version) => version,
        None => {
            let existing = get_all_active_products(db).await?;
            catalog::next_version(&existing, &code)
        }
    };

    let now = chrono::Utc::now().naive_utc();
    let mut model = product::ActiveModel {
        code: Set(code),
        version: Set(version),
        reminder_done: Set(false),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    apply_draft(&mut model, &draft);

    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all active (non-deleted) products, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_active_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::IsDeleted.eq(false))
        .order_by_desc(product::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a product by its display name, returning None if not found or
/// deleted.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name))
        .filter(product::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like [`get_product_by_id`] but treats missing and soft-deleted rows as an
/// error, for operations that need an existing product.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] for missing or deleted products.
pub async fn require_active_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<product::Model> {
    let product = get_product_by_id(db, product_id)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;

    if product.is_deleted {
        return Err(Error::ProductNotFound {
            name: product_id.to_string(),
        });
    }

    Ok(product)
}

/// Replaces a product's editable fields with the given draft.
///
/// A blank code or version in the draft leaves the stored value untouched.
///
/// # Errors
/// Returns an error if the draft fails validation, the product does not
/// exist or is deleted, or the database update fails.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    draft: ProductDraft,
) -> Result<product::Model> {
    validate_draft(&draft)?;

    let existing = require_active_product(db, product_id).await?;
    let mut model: product::ActiveModel = existing.into();
    apply_draft(&mut model, &draft);

    if let Some(code) = nonblank(draft.code.as_deref()) {
        model.code = Set(code);
    }
    if let Some(version) = nonblank(draft.version.as_deref()) {
        model.version = Set(version);
    }
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    model.update(db).await.map_err(Into::into)
}

/// Soft deletes a product, preserving its row and votes.
///
/// # Errors
/// Returns an error if the product does not exist, is already deleted, or
/// the database update fails.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let existing = require_active_product(db, product_id).await?;
    let mut model: product::ActiveModel = existing.into();

    model.is_deleted = Set(true);
    model.updated_at = Set(chrono::Utc::now().naive_utc());

    model.update(db).await.map_err(Into::into)
}

/// Catalog filter: kind equality plus a case-insensitive substring search
/// over name, code, description, and tags. `None` means "no constraint".
#[must_use]
pub fn matches_filter(
    product: &product::Model,
    kind: Option<ProductKind>,
    query: Option<&str>,
) -> bool {
    let kind_ok = kind.is_none_or(|k| ProductKind::from_stored(&product.kind) == k);

    let query_ok = match query.map(str::trim) {
        None | Some("") => true,
        Some(q) => {
            let haystack = format!(
                "{} {} {} {}",
                product.name, product.code, product.description, product.tags
            )
            .to_lowercase();
            haystack.contains(&q.to_lowercase())
        }
    };

    kind_ok && query_ok
}

/// Fetches the active products and filters them in memory.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn search_products(
    db: &DatabaseConnection,
    kind: Option<ProductKind>,
    query: Option<&str>,
) -> Result<Vec<product::Model>> {
    let products = get_all_active_products(db).await?;
    Ok(products
        .into_iter()
        .filter(|p| matches_filter(p, kind, query))
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = setup_test_db().await?;

        // Empty name
        let result = create_product(&db, ProductDraft::new("", ProductKind::Printed)).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        // Whitespace-only name
        let result = create_product(&db, ProductDraft::new("   ", ProductKind::Printed)).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        // Non-finite retail price
        let mut draft = ProductDraft::new("Bô", ProductKind::Printed);
        draft.retail_price = f64::NAN;
        let result = create_product(&db, draft).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { amount: _ }));

        // Negative margin
        let mut draft = ProductDraft::new("Bô", ProductKind::Printed);
        draft.margin = -0.1;
        let result = create_product(&db, draft).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: -0.1 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_derives_code_and_version() -> Result<()> {
        let db = setup_test_db().await?;

        let product = create_product(
            &db,
            ProductDraft::new("Boîte protège-dents", ProductKind::Printed),
        )
        .await?;

        assert!(product.code.starts_with("3D_BOITE-PROTEGE-DENTS_"));
        assert_eq!(product.version, "V1");
        assert_eq!(product.kind, "printed");
        assert_eq!(product.status, "Prototype");
        assert!(!product.is_deleted);

        // Blank-form print build was persisted
        assert_eq!(product.grams_used, Some(120.0));
        assert_eq!(product.unit_cost, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_respects_explicit_code_and_version() -> Result<()> {
        let db = setup_test_db().await?;

        let mut draft = ProductDraft::new("Kama", ProductKind::Ordered);
        draft.code = Some("KAMA-FAMILY".to_string());
        draft.version = Some("V7".to_string());
        let product = create_product(&db, draft).await?;

        assert_eq!(product.code, "KAMA-FAMILY");
        assert_eq!(product.version, "V7");
        assert_eq!(product.kind, "ordered");
        assert_eq!(product.unit_cost, Some(20.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_second_create_with_same_code_gets_next_version() -> Result<()> {
        let db = setup_test_db().await?;

        let mut draft = ProductDraft::new("Bô", ProductKind::Printed);
        draft.code = Some("BO".to_string());
        let first = create_product(&db, draft.clone()).await?;
        assert_eq!(first.version, "V1");

        draft.version = None;
        let second = create_product(&db, draft).await?;
        assert_eq!(second.version, "V2");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_integration() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let mut draft = draft_from_model(&product);
        draft.description = "Poli, prêt pour photos".to_string();
        draft.status = "Validé".to_string();
        draft.tags = vec!["armes".to_string(), "rangement".to_string()];

        let updated = update_product(&db, product.id, draft).await?;

        assert_eq!(updated.description, "Poli, prêt pour photos");
        assert_eq!(updated.status, "Validé");
        assert_eq!(updated.tags, "armes, rangement");
        assert_eq!(updated.code, product.code);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product_fails() -> Result<()> {
        let db = setup_test_db().await?;

        let draft = ProductDraft::new("Ghost", ProductKind::Printed);
        let result = update_product(&db, 999, draft).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { name: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_is_soft() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let deleted = delete_product(&db, product.id).await?;
        assert!(deleted.is_deleted);

        // Hidden from the active list but still present by id
        assert!(get_all_active_products(&db).await?.is_empty());
        assert!(get_product_by_id(&db, product.id).await?.is_some());

        // Deleting again fails
        let result = delete_product(&db, product.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { name: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_clone_draft_bumps_version_and_clears_ownership() -> Result<()> {
        let db = setup_test_db().await?;

        let mut draft = ProductDraft::new("Bô", ProductKind::Printed);
        draft.code = Some("BO".to_string());
        draft.author = Some("David".to_string());
        draft.reminder_date = chrono::NaiveDate::from_ymd_opt(2026, 9, 1);
        let source = create_product(&db, draft).await?;

        let existing = get_all_active_products(&db).await?;
        let clone = clone_draft(&source, &existing);

        assert_eq!(clone.version.as_deref(), Some("V2"));
        assert_eq!(clone.code.as_deref(), Some("BO"));
        assert_eq!(clone.name, "Bô");
        assert_eq!(clone.print_build, Some(PrintBuild::default()));
        assert_eq!(clone.author, None);
        assert_eq!(clone.reminder_date, None);

        let cloned = create_product(&db, clone).await?;
        assert_eq!(cloned.version, "V2");
        assert_ne!(cloned.id, source.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_search_products_filters_by_kind_and_query() -> Result<()> {
        let db = setup_test_db().await?;

        let mut bo = ProductDraft::new("Bô d'entraînement", ProductKind::Printed);
        bo.tags = vec!["armes".to_string()];
        create_product(&db, bo).await?;

        let mut box_draft = ProductDraft::new("Boîtier", ProductKind::Ordered);
        box_draft.tags = vec!["rangement".to_string()];
        create_product(&db, box_draft).await?;

        let printed = search_products(&db, Some(ProductKind::Printed), None).await?;
        assert_eq!(printed.len(), 1);
        assert_eq!(printed[0].name, "Bô d'entraînement");

        // Query is case-insensitive and reaches tags
        let tagged = search_products(&db, None, Some("RANGEMENT")).await?;
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].name, "Boîtier");

        let none = search_products(&db, Some(ProductKind::Printed), Some("rangement")).await?;
        assert!(none.is_empty());

        let all = search_products(&db, None, Some("  ")).await?;
        assert_eq!(all.len(), 2);

        Ok(())
    }

    #[test]
    fn test_parse_and_format_tags() {
        assert_eq!(
            parse_tags(" armes, rangement ,,dojo "),
            vec!["armes", "rangement", "dojo"]
        );
        assert_eq!(parse_tags(""), Vec::<String>::new());
        assert_eq!(
            format_tags(&["armes".to_string(), "dojo".to_string()]),
            "armes, dojo"
        );
    }

    #[test]
    fn test_current_cost_recomputes_from_columns() {
        let mut product = sample_product("X", "V1");
        product.kind = "ordered".to_string();
        product.unit_cost = Some(20.0);
        product.import_per_unit = Some(2.5);
        product.customization_cost = None;

        assert_eq!(current_cost(&product), 22.5);

        // Missing columns count as zero, not as errors
        product.unit_cost = None;
        product.import_per_unit = None;
        assert_eq!(current_cost(&product), 0.0);
    }
}

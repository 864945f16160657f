//! Code and version derivation for the product catalog.
//!
//! Product codes are suggestions, not guarantees: the same name on the same
//! day always derives the same code, and the next-version helper never fails
//! on legacy data - malformed version labels simply count as zero. A human
//! reviews and can override everything before it is saved.

use crate::entities::product;
use chrono::NaiveDate;

/// Slug used when a product name is empty or contains nothing slug-worthy.
const EMPTY_NAME_SLUG: &str = "produit";

/// Product kind: 3D-printed in-house or ordered from a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    /// Made on the shop's own printers
    Printed,
    /// Bought from an external supplier
    Ordered,
}

impl ProductKind {
    /// Canonical spelling stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Printed => "printed",
            Self::Ordered => "ordered",
        }
    }

    /// Short tag used as the code prefix.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Printed => "3D",
            Self::Ordered => "ORD",
        }
    }

    /// Parses user input; accepts the historical `"3d"` spelling too.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "printed" | "3d" => Some(Self::Printed),
            "ordered" | "supplier" => Some(Self::Ordered),
            _ => None,
        }
    }

    /// Interprets a stored kind column. Anything that is not a printed
    /// spelling counts as ordered, mirroring how the records were written.
    #[must_use]
    pub fn from_stored(stored: &str) -> Self {
        Self::parse(stored).unwrap_or(Self::Ordered)
    }
}

/// Strips the accents that show up in the shop's French product names.
fn fold_accents(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => out.push('a'),
            'ç' => out.push('c'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'ñ' => out.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => out.push('o'),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'ý' | 'ÿ' => out.push('y'),
            'æ' => out.push_str("ae"),
            'œ' => out.push_str("oe"),
            _ => out.push(c),
        }
    }
    out
}

/// Normalizes a product name to a lowercase, accent-stripped, hyphenated
/// slug. Runs of non-alphanumeric characters collapse to a single hyphen;
/// leading and trailing hyphens are trimmed. An empty or symbol-only name
/// produces an empty slug.
#[must_use]
pub fn slugify(name: &str) -> String {
    let folded = fold_accents(&name.to_lowercase());
    let mut slug = String::with_capacity(folded.len());
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Derives a suggested product code: `<TAG>_<slug>_<YYYYMMDD>`, uppercased.
///
/// Deterministic for a given (name, kind, day) - deriving twice on the same
/// day yields the same code - but not guaranteed unique, so callers treat
/// the result as a suggestion and allow manual override.
#[must_use]
pub fn derive_code(name: &str, kind: ProductKind, date: NaiveDate) -> String {
    let slug = slugify(name);
    let base = if slug.is_empty() {
        EMPTY_NAME_SLUG
    } else {
        slug.as_str()
    };
    format!("{}_{}_{}", kind.tag(), base, date.format("%Y%m%d")).to_uppercase()
}

/// Parses a `V<integer>` version label, case-insensitive.
///
/// Anything else (`"V1.5"`, `"latest"`, `""`) is `None` - never an error,
/// so manual or legacy version strings can't block the suggestion.
#[must_use]
pub fn parse_version(version: &str) -> Option<u64> {
    let digits = version
        .strip_prefix('V')
        .or_else(|| version.strip_prefix('v'))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Suggests the next version label for a product code.
///
/// Looks at every product sharing `code`, takes the highest parseable
/// `V<n>` label (non-matching labels count as zero), and returns `V<max+1>`.
/// Returns `"V1"` when no product shares the code.
#[must_use]
pub fn next_version(products: &[product::Model], code: &str) -> String {
    let max = products
        .iter()
        .filter(|p| p.code == code)
        .map(|p| parse_version(&p.version).unwrap_or(0))
        .max()
        .unwrap_or(0);
    format!("V{}", max + 1)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::sample_product;

    #[test]
    fn test_slugify_strips_accents_and_collapses() {
        assert_eq!(slugify("Boîte protège-dents"), "boite-protege-dents");
        assert_eq!(slugify("  Kama -- d'entraînement!  "), "kama-d-entrainement");
        assert_eq!(slugify("Bô #3"), "bo-3");
        assert_eq!(slugify("Œuvre"), "oeuvre");
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_derive_code_reference_value() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(
            derive_code("Boîte protège-dents", ProductKind::Printed, date),
            "3D_BOITE-PROTEGE-DENTS_20240105"
        );
    }

    #[test]
    fn test_derive_code_ordered_tag_and_placeholder() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(
            derive_code("", ProductKind::Ordered, date),
            "ORD_PRODUIT_20240105"
        );
    }

    #[test]
    fn test_derive_code_is_deterministic_per_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let a = derive_code("Kama", ProductKind::Printed, date);
        let b = derive_code("Kama", ProductKind::Printed, date);
        assert_eq!(a, b);

        let next_day = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_ne!(a, derive_code("Kama", ProductKind::Printed, next_day));
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("V1"), Some(1));
        assert_eq!(parse_version("v12"), Some(12));
        assert_eq!(parse_version("V1.5"), None);
        assert_eq!(parse_version("latest"), None);
        assert_eq!(parse_version("V"), None);
        assert_eq!(parse_version(""), None);
    }

    #[test]
    fn test_next_version_empty_set() {
        assert_eq!(next_version(&[], "ANY"), "V1");
    }

    #[test]
    fn test_next_version_takes_max_plus_one() {
        let products = vec![
            sample_product("X", "V2"),
            sample_product("X", "V5"),
            sample_product("Y", "V9"),
        ];
        assert_eq!(next_version(&products, "X"), "V6");
        assert_eq!(next_version(&products, "Y"), "V10");
        assert_eq!(next_version(&products, "Z"), "V1");
    }

    #[test]
    fn test_next_version_ignores_malformed_labels() {
        let products = vec![sample_product("X", "latest")];
        assert_eq!(next_version(&products, "X"), "V1");

        let products = vec![sample_product("X", "V1.5"), sample_product("X", "V2")];
        assert_eq!(next_version(&products, "X"), "V3");
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(ProductKind::parse("printed"), Some(ProductKind::Printed));
        assert_eq!(ProductKind::parse("3D"), Some(ProductKind::Printed));
        assert_eq!(ProductKind::parse(" Ordered "), Some(ProductKind::Ordered));
        assert_eq!(ProductKind::parse("wooden"), None);
        assert_eq!(ProductKind::from_stored("printed"), ProductKind::Printed);
        assert_eq!(ProductKind::from_stored("anything"), ProductKind::Ordered);
    }
}

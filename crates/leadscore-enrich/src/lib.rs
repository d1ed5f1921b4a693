//! Lead enrichment: brand resolution and categorization.
//!
//! Maps free-text company names onto the Golden Sheet brand registry
//! (normalization → alias table → exact → containment → fuzzy) and assigns
//! every lead one category from the fixed taxonomy. Both operations are
//! pure and total: a missed brand is `None`, a missed category is the
//! default, and nothing here returns an error.

mod alias;
mod categorizer;
mod enrich;
mod normalize;
mod resolver;

pub use categorizer::Categorizer;
pub use enrich::{
    read_enrichment, Enricher, ENRICHMENT_FIELDS, FIELD_CATEGORY, FIELD_CATEGORY_ASSETS,
    FIELD_IN_GOLDEN_SHEET, FIELD_MARKETS, FIELD_PLATFORMS, FIELD_TOTAL_ASSETS,
};
pub use normalize::normalize_company_name;
pub use resolver::BrandResolver;

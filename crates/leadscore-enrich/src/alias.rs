//! Curated brand-alias table.
//!
//! Pins brand-family disambiguation that string similarity cannot express:
//! "amazon web services" must reach an "AWS" registry entry before any
//! similarity pass gets a chance to pick "Amazon".

use leadscore_core::AliasGroup;

use crate::normalize::{contains_token_sequence, normalize_company_name};

/// Alias table with variants and canonicals pre-normalized, variants
/// ordered longest-first so the most specific alias wins.
#[derive(Debug, Clone)]
pub(crate) struct AliasTable {
    /// (normalized variant, normalized canonical), longest variant first.
    entries: Vec<(String, String)>,
}

impl AliasTable {
    pub(crate) fn build(groups: &[AliasGroup], legal_suffixes: &[String]) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for group in groups {
            let canonical = normalize_company_name(&group.canonical, legal_suffixes);
            if canonical.is_empty() {
                continue;
            }
            for variant in &group.variants {
                let variant = normalize_company_name(variant, legal_suffixes);
                if !variant.is_empty() {
                    entries.push((variant, canonical.clone()));
                }
            }
        }
        // Stable sort: equal-length variants keep table order.
        entries.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
        Self { entries }
    }

    /// Canonical names whose variant equals, or is token-contained in, the
    /// normalized company name, most specific first.
    pub(crate) fn candidates<'a>(
        &'a self,
        normalized_name: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(variant, _)| {
                variant == normalized_name || contains_token_sequence(normalized_name, variant)
            })
            .map(|(_, canonical)| canonical.as_str())
    }
}

//! Per-lead enrichment: resolve the brand, assign the category, append the
//! derived fields.

use leadscore_core::{
    BrandEntry, BrandRegistry, CategoryTable, Enrichment, FieldMap, LeadRecord, Platform,
    RulesConfig,
};

use crate::categorizer::Categorizer;
use crate::resolver::BrandResolver;

/// Names of the appended enrichment fields, in output order.
pub const ENRICHMENT_FIELDS: [&str; 6] = [
    FIELD_IN_GOLDEN_SHEET,
    FIELD_TOTAL_ASSETS,
    FIELD_PLATFORMS,
    FIELD_MARKETS,
    FIELD_CATEGORY,
    FIELD_CATEGORY_ASSETS,
];

pub const FIELD_IN_GOLDEN_SHEET: &str = "brand_in_golden_sheet";
pub const FIELD_TOTAL_ASSETS: &str = "total_assets_tested";
pub const FIELD_PLATFORMS: &str = "platforms_tested";
pub const FIELD_MARKETS: &str = "markets_tested";
pub const FIELD_CATEGORY: &str = "company_category";
pub const FIELD_CATEGORY_ASSETS: &str = "category_asset_count";

/// Enriches leads against one registry + category-table snapshot.
///
/// Stateless across leads; the snapshot is read-only for the lifetime of
/// the enricher, so leads can be processed in any order or in parallel.
#[derive(Debug)]
pub struct Enricher<'a> {
    resolver: BrandResolver<'a>,
    categorizer: Categorizer<'a>,
    categories: &'a CategoryTable,
    fields: &'a FieldMap,
}

impl<'a> Enricher<'a> {
    #[must_use]
    pub fn new(
        registry: &'a BrandRegistry,
        categories: &'a CategoryTable,
        rules: &'a RulesConfig,
        fields: &'a FieldMap,
    ) -> Self {
        Self {
            resolver: BrandResolver::new(registry, rules),
            categorizer: Categorizer::new(&rules.categories),
            categories,
            fields,
        }
    }

    /// Enrich one lead in place, appending the derived fields after all
    /// original fields, and return the typed enrichment.
    ///
    /// Missing company/industry fields degrade to empty strings; this never
    /// fails on a malformed record.
    pub fn enrich(&self, record: &mut LeadRecord) -> Enrichment {
        let company = record
            .get(&self.fields.company)
            .unwrap_or_default()
            .to_string();
        let industry = record
            .get(&self.fields.industry)
            .unwrap_or_default()
            .to_string();

        let brand = self.resolver.resolve(&company).cloned();
        let category = self.categorizer.categorize(&company, &industry).to_string();
        let category_asset_count = self.categories.asset_count(&category);

        match &brand {
            Some(b) => {
                record.set(FIELD_IN_GOLDEN_SHEET, "Yes");
                record.set(FIELD_TOTAL_ASSETS, b.total_assets_tested.to_string());
                record.set(FIELD_PLATFORMS, join_platforms(&b.platforms));
                record.set(FIELD_MARKETS, b.markets.join(", "));
            }
            None => {
                record.set(FIELD_IN_GOLDEN_SHEET, "No");
                record.set(FIELD_TOTAL_ASSETS, "");
                record.set(FIELD_PLATFORMS, "");
                record.set(FIELD_MARKETS, "");
            }
        }
        record.set(FIELD_CATEGORY, category.as_str());
        record.set(FIELD_CATEGORY_ASSETS, category_asset_count.to_string());

        Enrichment {
            brand,
            category,
            category_asset_count,
        }
    }
}

/// Rebuild the typed enrichment from a previously enriched record, for
/// score-only runs over enriched exports.
///
/// Dirty cells degrade gracefully: a missing or non-"Yes" golden-sheet flag
/// means no brand, malformed counts parse to 0, and unknown platform labels
/// are skipped.
#[must_use]
pub fn read_enrichment(record: &LeadRecord, fields: &FieldMap) -> Enrichment {
    let in_sheet = record
        .get(FIELD_IN_GOLDEN_SHEET)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"));

    let brand = in_sheet.then(|| BrandEntry {
        name: record
            .get(&fields.company)
            .unwrap_or_default()
            .to_string(),
        total_assets_tested: parse_count(record.get(FIELD_TOTAL_ASSETS)),
        platforms: record
            .get(FIELD_PLATFORMS)
            .unwrap_or_default()
            .split(',')
            .filter_map(Platform::from_column)
            .collect(),
        markets: record
            .get(FIELD_MARKETS)
            .unwrap_or_default()
            .split(',')
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect(),
    });

    Enrichment {
        brand,
        category: record
            .get(FIELD_CATEGORY)
            .unwrap_or_default()
            .to_string(),
        category_asset_count: parse_count(record.get(FIELD_CATEGORY_ASSETS)),
    }
}

fn parse_count(value: Option<&str>) -> u32 {
    value
        .unwrap_or_default()
        .trim()
        .parse::<u32>()
        .unwrap_or(0)
}

fn join_platforms(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

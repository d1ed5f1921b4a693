use serde::{Deserialize, Serialize};

/// Platforms tracked in the Golden Sheet pivot export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    AmazonPrime,
    Instagram,
    Netflix,
    Standalone,
    Tiktok,
    YoutubeShorts,
}

impl Platform {
    /// All platforms, in Golden Sheet column order.
    pub const ALL: [Platform; 6] = [
        Platform::AmazonPrime,
        Platform::Instagram,
        Platform::Netflix,
        Platform::Standalone,
        Platform::Tiktok,
        Platform::YoutubeShorts,
    ];

    /// Parse a Golden Sheet column identifier into a platform.
    #[must_use]
    pub fn from_column(column: &str) -> Option<Platform> {
        match column.trim() {
            "amazon_prime" => Some(Platform::AmazonPrime),
            "instagram" => Some(Platform::Instagram),
            "netflix" => Some(Platform::Netflix),
            "standalone" => Some(Platform::Standalone),
            "tiktok" => Some(Platform::Tiktok),
            "youtube_shorts" => Some(Platform::YoutubeShorts),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Platform::AmazonPrime => "amazon_prime",
            Platform::Instagram => "instagram",
            Platform::Netflix => "netflix",
            Platform::Standalone => "standalone",
            Platform::Tiktok => "tiktok",
            Platform::YoutubeShorts => "youtube_shorts",
        };
        write!(f, "{s}")
    }
}

/// One row of the Golden Sheet brand registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandEntry {
    /// Canonical display name. Non-empty; never a reserved header token.
    pub name: String,
    /// Total marketing assets tested for this brand. Malformed source
    /// values are loaded as 0.
    pub total_assets_tested: u32,
    /// Platforms with at least one tested asset.
    pub platforms: Vec<Platform>,
    /// Market/country labels, source order preserved. Informational only.
    pub markets: Vec<String>,
}

/// Header/aggregate tokens that appear as rows in the raw pivot export and
/// must never become registry entries.
const RESERVED_HEADER_TOKENS: [&str; 4] =
    ["Main Brand", "Grand Total", "Row Labels", "Count of Asset ID"];

/// Ordered snapshot of the brand registry.
///
/// Source order is preserved: it breaks ties in containment and fuzzy
/// resolution, so entries must never be re-sorted.
#[derive(Debug, Clone, Default)]
pub struct BrandRegistry {
    entries: Vec<BrandEntry>,
}

impl BrandRegistry {
    /// Build a registry from raw entries, dropping rows with empty names or
    /// reserved header tokens.
    #[must_use]
    pub fn from_entries(entries: Vec<BrandEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|e| {
                let name = e.name.trim();
                !name.is_empty() && !RESERVED_HEADER_TOKENS.contains(&name)
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[BrandEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Category name → tested-asset count, from the Golden Sheet category export.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    counts: std::collections::HashMap<String, u32>,
}

impl CategoryTable {
    /// Build the table, rejecting duplicate category names.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Validation`] on a duplicate name.
    pub fn from_pairs(pairs: Vec<(String, u32)>) -> Result<Self, crate::ConfigError> {
        let mut counts = std::collections::HashMap::new();
        for (name, count) in pairs {
            if counts.insert(name.clone(), count).is_some() {
                return Err(crate::ConfigError::Validation(format!(
                    "duplicate category name: '{name}'"
                )));
            }
        }
        Ok(Self { counts })
    }

    /// Asset count for a category. Unknown names return 0, not an error.
    #[must_use]
    pub fn asset_count(&self, category: &str) -> u32 {
        self.counts.get(category).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// One lead as an ordered list of (field name, value) pairs.
///
/// Field order is preserved end-to-end; enrichment and score fields are
/// appended after all original fields and never reorder them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    fields: Vec<(String, String)>,
}

impl LeadRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_pairs(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Value of a field by exact name, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a field: overwrites in place if the name exists, otherwise
    /// appends at the end.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name.to_string(), value));
        }
    }

    /// Field names, in record order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Caller-supplied field names for the semantically meaningful lead columns.
///
/// Lead exports name their columns arbitrarily, so the pipeline never
/// assumes column names or positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    pub company: String,
    pub industry: String,
    pub title: String,
    pub headline: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            company: "company".to_string(),
            industry: "industry".to_string(),
            title: "title".to_string(),
            headline: "headline".to_string(),
        }
    }
}

/// Derived fields produced by the enrichment stage. Written exactly once;
/// the scorer reads but never mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    /// Resolved registry entry, if any. No match is a legitimate outcome.
    pub brand: Option<BrandEntry>,
    /// Assigned category. Always present; the categorizer is total.
    pub category: String,
    /// Asset count for the assigned category; 0 if the category is not in
    /// the table.
    pub category_asset_count: u32,
}

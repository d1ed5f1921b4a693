//! Rules configuration: alias tables, category rules, scoring tiers.
//!
//! Every keyword list, tier boundary and weight the pipeline uses lives here
//! as data. The built-in defaults are the calibrated baseline; a YAML file
//! can override any section without code changes.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Knobs for the brand resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverRules {
    /// Minimum normalized-Levenshtein similarity for a fuzzy hit.
    /// Below 0.70 admits false positives; above it rejects reasonable
    /// typo/suffix variants.
    pub fuzzy_threshold: f64,
    /// Minimum length of the shorter string for a containment hit, to keep
    /// short tokens like "co" from matching everything.
    pub min_containment_len: usize,
    /// Legal-entity suffix tokens stripped from either end during
    /// normalization.
    pub legal_suffixes: Vec<String>,
}

impl Default for ResolverRules {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.70,
            min_containment_len: 4,
            legal_suffixes: to_strings(&[
                "inc",
                "incorporated",
                "corporation",
                "corp",
                "ltd",
                "limited",
                "llc",
                "the",
                "company",
                "co",
            ]),
        }
    }
}

/// A set of known variants for one canonical registry name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasGroup {
    pub canonical: String,
    pub variants: Vec<String>,
}

/// One categorization rule: keyword hits on the company name or the
/// industry label map to a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    #[serde(default)]
    pub company_keywords: Vec<String>,
    #[serde(default)]
    pub industry_keywords: Vec<String>,
}

/// The fixed taxonomy plus the ordered rule table.
///
/// Rule order is the documented precedence: company-name keywords are
/// evaluated across the whole table before any industry keyword, and within
/// a pass earlier rules win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRules {
    pub taxonomy: Vec<String>,
    pub default_category: String,
    pub rules: Vec<CategoryRule>,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            taxonomy: to_strings(&DEFAULT_TAXONOMY),
            default_category: DEFAULT_CATEGORY.to_string(),
            rules: default_category_rules(),
        }
    }
}

/// An ordered keyword tier: any keyword hit yields the tier score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTier {
    pub keywords: Vec<String>,
    pub score: f32,
}

/// One asset-count tier. Presence and volume use the same boundaries but
/// map to different scales: presence rewards being in the sheet at all,
/// volume rewards depth.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AssetTier {
    pub min_assets: u32,
    pub presence_score: f32,
    pub asset_score: f32,
}

/// Role-focus scores and the operational denylist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleScores {
    /// Operational-sounding terms that downgrade an otherwise-matching
    /// brand title.
    pub denylist: Vec<String>,
    pub denylist_score: f32,
    pub brand_marketing: f32,
    pub brand_manager: f32,
    pub influencer: f32,
    pub brand: f32,
    pub marketing: f32,
    pub fallback: f32,
}

impl Default for RoleScores {
    fn default() -> Self {
        Self {
            denylist: to_strings(&[
                "protection",
                "registry",
                "archivist",
                "trademark",
                "compliance",
                "counterfeit",
            ]),
            denylist_score: 4.0,
            brand_marketing: 10.0,
            brand_manager: 9.5,
            influencer: 9.0,
            brand: 8.0,
            marketing: 7.0,
            fallback: 5.0,
        }
    }
}

/// Sub-score weights. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub seniority: f32,
    pub presence: f32,
    pub assets: f32,
    pub role: f32,
    pub category: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            seniority: 0.30,
            presence: 0.25,
            assets: 0.20,
            role: 0.15,
            category: 0.10,
        }
    }
}

/// All scoring tiers and weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRules {
    pub weights: ScoreWeights,
    /// Seniority tiers, most senior first.
    pub seniority_tiers: Vec<KeywordTier>,
    pub seniority_fallback: f32,
    /// Asset-count tiers, highest boundary first.
    pub asset_tiers: Vec<AssetTier>,
    /// Matched brand below the lowest asset tier.
    pub matched_presence_fallback: f32,
    pub matched_asset_fallback: f32,
    /// Unmatched company whose name carries a known large-brand keyword.
    pub unmatched_fortune_presence: f32,
    pub unmatched_presence: f32,
    pub unmatched_asset: f32,
    pub fortune_brands: Vec<String>,
    pub role: RoleScores,
    /// Category-fit tiers, keyword-matched against the category name.
    pub category_tiers: Vec<KeywordTier>,
    pub category_fallback: f32,
    /// Hard cap on the generated reasoning string, in characters.
    pub reasoning_max_chars: usize,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            seniority_tiers: vec![
                tier(&["vp", "vice president", "director", "head of"], 9.0),
                tier(
                    &[
                        "senior manager",
                        "sr manager",
                        "sr. manager",
                        "senior brand",
                        "sr brand",
                        "sr. brand",
                    ],
                    8.0,
                ),
                tier(&["senior", "sr."], 7.5),
                tier(&["lead"], 7.0),
                tier(&["manager"], 6.5),
            ],
            seniority_fallback: 4.5,
            asset_tiers: vec![
                AssetTier {
                    min_assets: 50,
                    presence_score: 10.0,
                    asset_score: 10.0,
                },
                AssetTier {
                    min_assets: 20,
                    presence_score: 9.0,
                    asset_score: 7.0,
                },
                AssetTier {
                    min_assets: 10,
                    presence_score: 8.5,
                    asset_score: 6.0,
                },
            ],
            matched_presence_fallback: 8.0,
            matched_asset_fallback: 5.0,
            unmatched_fortune_presence: 4.5,
            unmatched_presence: 3.0,
            unmatched_asset: 0.0,
            fortune_brands: to_strings(&[
                "apple",
                "amazon",
                "nike",
                "coca-cola",
                "coca cola",
                "disney",
                "ford",
                "estée lauder",
                "estee lauder",
                "samsung",
                "microsoft",
                "google",
            ]),
            role: RoleScores::default(),
            category_tiers: vec![
                tier(
                    &["beauty", "electronics", "food and beverage", "entertainment"],
                    10.0,
                ),
                tier(&["fashion", "retail"], 8.0),
                tier(&["automotive", "health", "telecom"], 7.0),
            ],
            category_fallback: 5.0,
            reasoning_max_chars: 250,
        }
    }
}

/// Complete rules configuration for one pipeline run.
///
/// `Default` is the calibrated baseline; a YAML override may supply any
/// subset of sections and inherits the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub resolver: ResolverRules,
    pub aliases: Vec<AliasGroup>,
    pub categories: CategoryRules,
    pub scoring: ScoringRules,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverRules::default(),
            aliases: default_aliases(),
            categories: CategoryRules::default(),
            scoring: ScoringRules::default(),
        }
    }
}

/// Load and validate a rules file, or fall back to the baseline when no
/// path is given.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_rules(path: Option<&Path>) -> Result<RulesConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(RulesConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let rules: RulesConfig = serde_yaml::from_str(&content)?;

    validate_rules(&rules)?;

    Ok(rules)
}

/// Validate a rules configuration.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] describing the first violation found.
pub fn validate_rules(rules: &RulesConfig) -> Result<(), ConfigError> {
    let r = &rules.resolver;
    if !(r.fuzzy_threshold > 0.0 && r.fuzzy_threshold <= 1.0) {
        return Err(ConfigError::Validation(format!(
            "fuzzy_threshold must be in (0.0, 1.0], got {}",
            r.fuzzy_threshold
        )));
    }

    for group in &rules.aliases {
        if group.canonical.trim().is_empty() {
            return Err(ConfigError::Validation(
                "alias group has empty canonical name".to_string(),
            ));
        }
        if group.variants.is_empty() {
            return Err(ConfigError::Validation(format!(
                "alias group '{}' has no variants",
                group.canonical
            )));
        }
    }

    let c = &rules.categories;
    if c.taxonomy.is_empty() {
        return Err(ConfigError::Validation("taxonomy is empty".to_string()));
    }
    let mut seen = HashSet::new();
    for name in &c.taxonomy {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "taxonomy contains an empty category name".to_string(),
            ));
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate taxonomy category: '{name}'"
            )));
        }
    }
    if !seen.contains(c.default_category.as_str()) {
        return Err(ConfigError::Validation(format!(
            "default category '{}' is not in the taxonomy",
            c.default_category
        )));
    }
    for rule in &c.rules {
        if !seen.contains(rule.category.as_str()) {
            return Err(ConfigError::Validation(format!(
                "category rule targets '{}', which is not in the taxonomy",
                rule.category
            )));
        }
        if rule.company_keywords.is_empty() && rule.industry_keywords.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category rule for '{}' has no keywords",
                rule.category
            )));
        }
    }

    let s = &rules.scoring;
    let weight_sum = s.weights.seniority
        + s.weights.presence
        + s.weights.assets
        + s.weights.role
        + s.weights.category;
    if (weight_sum - 1.0).abs() > 1e-4 {
        return Err(ConfigError::Validation(format!(
            "sub-score weights must sum to 1.0, got {weight_sum}"
        )));
    }

    let mut prev_min: Option<u32> = None;
    for t in &s.asset_tiers {
        if let Some(prev) = prev_min {
            if t.min_assets >= prev {
                return Err(ConfigError::Validation(
                    "asset tiers must be ordered by strictly descending min_assets".to_string(),
                ));
            }
        }
        prev_min = Some(t.min_assets);
    }

    let all_scores = sub_score_values(s);
    for value in all_scores {
        if !(0.0..=10.0).contains(&value) {
            return Err(ConfigError::Validation(format!(
                "sub-score value {value} is outside [0.0, 10.0]"
            )));
        }
    }

    if s.reasoning_max_chars == 0 || s.reasoning_max_chars > 300 {
        return Err(ConfigError::Validation(format!(
            "reasoning_max_chars must be in 1..=300, got {}",
            s.reasoning_max_chars
        )));
    }

    Ok(())
}

fn sub_score_values(s: &ScoringRules) -> Vec<f32> {
    let mut values = vec![
        s.seniority_fallback,
        s.matched_presence_fallback,
        s.matched_asset_fallback,
        s.unmatched_fortune_presence,
        s.unmatched_presence,
        s.unmatched_asset,
        s.category_fallback,
        s.role.denylist_score,
        s.role.brand_marketing,
        s.role.brand_manager,
        s.role.influencer,
        s.role.brand,
        s.role.marketing,
        s.role.fallback,
    ];
    values.extend(s.seniority_tiers.iter().map(|t| t.score));
    values.extend(s.category_tiers.iter().map(|t| t.score));
    for t in &s.asset_tiers {
        values.push(t.presence_score);
        values.push(t.asset_score);
    }
    values
}

fn tier(keywords: &[&str], score: f32) -> KeywordTier {
    KeywordTier {
        keywords: to_strings(keywords),
        score,
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

const DEFAULT_CATEGORY: &str = "Services (Professional and Consumer)";

const DEFAULT_TAXONOMY: [&str; 29] = [
    "Alcoholic Beverages",
    "Automotive",
    "Baby and Kids",
    "Beauty and Personal Care",
    "Consumer Packaged Goods",
    "Education",
    "Electronics and Technology",
    "Energy and Utilities",
    "Entertainment and Streaming",
    "Fashion and Accessories",
    "Finance and Insurance",
    "Food and Beverage",
    "Gaming",
    "Health, Wellness, and Fitness",
    "Home and Garden",
    "Jewelry and Luxury",
    "Media and Publishing",
    "Non-Profit and Government",
    "Office and Industrial",
    "Pet Food & Care",
    "QSR (Quick Service Restaurants)",
    "Real Estate",
    "Retail and E-Commerce",
    "Services (Professional and Consumer)",
    "Software",
    "Sports and Outdoors",
    "Telecommunications",
    "Toys and Games",
    "Travel, Tourism and Hospitality",
];

fn default_category_rules() -> Vec<CategoryRule> {
    fn rule(category: &str, company: &[&str], industry: &[&str]) -> CategoryRule {
        CategoryRule {
            category: category.to_string(),
            company_keywords: to_strings(company),
            industry_keywords: to_strings(industry),
        }
    }

    vec![
        rule("Pet Food & Care", &["petsmart", "petco"], &["pet"]),
        rule("Fashion and Accessories", &["nike", "adidas"], &[]),
        rule(
            "Entertainment and Streaming",
            &["disney", "netflix"],
            &["entertainment", "streaming"],
        ),
        rule(
            "Electronics and Technology",
            &["apple", "samsung", "philips"],
            &[
                "consumer electronics",
                "electrical",
                "electronic manufacturing",
            ],
        ),
        rule("Retail and E-Commerce", &["amazon", "ebay"], &["retail"]),
        rule(
            "Food and Beverage",
            &["coca-cola", "coca cola", "pepsi"],
            &["food", "beverage"],
        ),
        rule(
            "Beauty and Personal Care",
            &["estée lauder", "estee lauder", "mac cosmetics", "l'oréal", "loreal"],
            &["cosmetics", "beauty"],
        ),
        rule(
            "Travel, Tourism and Hospitality",
            &["viator"],
            &["travel", "tourism", "hospitality"],
        ),
        rule("Automotive", &["ford", "toyota"], &["automotive"]),
        rule(
            "Telecommunications",
            &["t-mobile", "tmobile", "verizon"],
            &["telecommunications"],
        ),
        rule("QSR (Quick Service Restaurants)", &[], &["restaurant"]),
        rule(
            "Health, Wellness, and Fitness",
            &[],
            &["hospital", "health care", "wellness", "fitness"],
        ),
        rule(
            "Software",
            &[],
            &["computer software", "information technology"],
        ),
        rule(
            "Services (Professional and Consumer)",
            &[],
            &["marketing", "advertising"],
        ),
    ]
}

fn default_aliases() -> Vec<AliasGroup> {
    fn group(canonical: &str, variants: &[&str]) -> AliasGroup {
        AliasGroup {
            canonical: canonical.to_string(),
            variants: to_strings(variants),
        }
    }

    vec![
        group("AWS", &["aws", "amazon web services"]),
        group(
            "Amazon",
            &[
                "amazon",
                "prime video",
                "amazon prime",
                "amazon mgm studios",
                "prime video and amazon mgm studios",
            ],
        ),
        group(
            "T-Mobile",
            &["t-mobile", "tmobile", "metro by t-mobile"],
        ),
        group(
            "Estée Lauder",
            &["estée lauder", "estee lauder", "the estée lauder companies"],
        ),
        group("Coca-Cola", &["coca-cola", "coca cola", "coke"]),
    ]
}

//! The five sub-score computations. Each is a pure keyword/tier lookup
//! against the scoring rules; dirty input degrades to the fallback tier.

use leadscore_core::{BrandEntry, ScoringRules};

/// Seniority tier over job title and headline.
#[must_use]
pub fn seniority_score(title: &str, headline: &str, rules: &ScoringRules) -> f32 {
    let text = format!("{} {}", title.to_lowercase(), headline.to_lowercase());
    for tier in &rules.seniority_tiers {
        if tier.keywords.iter().any(|k| text.contains(k.as_str())) {
            return tier.score;
        }
    }
    rules.seniority_fallback
}

/// Registry-presence and asset-volume sub-scores.
///
/// Both read the same asset-count tiers but map to different scales:
/// presence rewards appearing in the Golden Sheet at all, volume rewards
/// testing depth. A company absent from the sheet still gets partial
/// presence credit when its name carries a known large-brand keyword.
#[must_use]
pub fn asset_scores(
    brand: Option<&BrandEntry>,
    company_name: &str,
    rules: &ScoringRules,
) -> (f32, f32) {
    match brand {
        Some(b) => {
            for t in &rules.asset_tiers {
                if b.total_assets_tested >= t.min_assets {
                    return (t.presence_score, t.asset_score);
                }
            }
            (
                rules.matched_presence_fallback,
                rules.matched_asset_fallback,
            )
        }
        None => {
            let company = company_name.to_lowercase();
            let fortune = rules
                .fortune_brands
                .iter()
                .any(|b| !b.is_empty() && company.contains(b.as_str()));
            if fortune {
                (rules.unmatched_fortune_presence, rules.unmatched_asset)
            } else {
                (rules.unmatched_presence, rules.unmatched_asset)
            }
        }
    }
}

/// Role-focus tier over job title and headline.
///
/// The operational denylist runs first: "Brand Protection Manager" is a
/// brand-title hit by keywords but not a brand-marketing lead.
#[must_use]
pub fn role_score(title: &str, headline: &str, rules: &ScoringRules) -> f32 {
    let title = title.to_lowercase();
    let headline = headline.to_lowercase();
    let r = &rules.role;

    let brand_in_title = title.contains("brand");
    if brand_in_title
        && r.denylist
            .iter()
            .any(|d| !d.is_empty() && title.contains(d.as_str()))
    {
        return r.denylist_score;
    }

    if brand_in_title && title.contains("marketing") {
        return r.brand_marketing;
    }
    if brand_in_title && title.contains("manager") {
        return r.brand_manager;
    }
    if title.contains("influencer")
        || title.contains("creator")
        || headline.contains("influencer")
        || headline.contains("creator")
    {
        return r.influencer;
    }
    if brand_in_title {
        return r.brand;
    }
    if title.contains("marketing") {
        return r.marketing;
    }
    r.fallback
}

/// Category-fit tier over the assigned category name.
#[must_use]
pub fn category_score(category: &str, rules: &ScoringRules) -> f32 {
    let category = category.to_lowercase();
    for tier in &rules.category_tiers {
        if tier.keywords.iter().any(|k| category.contains(k.as_str())) {
            return tier.score;
        }
    }
    rules.category_fallback
}

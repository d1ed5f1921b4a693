//! Weighted combination of sub-scores and reasoning generation.

use leadscore_core::{Enrichment, FieldMap, LeadRecord, ScoringRules};

use crate::subscores::{asset_scores, category_score, role_score, seniority_score};
use crate::types::{IcpScore, SubScores};

/// Appended score field names.
pub const FIELD_ICP_SCORE: &str = "icp_score";
pub const FIELD_SCORE_REASONING: &str = "score_reasoning";

/// Scores enriched leads against one set of scoring rules.
#[derive(Debug)]
pub struct IcpScorer<'a> {
    rules: &'a ScoringRules,
    fields: &'a FieldMap,
}

impl<'a> IcpScorer<'a> {
    #[must_use]
    pub fn new(rules: &'a ScoringRules, fields: &'a FieldMap) -> Self {
        Self { rules, fields }
    }

    /// Score one lead, appending `icp_score` and `score_reasoning` to the
    /// record.
    ///
    /// Total over any record shape: missing fields read as empty strings
    /// and land in the fallback tiers.
    pub fn score(&self, record: &mut LeadRecord, enrichment: &Enrichment) -> IcpScore {
        // Own the field values up front; the appends below need the record
        // mutably.
        let title = record
            .get(&self.fields.title)
            .unwrap_or_default()
            .to_string();
        let headline = record
            .get(&self.fields.headline)
            .unwrap_or_default()
            .to_string();
        let company = record
            .get(&self.fields.company)
            .unwrap_or_default()
            .to_string();

        let seniority = seniority_score(&title, &headline, self.rules);
        let (presence, assets) =
            asset_scores(enrichment.brand.as_ref(), &company, self.rules);
        let role = role_score(&title, &headline, self.rules);
        let category = category_score(&enrichment.category, self.rules);

        let subscores = SubScores {
            seniority,
            presence,
            assets,
            role,
            category,
        };

        let w = &self.rules.weights;
        let weighted = seniority * w.seniority
            + presence * w.presence
            + assets * w.assets
            + role * w.role
            + category * w.category;
        let score = round_one_decimal(weighted).clamp(1.0, 10.0);

        let reasoning = build_reasoning(&company, enrichment, &subscores, self.rules);

        record.set(FIELD_ICP_SCORE, format!("{score:.1}"));
        record.set(FIELD_SCORE_REASONING, reasoning.as_str());

        tracing::debug!(company = %company, score, "scored lead");

        IcpScore {
            score,
            reasoning,
            subscores,
        }
    }
}

fn round_one_decimal(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Short templated justification from the same signals the sub-scores use,
/// truncated to the configured cap.
fn build_reasoning(
    company: &str,
    enrichment: &Enrichment,
    subscores: &SubScores,
    rules: &ScoringRules,
) -> String {
    let seniority_label = if subscores.seniority >= 8.0 {
        "Senior/Director-level"
    } else if subscores.seniority >= 6.0 {
        "Mid-level manager"
    } else {
        "Entry/Junior-level"
    };

    let role_label = if subscores.role >= 9.5 {
        "strong brand marketing focus"
    } else if subscores.role >= 9.0 {
        "brand/influencer focus"
    } else if subscores.role >= 7.0 {
        "marketing focus"
    } else {
        "general role"
    };

    let company = if company.trim().is_empty() {
        "unknown company"
    } else {
        company
    };

    let presence_desc = match &enrichment.brand {
        Some(b) => format!(
            "in Golden Sheet with {} tested assets",
            b.total_assets_tested
        ),
        None => "not in Golden Sheet".to_string(),
    };

    let reasoning = format!(
        "{seniority_label} contact at {company}, {role_label}; {presence_desc}; category: {}.",
        enrichment.category
    );

    truncate_chars(&reasoning, rules.reasoning_max_chars)
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use leadscore_core::{BrandEntry, Platform, RulesConfig};

    use super::*;

    fn rules() -> leadscore_core::ScoringRules {
        RulesConfig::default().scoring
    }

    fn brand(name: &str, assets: u32) -> BrandEntry {
        BrandEntry {
            name: name.to_string(),
            total_assets_tested: assets,
            platforms: vec![Platform::Instagram],
            markets: vec!["US".to_string()],
        }
    }

    fn record(company: &str, title: &str, headline: &str) -> LeadRecord {
        LeadRecord::from_pairs(vec![
            ("company".to_string(), company.to_string()),
            ("industry".to_string(), String::new()),
            ("title".to_string(), title.to_string()),
            ("headline".to_string(), headline.to_string()),
        ])
    }

    fn enrichment(brand: Option<BrandEntry>, category: &str) -> Enrichment {
        Enrichment {
            brand,
            category: category.to_string(),
            category_asset_count: 0,
        }
    }

    #[test]
    fn coca_cola_scenario_exact_arithmetic() {
        let rules = rules();
        let fields = FieldMap::default();
        let scorer = IcpScorer::new(&rules, &fields);

        let mut rec = record("The Coca-Cola Company", "Senior Brand Manager", "");
        let enr = enrichment(Some(brand("Coca Cola", 65)), "Food and Beverage");
        let result = scorer.score(&mut rec, &enr);

        assert_eq!(result.subscores.seniority, 8.0);
        assert_eq!(result.subscores.presence, 10.0);
        assert_eq!(result.subscores.assets, 10.0);
        assert_eq!(result.subscores.role, 9.5);
        assert_eq!(result.subscores.category, 10.0);
        // 8.0*0.30 + 10*0.25 + 10*0.20 + 9.5*0.15 + 10*0.10 = 9.325 -> 9.3
        assert_eq!(result.score, 9.3);
        assert_eq!(rec.get(FIELD_ICP_SCORE), Some("9.3"));
    }

    #[test]
    fn score_fields_append_to_record() {
        let rules = rules();
        let fields = FieldMap::default();
        let scorer = IcpScorer::new(&rules, &fields);

        let mut rec = record("Acme", "Analyst", "");
        scorer.score(&mut rec, &enrichment(None, "Automotive"));

        let names: Vec<_> = rec.field_names().collect();
        assert_eq!(
            &names[names.len() - 2..],
            &[FIELD_ICP_SCORE, FIELD_SCORE_REASONING]
        );
    }

    #[test]
    fn record_fields_match_returned_score() {
        let rules = rules();
        let fields = FieldMap::default();
        let scorer = IcpScorer::new(&rules, &fields);

        let mut rec = record("Nike", "Brand Marketing Director", "");
        let result = scorer.score(&mut rec, &enrichment(Some(brand("Nike", 30)), "Fashion and Accessories"));

        assert_eq!(rec.get(FIELD_ICP_SCORE), Some(format!("{:.1}", result.score).as_str()));
        assert_eq!(rec.get(FIELD_SCORE_REASONING), Some(result.reasoning.as_str()));
        // Input fields survive the appends untouched.
        assert_eq!(rec.get("company"), Some("Nike"));
        assert_eq!(rec.get("title"), Some("Brand Marketing Director"));
    }

    #[test]
    fn score_is_clamped_to_at_least_one() {
        let mut rules = rules();
        // Zero out every fallback to force a weighted sum below 1.0.
        rules.seniority_fallback = 0.0;
        rules.unmatched_presence = 0.0;
        rules.role.fallback = 0.0;
        rules.category_fallback = 0.0;

        let fields = FieldMap::default();
        let scorer = IcpScorer::new(&rules, &fields);
        let mut rec = record("Blue Harbor", "Intern", "");
        let result = scorer.score(&mut rec, &enrichment(None, "Unknown"));
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn score_has_exactly_one_decimal() {
        let rules = rules();
        let fields = FieldMap::default();
        let scorer = IcpScorer::new(&rules, &fields);

        let cases = [
            ("Acme", "Analyst", None, "Gaming"),
            ("Apple", "VP Brand Marketing", None, "Electronics and Technology"),
            ("Nike", "Brand Manager", Some(brand("Nike", 30)), "Fashion and Accessories"),
        ];
        for (company, title, b, category) in cases {
            let mut rec = record(company, title, "");
            let result = scorer.score(&mut rec, &enrichment(b, category));
            assert!((1.0..=10.0).contains(&result.score));
            let rendered = format!("{:.1}", result.score);
            let reparsed: f32 = rendered.parse().unwrap();
            assert!(
                (reparsed - result.score).abs() < f32::EPSILON,
                "score {} carries more than one decimal",
                result.score
            );
        }
    }

    #[test]
    fn more_assets_never_lower_the_final_score() {
        let rules = rules();
        let fields = FieldMap::default();
        let scorer = IcpScorer::new(&rules, &fields);

        let mut prev = 0.0_f32;
        for assets in [0_u32, 5, 10, 20, 50, 100] {
            let mut rec = record("Acme", "Brand Manager", "");
            let result = scorer.score(&mut rec, &enrichment(Some(brand("Acme", assets)), "Gaming"));
            assert!(
                result.score >= prev,
                "score dropped at {assets} assets: {prev} -> {}",
                result.score
            );
            prev = result.score;
        }
    }

    #[test]
    fn reasoning_mentions_assets_and_category() {
        let rules = rules();
        let fields = FieldMap::default();
        let scorer = IcpScorer::new(&rules, &fields);

        let mut rec = record("Nike", "Senior Brand Manager", "");
        let result = scorer.score(
            &mut rec,
            &enrichment(Some(brand("Nike", 30)), "Fashion and Accessories"),
        );
        assert!(result.reasoning.contains("30 tested assets"));
        assert!(result.reasoning.contains("Fashion and Accessories"));
    }

    #[test]
    fn reasoning_is_bounded() {
        let rules = rules();
        let fields = FieldMap::default();
        let scorer = IcpScorer::new(&rules, &fields);

        let long_company = "Very ".repeat(100) + "Long Company Name";
        let mut rec = record(&long_company, "Senior Brand Manager", "");
        let result = scorer.score(
            &mut rec,
            &enrichment(Some(brand("Acme", 65)), "Food and Beverage"),
        );
        assert!(result.reasoning.chars().count() <= 300);
        assert!(result.reasoning.chars().count() <= rules.reasoning_max_chars);
    }

    #[test]
    fn missing_title_and_headline_use_fallback_tiers() {
        let rules = rules();
        let fields = FieldMap::default();
        let scorer = IcpScorer::new(&rules, &fields);

        let mut rec = LeadRecord::from_pairs(vec![(
            "company".to_string(),
            "Blue Harbor".to_string(),
        )]);
        let result = scorer.score(&mut rec, &enrichment(None, "Gaming"));
        assert_eq!(result.subscores.seniority, 4.5);
        assert_eq!(result.subscores.role, 5.0);
        assert!((1.0..=10.0).contains(&result.score));
    }

    #[test]
    fn scoring_is_deterministic() {
        let rules = rules();
        let fields = FieldMap::default();
        let scorer = IcpScorer::new(&rules, &fields);

        let enr = enrichment(Some(brand("Nike", 30)), "Fashion and Accessories");
        let mut first: Option<IcpScore> = None;
        for _ in 0..5 {
            let mut rec = record("Nike", "Brand Manager", "");
            let result = scorer.score(&mut rec, &enr);
            match &first {
                Some(f) => assert_eq!(&result, f),
                None => first = Some(result),
            }
        }
    }
}

//! Console summaries printed after batch runs.

use std::collections::HashMap;

use leadscore_core::{Enrichment, FieldMap, LeadRecord};
use leadscore_enrich::{FIELD_CATEGORY, FIELD_IN_GOLDEN_SHEET};
use leadscore_scorer::FIELD_ICP_SCORE;

/// Aggregate view of one enrichment pass.
pub struct EnrichmentSummary {
    pub total: usize,
    pub matched: usize,
    /// Top matched brands by tested assets, best first.
    pub top_brands: Vec<(String, u32)>,
}

pub fn enrichment_summary(enrichments: &[Enrichment]) -> EnrichmentSummary {
    let mut brands: Vec<(String, u32)> = enrichments
        .iter()
        .filter_map(|e| e.brand.as_ref())
        .map(|b| (b.name.clone(), b.total_assets_tested))
        .collect();
    let matched = brands.len();
    brands.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    brands.dedup();
    brands.truncate(3);

    EnrichmentSummary {
        total: enrichments.len(),
        matched,
        top_brands: brands,
    }
}

pub fn print_enrichment_summary(summary: &EnrichmentSummary) {
    println!("Enriched {} leads", summary.total);
    let rate = if summary.total == 0 {
        0.0
    } else {
        100.0 * summary.matched as f64 / summary.total as f64
    };
    println!(
        "  Golden Sheet matches: {} ({rate:.1}%)",
        summary.matched
    );
    if !summary.top_brands.is_empty() {
        println!("  Top matched brands by tested assets:");
        for (name, assets) in &summary.top_brands {
            println!("    {name}: {assets}");
        }
    }
}

/// Score distribution buckets: hot >= 8.0, warm 6.0-7.9, cold 4.0-5.9,
/// poor < 4.0.
#[derive(Debug, Default, PartialEq)]
pub struct ScoreDistribution {
    pub total: usize,
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
    pub poor: usize,
    pub unscored: usize,
}

pub fn score_distribution(leads: &[LeadRecord]) -> ScoreDistribution {
    let mut dist = ScoreDistribution {
        total: leads.len(),
        ..ScoreDistribution::default()
    };
    for score in leads.iter().map(lead_score) {
        match score {
            Some(s) if s >= 8.0 => dist.hot += 1,
            Some(s) if s >= 6.0 => dist.warm += 1,
            Some(s) if s >= 4.0 => dist.cold += 1,
            Some(_) => dist.poor += 1,
            None => dist.unscored += 1,
        }
    }
    dist
}

fn lead_score(lead: &LeadRecord) -> Option<f32> {
    lead.get(FIELD_ICP_SCORE)?.trim().parse().ok()
}

pub fn print_score_summary(leads: &[LeadRecord], fields: &FieldMap) {
    let dist = score_distribution(leads);
    println!("Scored {} leads", dist.total);
    println!("  Hot  (>= 8.0): {}", dist.hot);
    println!("  Warm (6.0-7.9): {}", dist.warm);
    println!("  Cold (4.0-5.9): {}", dist.cold);
    println!("  Poor (< 4.0): {}", dist.poor);
    if dist.unscored > 0 {
        println!("  Unscored rows: {}", dist.unscored);
    }

    let mut scored: Vec<(&LeadRecord, f32)> = leads
        .iter()
        .filter_map(|l| lead_score(l).map(|s| (l, s)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    if !scored.is_empty() {
        println!("  Top leads:");
        for (lead, score) in scored.iter().take(3) {
            let company = company_of(lead, fields);
            println!("    {score:.1}  {company}");
        }
    }
}

fn company_of<'a>(lead: &'a LeadRecord, fields: &FieldMap) -> &'a str {
    lead.get(&fields.company)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("(unknown)")
}

/// Full statistics for a scored batch: distribution, golden-sheet match
/// rate, category and company breakdowns.
pub fn print_stats(leads: &[LeadRecord], fields: &FieldMap) {
    print_score_summary(leads, fields);

    let matched = leads
        .iter()
        .filter(|l| {
            l.get(FIELD_IN_GOLDEN_SHEET)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"))
        })
        .count();
    let rate = if leads.is_empty() {
        0.0
    } else {
        100.0 * matched as f64 / leads.len() as f64
    };
    println!("  Golden Sheet matches: {matched} ({rate:.1}%)");

    print_breakdown(
        "By category (count, avg score)",
        leads,
        |lead| lead.get(FIELD_CATEGORY).unwrap_or("(uncategorized)"),
        usize::MAX,
    );
    print_breakdown(
        "Top companies (count, avg score)",
        leads,
        |lead| company_of(lead, fields),
        10,
    );
}

fn print_breakdown<'a>(
    label: &str,
    leads: &'a [LeadRecord],
    key: impl Fn(&'a LeadRecord) -> &'a str,
    limit: usize,
) {
    let mut groups: HashMap<&str, (usize, f32)> = HashMap::new();
    for lead in leads {
        let Some(score) = lead_score(lead) else {
            continue;
        };
        let entry = groups.entry(key(lead)).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += score;
    }

    let mut rows: Vec<(&str, usize, f32)> = groups
        .into_iter()
        .map(|(name, (count, sum))| (name, count, sum / count as f32))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows.truncate(limit);

    if !rows.is_empty() {
        println!("  {label}:");
        for (name, count, avg) in rows {
            println!("    {name}: {count}, {avg:.1}");
        }
    }
}

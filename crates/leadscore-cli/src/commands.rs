//! Batch pipeline commands behind the CLI subcommands.

use std::path::Path;

use leadscore_core::{Enrichment, FieldMap, LeadRecord, RulesConfig};
use leadscore_enrich::{read_enrichment, Enricher};
use leadscore_scorer::IcpScorer;

use crate::error::BatchError;
use crate::{io, report};

/// Enrich a lead batch against the Golden Sheet exports and write the
/// result as CSV.
pub fn enrich(
    leads_path: &Path,
    registry_path: &Path,
    categories_path: &Path,
    out_path: &Path,
    rules: &RulesConfig,
    fields: &FieldMap,
) -> Result<(), BatchError> {
    let registry = io::read_registry_csv(registry_path)?;
    let categories = io::read_category_table_csv(categories_path)?;
    let mut leads = io::read_leads(leads_path)?;
    tracing::info!(
        leads = leads.len(),
        brands = registry.len(),
        "enriching batch"
    );

    let enricher = Enricher::new(&registry, &categories, rules, fields);
    let enrichments: Vec<Enrichment> =
        leads.iter_mut().map(|lead| enricher.enrich(lead)).collect();

    io::write_leads_csv(out_path, &leads)?;
    report::print_enrichment_summary(&report::enrichment_summary(&enrichments));
    println!("Wrote {}", out_path.display());
    Ok(())
}

/// Score a previously enriched batch and write the result as CSV.
pub fn score(
    input_path: &Path,
    out_path: &Path,
    rules: &RulesConfig,
    fields: &FieldMap,
) -> Result<(), BatchError> {
    let mut leads = io::read_leads(input_path)?;
    tracing::info!(leads = leads.len(), "scoring batch");

    score_batch(&mut leads, rules, fields);

    io::write_leads_csv(out_path, &leads)?;
    report::print_score_summary(&leads, fields);
    println!("Wrote {}", out_path.display());
    Ok(())
}

/// Enrich and score in one pass.
pub fn run(
    leads_path: &Path,
    registry_path: &Path,
    categories_path: &Path,
    out_path: &Path,
    rules: &RulesConfig,
    fields: &FieldMap,
) -> Result<(), BatchError> {
    let registry = io::read_registry_csv(registry_path)?;
    let categories = io::read_category_table_csv(categories_path)?;
    let mut leads = io::read_leads(leads_path)?;
    tracing::info!(
        leads = leads.len(),
        brands = registry.len(),
        "running full pipeline"
    );

    let enricher = Enricher::new(&registry, &categories, rules, fields);
    let scorer = IcpScorer::new(&rules.scoring, fields);
    let mut enrichments = Vec::with_capacity(leads.len());
    for lead in &mut leads {
        let enrichment = enricher.enrich(lead);
        scorer.score(lead, &enrichment);
        enrichments.push(enrichment);
    }

    io::write_leads_csv(out_path, &leads)?;
    report::print_enrichment_summary(&report::enrichment_summary(&enrichments));
    report::print_score_summary(&leads, fields);
    println!("Wrote {}", out_path.display());
    Ok(())
}

/// Concatenate scored batch CSVs (`{prefix}*.csv` under `dir`, sorted by
/// file name) into one CSV with a union header.
pub fn consolidate(dir: &Path, prefix: &str, out_path: &Path) -> Result<(), BatchError> {
    let entries = std::fs::read_dir(dir).map_err(|source| BatchError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut batch_files: Vec<std::path::PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| BatchError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        let is_batch = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(prefix) && n.ends_with(".csv"));
        if is_batch {
            batch_files.push(path);
        }
    }
    batch_files.sort();

    if batch_files.is_empty() {
        return Err(BatchError::UnsupportedFormat(format!(
            "no {prefix}*.csv files under {}",
            dir.display()
        )));
    }

    let mut all_leads: Vec<LeadRecord> = Vec::new();
    for path in &batch_files {
        let mut leads = io::read_leads(path)?;
        tracing::info!(path = %path.display(), leads = leads.len(), "consolidating");
        all_leads.append(&mut leads);
    }

    io::write_leads_csv(out_path, &all_leads)?;
    println!(
        "Consolidated {} leads from {} files into {}",
        all_leads.len(),
        batch_files.len(),
        out_path.display()
    );
    Ok(())
}

/// Print distribution statistics for a scored batch.
pub fn stats(input_path: &Path, fields: &FieldMap) -> Result<(), BatchError> {
    let leads = io::read_leads(input_path)?;
    report::print_stats(&leads, fields);
    Ok(())
}

fn score_batch(leads: &mut [LeadRecord], rules: &RulesConfig, fields: &FieldMap) {
    let scorer = IcpScorer::new(&rules.scoring, fields);
    for lead in leads {
        let enrichment = read_enrichment(lead, fields);
        scorer.score(lead, &enrichment);
    }
}

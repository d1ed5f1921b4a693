use std::fs::File;
use std::io::Write as _;
use std::path::PathBuf;

use clap::Parser as _;
use leadscore_core::{FieldMap, RulesConfig};

use crate::{commands, io, Cli, Commands};

#[test]
fn cli_parses_run_with_default_fields() {
    let cli = Cli::try_parse_from([
        "leadscore",
        "run",
        "--leads",
        "leads.csv",
        "--registry",
        "pivot.csv",
        "--categories",
        "categories.csv",
        "--out",
        "scored.csv",
    ])
    .unwrap();

    let Commands::Run { leads, fields, .. } = cli.command else {
        panic!("expected run subcommand");
    };
    assert_eq!(leads, PathBuf::from("leads.csv"));
    assert_eq!(fields.to_field_map(), FieldMap::default());
    assert!(cli.rules.is_none());
}

#[test]
fn cli_parses_custom_field_names_and_rules_path() {
    let cli = Cli::try_parse_from([
        "leadscore",
        "--rules",
        "rules.yaml",
        "enrich",
        "--leads",
        "leads.json",
        "--registry",
        "pivot.csv",
        "--categories",
        "categories.csv",
        "--out",
        "enriched.csv",
        "--company-field",
        "Company Name",
        "--title-field",
        "Job Title",
    ])
    .unwrap();

    assert_eq!(cli.rules, Some(PathBuf::from("rules.yaml")));
    let Commands::Enrich { fields, .. } = cli.command else {
        panic!("expected enrich subcommand");
    };
    let map = fields.to_field_map();
    assert_eq!(map.company, "Company Name");
    assert_eq!(map.title, "Job Title");
    assert_eq!(map.industry, "industry");
}

#[test]
fn cli_rejects_missing_required_args() {
    assert!(Cli::try_parse_from(["leadscore", "score"]).is_err());
    assert!(Cli::try_parse_from(["leadscore"]).is_err());
}

#[test]
fn cli_parses_consolidate_with_default_prefix() {
    let cli = Cli::try_parse_from([
        "leadscore",
        "consolidate",
        "--dir",
        "batches",
        "--out",
        "all.csv",
    ])
    .unwrap();
    let Commands::Consolidate { prefix, .. } = cli.command else {
        panic!("expected consolidate subcommand");
    };
    assert_eq!(prefix, "scored_batch_");
}

#[test]
fn cli_parses_stats_with_custom_company_field() {
    let cli = Cli::try_parse_from([
        "leadscore",
        "stats",
        "--input",
        "all.csv",
        "--company-field",
        "Company Name",
    ])
    .unwrap();
    let Commands::Stats { fields, .. } = cli.command else {
        panic!("expected stats subcommand");
    };
    assert_eq!(fields.to_field_map().company, "Company Name");
}

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

const PIVOT: &str = "\
Golden Sheet - Brand Pivot,,,,,,,,,
,,,,,,,,,
Main Brand,amazon_prime,instagram,netflix,standalone,tiktok,youtube_shorts,Grand Total,platforms_list,markets_list
Coca Cola,,12,,8,45,,65,\"instagram, tiktok, standalone\",\"US, Japan\"
Nike,,30,,,,,30,instagram,US
Grand Total,,42,,8,45,,95,,
";

const CATEGORIES: &str = "\
Primary Category,Number of Assets Tested
Food and Beverage,120
Fashion and Accessories,80
";

const LEADS: &str = "\
full_name,company,industry,title,headline
Jordan Doe,The Coca-Cola Company,Food & Beverages,Senior Brand Manager,
Sam Lee,Blue Harbor Media,Logging,Software Engineer,
";

#[test]
fn run_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let leads = write_file(&dir, "leads.csv", LEADS);
    let registry = write_file(&dir, "pivot.csv", PIVOT);
    let categories = write_file(&dir, "categories.csv", CATEGORIES);
    let out = dir.path().join("scored.csv");

    let rules = RulesConfig::default();
    let fields = FieldMap::default();
    commands::run(&leads, &registry, &categories, &out, &rules, &fields).unwrap();

    let scored = io::read_leads(&out).unwrap();
    assert_eq!(scored.len(), 2);

    let coke = &scored[0];
    assert_eq!(coke.get("full_name"), Some("Jordan Doe"));
    assert_eq!(coke.get("brand_in_golden_sheet"), Some("Yes"));
    assert_eq!(coke.get("total_assets_tested"), Some("65"));
    assert_eq!(coke.get("company_category"), Some("Food and Beverage"));
    assert_eq!(coke.get("category_asset_count"), Some("120"));
    assert_eq!(coke.get("icp_score"), Some("9.3"));
    let reasoning = coke.get("score_reasoning").unwrap();
    assert!(reasoning.contains("65 tested assets"));

    let unmatched = &scored[1];
    assert_eq!(unmatched.get("brand_in_golden_sheet"), Some("No"));
    assert!(unmatched.get("icp_score").is_some());
}

#[test]
fn enrich_then_score_matches_single_pass_run() {
    let dir = tempfile::tempdir().unwrap();
    let leads = write_file(&dir, "leads.csv", LEADS);
    let registry = write_file(&dir, "pivot.csv", PIVOT);
    let categories = write_file(&dir, "categories.csv", CATEGORIES);

    let rules = RulesConfig::default();
    let fields = FieldMap::default();

    let enriched = dir.path().join("enriched.csv");
    let two_pass = dir.path().join("two_pass.csv");
    commands::enrich(&leads, &registry, &categories, &enriched, &rules, &fields).unwrap();
    commands::score(&enriched, &two_pass, &rules, &fields).unwrap();

    let one_pass = dir.path().join("one_pass.csv");
    commands::run(&leads, &registry, &categories, &one_pass, &rules, &fields).unwrap();

    let two_pass_leads = io::read_leads(&two_pass).unwrap();
    let one_pass_leads = io::read_leads(&one_pass).unwrap();
    for (a, b) in two_pass_leads.iter().zip(&one_pass_leads) {
        assert_eq!(a.get("icp_score"), b.get("icp_score"));
        assert_eq!(a.get("company_category"), b.get("company_category"));
    }
}

#[test]
fn consolidate_merges_batches_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        &dir,
        "scored_batch_2.csv",
        "company,icp_score\nNike,7.1\n",
    );
    write_file(
        &dir,
        "scored_batch_1.csv",
        "company,icp_score\nAcme,5.0\nPepsi,8.2\n",
    );
    write_file(&dir, "notes.txt", "not a batch");
    let out = dir.path().join("all.csv");

    commands::consolidate(dir.path(), "scored_batch_", &out).unwrap();

    let merged = io::read_leads(&out).unwrap();
    let companies: Vec<_> = merged.iter().map(|l| l.get("company").unwrap()).collect();
    assert_eq!(companies, vec!["Acme", "Pepsi", "Nike"]);
}

#[test]
fn consolidate_with_no_batches_errors() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("all.csv");
    let err = commands::consolidate(dir.path(), "scored_batch_", &out).unwrap_err();
    assert!(err.to_string().contains("scored_batch_"));
}

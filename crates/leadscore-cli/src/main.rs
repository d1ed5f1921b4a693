use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use leadscore_core::{load_app_config, load_rules, validate_rules, FieldMap};

mod commands;
mod error;
mod io;
mod report;
#[cfg(test)]
mod tests;

#[derive(Debug, Parser)]
#[command(name = "leadscore")]
#[command(about = "Golden Sheet lead enrichment and ICP scoring")]
struct Cli {
    /// Rules override file (YAML). Falls back to LEADSCORE_RULES_PATH,
    /// then the built-in baseline.
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Column names for the semantically meaningful lead fields.
#[derive(Debug, Args)]
struct FieldArgs {
    #[arg(long, default_value = "company")]
    company_field: String,
    #[arg(long, default_value = "industry")]
    industry_field: String,
    #[arg(long, default_value = "title")]
    title_field: String,
    #[arg(long, default_value = "headline")]
    headline_field: String,
}

impl FieldArgs {
    fn to_field_map(&self) -> FieldMap {
        FieldMap {
            company: self.company_field.clone(),
            industry: self.industry_field.clone(),
            title: self.title_field.clone(),
            headline: self.headline_field.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Enrich a lead batch against the Golden Sheet exports.
    Enrich {
        /// Lead batch (.csv or .json).
        #[arg(long)]
        leads: PathBuf,
        /// Golden Sheet brand pivot export (.csv).
        #[arg(long)]
        registry: PathBuf,
        /// Golden Sheet category export (.csv).
        #[arg(long)]
        categories: PathBuf,
        /// Output CSV.
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Score a previously enriched batch.
    Score {
        /// Enriched batch (.csv or .json).
        #[arg(long)]
        input: PathBuf,
        /// Output CSV.
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Enrich and score in one pass.
    Run {
        #[arg(long)]
        leads: PathBuf,
        #[arg(long)]
        registry: PathBuf,
        #[arg(long)]
        categories: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Concatenate scored batch CSVs into one file.
    Consolidate {
        /// Directory holding the batch files.
        #[arg(long)]
        dir: PathBuf,
        /// Batch file name prefix.
        #[arg(long, default_value = "scored_batch_")]
        prefix: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print distribution statistics for a scored batch.
    Stats {
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        fields: FieldArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let app = load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app.log_level)),
        )
        .init();

    let cli = Cli::parse();

    let rules_path = cli.rules.or(app.rules_path);
    let mut rules = load_rules(rules_path.as_deref())?;
    if let Some(threshold) = app.fuzzy_threshold {
        rules.resolver.fuzzy_threshold = threshold;
    }
    validate_rules(&rules)?;

    match cli.command {
        Commands::Enrich {
            leads,
            registry,
            categories,
            out,
            fields,
        } => commands::enrich(
            &leads,
            &registry,
            &categories,
            &out,
            &rules,
            &fields.to_field_map(),
        )?,
        Commands::Score { input, out, fields } => {
            commands::score(&input, &out, &rules, &fields.to_field_map())?;
        }
        Commands::Run {
            leads,
            registry,
            categories,
            out,
            fields,
        } => commands::run(
            &leads,
            &registry,
            &categories,
            &out,
            &rules,
            &fields.to_field_map(),
        )?,
        Commands::Consolidate { dir, prefix, out } => {
            commands::consolidate(&dir, &prefix, &out)?;
        }
        Commands::Stats { input, fields } => {
            commands::stats(&input, &fields.to_field_map())?;
        }
    }

    Ok(())
}

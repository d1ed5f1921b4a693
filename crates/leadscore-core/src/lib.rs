//! Core domain types and configuration for the Golden Sheet lead pipeline.
//!
//! Holds the brand registry, category table and lead record shapes consumed
//! by the enrichment and scoring crates, plus the rules configuration
//! (alias tables, category rules, scoring tiers) loaded from YAML.

mod app_config;
mod config;
mod error;
mod rules;
mod types;

#[cfg(test)]
mod config_test;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use rules::{
    load_rules, validate_rules, AliasGroup, AssetTier, CategoryRule, CategoryRules, KeywordTier,
    ResolverRules, RoleScores, RulesConfig, ScoreWeights, ScoringRules,
};
pub use types::{
    BrandEntry, BrandRegistry, CategoryTable, Enrichment, FieldMap, LeadRecord, Platform,
};

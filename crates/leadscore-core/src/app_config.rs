use std::path::PathBuf;

/// Process-level configuration for the batch drivers.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Optional rules override file; `None` means the built-in baseline.
    pub rules_path: Option<PathBuf>,
    /// Optional override of the resolver's fuzzy threshold, applied on top
    /// of whatever the rules file says.
    pub fuzzy_threshold: Option<f64>,
}

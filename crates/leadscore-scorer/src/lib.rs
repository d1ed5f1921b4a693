//! ICP scoring for enriched leads.
//!
//! Five weighted sub-scores (seniority, registry presence, asset volume,
//! role focus, category fit) combine into a 1.0–10.0 fitness score with a
//! short generated reasoning string. Scoring is a single-pass, stateless
//! computation per lead: same inputs, same score, always.

mod scorer;
mod subscores;
mod types;

pub use scorer::{IcpScorer, FIELD_ICP_SCORE, FIELD_SCORE_REASONING};
pub use subscores::{asset_scores, category_score, role_score, seniority_score};
pub use types::{IcpScore, SubScores};

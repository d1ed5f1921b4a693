/// The five sub-scores behind one final ICP score, each in [0.0, 10.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub seniority: f32,
    pub presence: f32,
    pub assets: f32,
    pub role: f32,
    pub category: f32,
}

/// Final ICP score for one lead.
#[derive(Debug, Clone, PartialEq)]
pub struct IcpScore {
    /// Weighted sum, rounded to one decimal, clamped to [1.0, 10.0].
    pub score: f32,
    /// Human-readable justification built from the same signals as the
    /// sub-scores. Bounded length.
    pub reasoning: String,
    pub subscores: SubScores,
}

//! Error types for the oa-fuzzmatch crate.

/// Matching engine error types.
///
/// Scoring itself is total over all strings; only request configuration
/// can fail. Transport errors stay in `anyhow` at the server layer.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// Cutoff outside [0, 100] or a zero result limit.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Scorer name did not match any registered scorer.
    #[error("unknown scorer: {name} (expected ratio, partial_ratio, token_sort_ratio or token_set_ratio)")]
    UnknownScorer { name: String },
}

impl MatchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Convenience result type for oa-fuzzmatch operations.
pub type MatchResult<T> = Result<T, MatchError>;

use thiserror::Error;

/// Configuration errors raised before any mining work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MiningError {
    /// The relative support threshold must lie in (0, 1].
    #[error("min_support must be in (0, 1], got {0}")]
    InvalidSupport(f64),

    /// Apriori decay must be a finite, non-negative amount.
    #[error("decay must be finite and non-negative, got {0}")]
    InvalidDecay(f64),

    #[error("max_len must be at least 1")]
    InvalidMaxLen,
}

pub type Result<T> = std::result::Result<T, MiningError>;

use crate::{
    error::{MiningError, Result},
    types::ItemsetLength,
};

/// Knobs shared by every mining strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningConfig {
    /// Relative support threshold in (0, 1].
    pub min_support: f64,
    /// Longest itemset to report. `None` mines until nothing survives.
    pub max_len: Option<ItemsetLength>,
    /// Count candidates and intersect join pairs on the rayon pool.
    pub parallel: bool,
}

impl MiningConfig {
    pub fn new(min_support: f64) -> Self {
        Self {
            min_support,
            max_len: None,
            parallel: false,
        }
    }

    pub fn max_len(mut self, max_len: ItemsetLength) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_support(self.min_support)?;
        if self.max_len == Some(0) {
            return Err(MiningError::InvalidMaxLen);
        }
        Ok(())
    }

    /// Whether itemsets of `len` items may still be reported.
    pub fn allows_len(&self, len: ItemsetLength) -> bool {
        self.max_len.map_or(true, |max| len <= max)
    }
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self::new(0.5)
    }
}

pub(crate) fn validate_support(min_support: f64) -> Result<()> {
    // NaN fails both comparisons
    if min_support > 0.0 && min_support <= 1.0 {
        Ok(())
    } else {
        Err(MiningError::InvalidSupport(min_support))
    }
}

pub(crate) fn validate_decay(decay: f64) -> Result<()> {
    if decay.is_finite() && decay >= 0.0 {
        Ok(())
    } else {
        Err(MiningError::InvalidDecay(decay))
    }
}

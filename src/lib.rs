//! Frequent itemset mining.
//!
//! Three interchangeable strategies find every itemset whose support meets a
//! relative threshold:
//!
//! - [`Apriori`]: level-wise candidate generation with full transaction scans.
//! - [`FpGrowth`]: recursive mining of a compressed prefix tree.
//! - [`Eclat`]: intersection of per-itemset transaction-id sets.
//!
//! ```
//! use freqsets::{Eclat, FpGrowth, Miner};
//!
//! let transactions = vec![vec!["a", "b", "c"], vec!["a", "b"], vec!["a", "c"], vec!["a"]];
//! let frequent = FpGrowth::new(0.5).mine(&transactions).unwrap();
//!
//! assert_eq!(frequent.support(&["a", "b"]), 2);
//! assert_eq!(frequent, Eclat::new(0.5).mine(&transactions).unwrap());
//! ```

pub mod combi;
pub mod config;
pub mod error;
pub mod inventory;
pub mod itemsets;
pub mod miner;
pub mod support;
pub mod types;

#[cfg(feature = "python")]
mod wrapper;

pub use config::MiningConfig;
pub use error::{MiningError, Result};
pub use itemsets::{apriori::Apriori, eclat::Eclat, fpgrowth::FpGrowth};
pub use miner::Miner;
pub use types::{FrequencyTable, FrequentItemsets, Item};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn freqsets(_py: Python, m: &PyModule) -> PyResult<()> {
    use crate::wrapper::*;

    m.add_function(wrap_pyfunction!(apriori, m)?)?;
    m.add_function(wrap_pyfunction!(fpgrowth, m)?)?;
    m.add_function(wrap_pyfunction!(eclat, m)?)?;
    Ok(())
}

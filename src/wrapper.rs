use crate::{Apriori, Eclat, FpGrowth, MiningError};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyTuple};

type PyItemName = String;
type PyTransactions = Vec<Vec<PyItemName>>;

impl From<MiningError> for PyErr {
    fn from(err: MiningError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Frequent itemsets level by level, as `(itemsets, supports)` pairs.
#[pyfunction]
#[pyo3(text_signature = "(transactions, min_support, decay=0.0)")]
#[args(decay = "0.0")]
pub fn apriori(
    transactions: PyTransactions,
    min_support: f64,
    decay: f64,
) -> PyResult<Vec<(Vec<Vec<PyItemName>>, Vec<usize>)>> {
    let levels = Apriori::fit(&transactions, min_support, decay)?;
    Ok(levels
        .into_iter()
        .map(|table| (table.itemsets, table.supports))
        .collect())
}

/// Frequent itemsets as a dict keyed by item tuples.
#[pyfunction]
#[pyo3(text_signature = "(transactions, min_support)")]
pub fn fpgrowth(py: Python, transactions: PyTransactions, min_support: f64) -> PyResult<Py<PyDict>> {
    let patterns = FpGrowth::fit(&transactions, min_support)?;
    let dict = PyDict::new(py);
    for (itemset, support) in patterns {
        dict.set_item(PyTuple::new(py, itemset), support)?;
    }
    Ok(dict.into())
}

/// Frequent itemsets as a list of `(items, support)` tuples.
#[pyfunction]
#[pyo3(text_signature = "(transactions, min_support)")]
pub fn eclat(
    transactions: PyTransactions,
    min_support: f64,
) -> PyResult<Vec<(Vec<PyItemName>, usize)>> {
    Ok(Eclat::fit(&transactions, min_support)?)
}

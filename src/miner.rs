use crate::{
    error::Result,
    types::{FrequentItemsets, Item},
};

/// A frequent itemset mining strategy.
///
/// Every strategy produces the same itemsets with the same supports for the
/// same input; they only differ in how much time and memory they spend.
pub trait Miner {
    fn mine<I: Item>(&self, transactions: &[Vec<I>]) -> Result<FrequentItemsets<I>>;
}

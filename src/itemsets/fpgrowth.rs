use crate::{
    config::MiningConfig,
    error::Result,
    inventory::Inventory,
    itemsets::fptree::FpTree,
    miner::Miner,
    support::Threshold,
    types::{FrequentItemsets, Item, ItemId, Itemset, ItemsetCounts},
};
use itertools::Itertools;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Pattern growth over a prefix tree.
///
/// The transactions are compressed into an [`FpTree`]. Mining a tree reports
/// each of its items joined with the current suffix, then mines the
/// conditional tree built from that item's prefix paths with the item added to
/// the suffix. A tree that is a single path is finished directly by listing
/// the combinations of its items.
///
/// Keys of the result list the items in mining order: the item found in the
/// deepest conditional tree first, the outermost one last.
#[derive(Debug, Clone)]
pub struct FpGrowth {
    config: MiningConfig,
}

impl FpGrowth {
    pub fn new(min_support: f64) -> Self {
        Self::with_config(MiningConfig::new(min_support))
    }

    pub fn with_config(config: MiningConfig) -> Self {
        Self { config }
    }

    pub fn fit<I: Item>(transactions: &[Vec<I>], min_support: f64) -> Result<HashMap<Vec<I>, usize>> {
        Self::new(min_support).run(transactions)
    }

    pub fn run<I: Item>(&self, raw_transactions: &[Vec<I>]) -> Result<HashMap<Vec<I>, usize>> {
        self.config.validate()?;

        let (inventory, transactions) = Inventory::encode(raw_transactions);
        if transactions.is_empty() {
            return Ok(HashMap::new());
        }

        let threshold = Threshold::from_ratio(self.config.min_support, transactions.len());
        let tree = FpTree::from_transactions(&transactions, threshold);
        debug!(
            num_transactions = transactions.len(),
            distinct_items = inventory.len(),
            min_count = threshold.min_count(),
            frequent_items = tree.items().len(),
            nodes = tree.num_nodes(),
            "Built prefix tree"
        );

        let patterns = self.mine_tree(tree, threshold);
        debug!(patterns = patterns.len(), "Mined prefix tree");

        Ok(patterns
            .into_iter()
            .map(|(itemset, support)| (inventory.decode(&itemset), support))
            .collect())
    }

    /// Mines `tree` and all conditional trees below it.
    ///
    /// Pending trees sit on an explicit stack, so the depth of the search does
    /// not grow the call stack.
    fn mine_tree(&self, tree: FpTree, threshold: Threshold) -> ItemsetCounts {
        let mut patterns: ItemsetCounts = HashMap::new();
        let mut pending: Vec<(FpTree, Itemset)> = vec![(tree, Vec::new())];

        while let Some((tree, suffix)) = pending.pop() {
            if let Some(path) = tree.single_path() {
                trace!(path_len = path.len(), suffix_len = suffix.len(), "Single path");
                for (itemset, support) in self.path_combinations(&tree, &path, &suffix, threshold) {
                    merge_pattern(&mut patterns, itemset, support);
                }
                continue;
            }

            for &item in tree.items().iter().rev() {
                let mut pattern = Vec::with_capacity(suffix.len() + 1);
                pattern.push(item);
                pattern.extend_from_slice(&suffix);
                merge_pattern(&mut patterns, pattern.clone(), tree.support(item));

                if !self.config.allows_len(pattern.len() + 1) {
                    continue;
                }

                let base = tree.conditional_base(item);
                if base.is_empty() {
                    continue;
                }
                let conditional = FpTree::build(&base, threshold);
                if !conditional.is_empty() {
                    pending.push((conditional, pattern));
                }
            }
        }

        patterns
    }

    /// Every non-empty combination of `path` followed by `suffix`, supported by
    /// the least frequent item chosen.
    fn path_combinations(
        &self,
        tree: &FpTree,
        path: &[ItemId],
        suffix: &[ItemId],
        threshold: Threshold,
    ) -> Vec<(Itemset, usize)> {
        let max_size = self
            .config
            .max_len
            .map_or(path.len(), |max| max.saturating_sub(suffix.len()).min(path.len()));

        (1..=max_size)
            .flat_map(|size| path.iter().copied().combinations(size))
            .filter_map(|combi| {
                let support = combi.iter().map(|&item| tree.support(item)).min()?;
                if !threshold.admits(support) {
                    return None;
                }
                let mut itemset = combi;
                itemset.extend_from_slice(suffix);
                Some((itemset, support))
            })
            .collect()
    }
}

/// Adds `support` to the pattern's tally; a pattern reached twice sums both.
fn merge_pattern(patterns: &mut ItemsetCounts, itemset: Itemset, support: usize) {
    *patterns.entry(itemset).or_insert(0) += support;
}

impl Miner for FpGrowth {
    fn mine<I: Item>(&self, transactions: &[Vec<I>]) -> Result<FrequentItemsets<I>> {
        Ok(self.run(transactions)?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn sorted_keys<I: Item>(patterns: HashMap<Vec<I>, usize>) -> HashMap<Vec<I>, usize> {
        patterns
            .into_iter()
            .map(|(mut itemset, support)| {
                itemset.sort_unstable();
                (itemset, support)
            })
            .collect()
    }

    #[test]
    fn mines_branching_tree() {
        let transactions = vec![vec!["a", "b", "c"], vec!["a", "b"], vec!["a", "c"], vec!["a"]];
        let patterns = FpGrowth::fit(&transactions, 0.5).unwrap();

        assert_eq!(
            sorted_keys(patterns),
            hashmap! {
                vec!["a"] => 4,
                vec!["b"] => 2,
                vec!["c"] => 2,
                vec!["a", "b"] => 2,
                vec!["a", "c"] => 2,
            }
        );
    }

    #[test]
    fn keys_put_suffix_last() {
        let transactions = vec![vec!["a", "b", "c"], vec!["a", "b"], vec!["a", "c"], vec!["a"]];
        let patterns = FpGrowth::fit(&transactions, 0.5).unwrap();

        // a is above b and c in the tree, so it is mined inside their conditional trees
        assert_eq!(patterns.get(&vec!["a", "b"]), Some(&2));
        assert_eq!(patterns.get(&vec!["a", "c"]), Some(&2));
    }

    #[test]
    fn single_path_lists_all_combinations() {
        let transactions = vec![vec![1, 2, 3], vec![1, 2, 3], vec![1, 2]];
        let patterns = FpGrowth::fit(&transactions, 0.5).unwrap();

        assert_eq!(
            sorted_keys(patterns),
            hashmap! {
                vec![1] => 3,
                vec![2] => 3,
                vec![3] => 2,
                vec![1, 2] => 3,
                vec![1, 3] => 2,
                vec![2, 3] => 2,
                vec![1, 2, 3] => 2,
            }
        );
    }

    #[test]
    fn max_len_caps_patterns() {
        let transactions = vec![vec![1, 2, 3], vec![1, 2, 3], vec![1, 2], vec![3, 4]];
        let patterns = FpGrowth::with_config(MiningConfig::new(0.25).max_len(2))
            .run(&transactions)
            .unwrap();

        assert!(patterns.keys().all(|itemset| itemset.len() <= 2));
        assert_eq!(sorted_keys(patterns).get(&vec![1, 3]), Some(&2));
    }

    #[test]
    fn single_transaction_full_support() {
        let patterns = FpGrowth::fit(&[vec!["x"]], 1.0).unwrap();
        assert_eq!(patterns, hashmap! { vec!["x"] => 1 });
    }

    #[test]
    fn empty_transactions() {
        let transactions: Vec<Vec<u32>> = vec![];
        assert!(FpGrowth::fit(&transactions, 0.5).unwrap().is_empty());
    }

    #[test]
    fn nothing_frequent() {
        // min count is 2, every item occurs once
        let transactions = vec![vec![1], vec![2], vec![3], vec![4]];
        assert!(FpGrowth::fit(&transactions, 0.5).unwrap().is_empty());
    }

    #[test]
    fn small_ratio_floors_to_single_occurrence() {
        let transactions = vec![vec![1], vec![2], vec![3]];
        assert_eq!(
            FpGrowth::fit(&transactions, 0.5).unwrap(),
            hashmap! { vec![1] => 1, vec![2] => 1, vec![3] => 1 }
        );
    }
}

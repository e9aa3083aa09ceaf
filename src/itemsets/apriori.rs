use crate::{
    combi::{has_infrequent_subset, join_step},
    config::{validate_decay, MiningConfig},
    error::Result,
    inventory::Inventory,
    miner::Miner,
    support::{count_candidates, count_items, Threshold},
    types::{FrequencyTable, FrequentItemsets, Item, ItemId, Itemset, Transaction},
};
use itertools::Itertools;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Level-wise candidate generation.
///
/// Level 1 holds the frequent items. Every later level joins the survivors of
/// the previous one into candidates one item longer, counts them with a full
/// pass over the transactions and keeps those meeting the threshold. Mining
/// stops at the first empty level.
///
/// With a non-zero `decay` the relative threshold is lowered by that amount
/// before each level from 2 on, as long as it stays above zero.
#[derive(Debug, Clone)]
pub struct Apriori {
    config: MiningConfig,
    decay: f64,
}

type Level = Vec<(Itemset, usize)>;

impl Apriori {
    pub fn new(min_support: f64) -> Self {
        Self::with_config(MiningConfig::new(min_support))
    }

    pub fn with_config(config: MiningConfig) -> Self {
        Self { config, decay: 0.0 }
    }

    pub fn decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Frequent itemsets grouped by size, level 1 first.
    pub fn fit<I: Item>(
        transactions: &[Vec<I>],
        min_support: f64,
        decay: f64,
    ) -> Result<Vec<FrequencyTable<I>>> {
        Self::new(min_support).decay(decay).run(transactions)
    }

    pub fn run<I: Item>(&self, raw_transactions: &[Vec<I>]) -> Result<Vec<FrequencyTable<I>>> {
        self.config.validate()?;
        validate_decay(self.decay)?;

        let (inventory, transactions) = Inventory::encode(raw_transactions);
        debug!(distinct_items = inventory.len(), "Encoded transactions");
        let levels = self.generate_levels(transactions);

        Ok(levels
            .into_iter()
            .map(|level| {
                let mut table = FrequencyTable::new();
                for (itemset, support) in level {
                    table.push(inventory.decode(&itemset), support);
                }
                table
            })
            .collect())
    }

    fn generate_levels(&self, mut transactions: Vec<Transaction>) -> Vec<Level> {
        let num_transactions = transactions.len();
        let mut ratio = self.config.min_support;
        let mut threshold = Threshold::from_ratio(ratio, num_transactions);

        debug!(
            num_transactions,
            min_count = threshold.min_count(),
            "Counting itemsets of length 1"
        );
        let mut levels = vec![frequent_items(&transactions, threshold)];

        for size in 2.. {
            if !self.config.allows_len(size) {
                break;
            }

            ratio -= self.decay;
            if ratio > 0.0 {
                threshold = Threshold::from_ratio(ratio, num_transactions);
            }

            let prev = &levels[size - 2];
            let candidates = self.generate_candidates(prev);
            if candidates.is_empty() {
                break;
            }

            transactions.retain(|transaction| transaction.len() >= size);
            debug!(
                size,
                candidates = candidates.len(),
                min_count = threshold.min_count(),
                "Counting itemsets of length {}",
                size
            );

            let counts = count_candidates(&candidates, &transactions, self.config.parallel);
            let level: Level = candidates
                .into_iter()
                .zip(counts)
                .filter(|&(_, count)| threshold.admits(count))
                .collect();

            trace!(size, frequent = level.len(), "Pruned level");
            if level.is_empty() {
                break;
            }
            levels.push(level);
        }

        levels
    }

    fn generate_candidates(&self, prev: &[(Itemset, usize)]) -> Vec<Itemset> {
        let candidates = join_step(prev.iter().map(|(itemset, _)| itemset.clone()).collect());

        // A decayed threshold may admit candidates whose subsets failed the
        // stricter threshold of the previous level, so the subset check only
        // holds without decay.
        if self.decay > 0.0 {
            return candidates;
        }

        let frequent: HashSet<&[ItemId]> =
            prev.iter().map(|(itemset, _)| itemset.as_slice()).collect();
        candidates
            .into_iter()
            .filter(|candidate| !has_infrequent_subset(candidate, &frequent))
            .collect()
    }
}

fn frequent_items(transactions: &[Transaction], threshold: Threshold) -> Level {
    let mut item_counts = count_items(transactions);
    threshold.prune(&mut item_counts);
    item_counts
        .into_iter()
        .map(|(item, count)| (vec![item], count))
        .sorted()
        .collect()
}

impl Miner for Apriori {
    fn mine<I: Item>(&self, transactions: &[Vec<I>]) -> Result<FrequentItemsets<I>> {
        Ok(self
            .run(transactions)?
            .into_iter()
            .flat_map(|table| table.itemsets.into_iter().zip(table.supports))
            .collect())
    }
}

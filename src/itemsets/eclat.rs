use crate::{
    combi::join_pairs,
    config::MiningConfig,
    error::Result,
    inventory::Inventory,
    miner::Miner,
    support::Threshold,
    types::{FrequentItemsets, Item, ItemId, Itemset, Transaction},
};
use bitvec::prelude::*;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Transaction indices containing an itemset, one bit per transaction.
pub type TidSet = BitVec;

/// Vertical mining by transaction-id intersection.
///
/// Each frequent item keeps the set of transactions it occurs in. Itemsets that
/// share all but their last item are joined by intersecting their sets, and the
/// support of the result is the number of transactions left.
#[derive(Debug, Clone)]
pub struct Eclat {
    config: MiningConfig,
}

type Table = Vec<(Itemset, TidSet)>;

impl Eclat {
    pub fn new(min_support: f64) -> Self {
        Self::with_config(MiningConfig::new(min_support))
    }

    pub fn with_config(config: MiningConfig) -> Self {
        Self { config }
    }

    pub fn fit<I: Item>(transactions: &[Vec<I>], min_support: f64) -> Result<Vec<(Vec<I>, usize)>> {
        Self::new(min_support).run(transactions)
    }

    pub fn run<I: Item>(&self, raw_transactions: &[Vec<I>]) -> Result<Vec<(Vec<I>, usize)>> {
        self.config.validate()?;

        let (inventory, transactions) = Inventory::encode(raw_transactions);
        if transactions.is_empty() {
            return Ok(Vec::new());
        }

        let threshold = Threshold::from_ratio(self.config.min_support, transactions.len());
        let mut table = tid_sets(&transactions);
        table.retain(|(_, tids)| threshold.admits(tids.count_ones()));
        debug!(
            num_transactions = transactions.len(),
            distinct_items = inventory.len(),
            min_count = threshold.min_count(),
            frequent_items = table.len(),
            "Built transaction-id sets"
        );

        let mut frequent = collect_supports(&table);
        let mut size = 1;
        while !table.is_empty() && self.config.allows_len(size + 1) {
            table = self.join(table, threshold);
            size += 1;
            debug!(size, frequent = table.len(), "Joined transaction-id sets");
            frequent.extend(collect_supports(&table));
        }

        Ok(frequent
            .into_iter()
            .map(|(itemset, support)| (inventory.decode(&itemset), support))
            .collect())
    }

    /// Joins every pair sharing a prefix and keeps the frequent intersections.
    fn join(&self, mut table: Table, threshold: Threshold) -> Table {
        // join_pairs indexes into sorted order
        table.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        let (itemsets, tids): (Vec<Itemset>, Vec<TidSet>) = table.into_iter().unzip();
        let (_, pairs) = join_pairs(itemsets);

        let intersect = |(a, b, candidate): (usize, usize, Itemset)| {
            let mut shared = tids[a].clone();
            shared &= tids[b].as_bitslice();
            threshold
                .admits(shared.count_ones())
                .then(|| (candidate, shared))
        };

        if self.config.parallel {
            pairs.into_par_iter().filter_map(intersect).collect()
        } else {
            pairs.into_iter().filter_map(intersect).collect()
        }
    }
}

/// One set per item, indexed by transaction position.
fn tid_sets(transactions: &[Transaction]) -> Table {
    let mut sets: HashMap<ItemId, TidSet> = HashMap::new();
    for (tid, transaction) in transactions.iter().enumerate() {
        for &item in transaction {
            sets.entry(item)
                .or_insert_with(|| bitvec![0; transactions.len()])
                .set(tid, true);
        }
    }

    let mut table: Table = sets
        .into_iter()
        .map(|(item, tids)| (vec![item], tids))
        .collect();
    table.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    table
}

fn collect_supports(table: &[(Itemset, TidSet)]) -> Vec<(Itemset, usize)> {
    table
        .iter()
        .map(|(itemset, tids)| (itemset.clone(), tids.count_ones()))
        .collect()
}

impl Miner for Eclat {
    fn mine<I: Item>(&self, transactions: &[Vec<I>]) -> Result<FrequentItemsets<I>> {
        Ok(self.run(transactions)?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn as_map<I: Item>(frequent: Vec<(Vec<I>, usize)>) -> HashMap<Vec<I>, usize> {
        frequent
            .into_iter()
            .map(|(mut itemset, support)| {
                itemset.sort_unstable();
                (itemset, support)
            })
            .collect()
    }

    #[test]
    fn tid_sets_mark_positions() {
        let transactions = vec![vec![0, 1], vec![1], vec![0, 2]];
        let table = tid_sets(&transactions);

        assert_eq!(table.len(), 3);
        assert_eq!(table[0].0, vec![0]);
        assert_eq!(table[0].1.iter_ones().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(table[1].1.iter_ones().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(table[2].1.iter_ones().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn join_intersects_sets() {
        let transactions = vec![vec![0, 1], vec![0, 1], vec![0, 2], vec![1, 2]];
        let table = tid_sets(&transactions);
        let joined = Eclat::new(0.5).join(table, Threshold::from_count(2));

        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].0, vec![0, 1]);
        assert_eq!(joined[0].1.iter_ones().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn mines_scenario() {
        let transactions = vec![vec!["a", "b", "c"], vec!["a", "b"], vec!["a", "c"], vec!["a"]];
        let frequent = Eclat::fit(&transactions, 0.5).unwrap();

        assert_eq!(
            as_map(frequent),
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
    fn itemsets_grow_by_one_per_round() {
        let transactions = vec![vec![1, 2, 3, 4]; 3];
        let frequent = Eclat::fit(&transactions, 1.0).unwrap();

        assert_eq!(frequent.len(), 15);
        assert!(frequent.iter().all(|&(_, support)| support == 3));
        // reported size by size
        assert!(frequent
            .windows(2)
            .all(|pair| pair[0].0.len() <= pair[1].0.len()));
    }

    #[test]
    fn parallel_join_matches_sequential() {
        let transactions = vec![vec![1, 2, 3], vec![1, 2], vec![2, 3], vec![1, 3], vec![1, 2, 3]];
        let config = MiningConfig::new(0.4);
        let sequential = Eclat::with_config(config.clone()).run(&transactions).unwrap();
        let parallel = Eclat::with_config(config.parallel(true)).run(&transactions).unwrap();

        assert_eq!(as_map(sequential), as_map(parallel));
    }

    #[test]
    fn max_len_stops_joining() {
        let transactions = vec![vec![1, 2, 3, 4]; 2];
        let frequent = Eclat::with_config(MiningConfig::new(1.0).max_len(1))
            .run(&transactions)
            .unwrap();

        assert_eq!(frequent.len(), 4);
    }

    #[test]
    fn empty_transactions() {
        let transactions: Vec<Vec<&str>> = vec![];
        assert!(Eclat::fit(&transactions, 0.3).unwrap().is_empty());
    }
}

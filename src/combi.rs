use itertools::Itertools;
use std::collections::HashSet;

use crate::types::{ItemId, Itemset};

/// Joins sorted k-itemsets that share their first k-1 items into sorted
/// (k+1)-itemsets. Each joinable pair is reported once as
/// `(index_a, index_b, joined)` with `index_a < index_b`, indices into the
/// sorted order of `itemsets`, which is returned alongside.
///
/// https://github.com/tommyod/Efficient-Apriori/blob/master/efficient_apriori/itemsets.py
pub fn join_pairs(mut itemsets: Vec<Itemset>) -> (Vec<Itemset>, Vec<(usize, usize, Itemset)>) {
    itemsets.sort_unstable();

    let mut joined = Vec::new();
    let mut i = 0;
    while i < itemsets.len() {
        let prefix = prefix_of(&itemsets[i]);
        // itemsets sharing a prefix are contiguous once sorted
        let block_end = (i + 1..itemsets.len())
            .find(|&j| prefix_of(&itemsets[j]) != prefix)
            .unwrap_or_else(|| itemsets.len());

        for (a, b) in (i..block_end).tuple_combinations() {
            if let (Some(&last_a), Some(&last_b)) = (itemsets[a].last(), itemsets[b].last()) {
                let mut candidate = Vec::with_capacity(prefix.len() + 2);
                candidate.extend_from_slice(prefix);
                candidate.push(last_a);
                candidate.push(last_b);
                joined.push((a, b, candidate));
            }
        }

        i = block_end;
    }

    (itemsets, joined)
}

/// Candidate itemsets only, see [`join_pairs`].
pub fn join_step(itemsets: Vec<Itemset>) -> Vec<Itemset> {
    let (_, joined) = join_pairs(itemsets);
    joined.into_iter().map(|(_, _, candidate)| candidate).collect()
}

fn prefix_of(itemset: &[ItemId]) -> &[ItemId] {
    &itemset[..itemset.len().saturating_sub(1)]
}

/// True when dropping any single item from `candidate` gives an itemset that is
/// not in `frequent`. The two subsets that formed the candidate are skipped.
pub fn has_infrequent_subset(candidate: &[ItemId], frequent: &HashSet<&[ItemId]>) -> bool {
    if candidate.len() <= 2 {
        return false;
    }
    let mut subset: Itemset = Vec::with_capacity(candidate.len() - 1);
    (0..candidate.len() - 2).any(|skip| {
        subset.clear();
        subset.extend(
            candidate
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &item)| item),
        );
        !frequent.contains(subset.as_slice())
    })
}

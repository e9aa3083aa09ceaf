//! Support counting and threshold pruning shared by all strategies.

use crate::types::{ItemCounts, ItemId, Itemset, Transaction};
use rayon::prelude::*;
use std::{collections::HashMap, hash::Hash};

/// Absolute minimum support count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    min_count: usize,
}

impl Threshold {
    /// `floor(ratio * num_transactions)`, never below 1 so an itemset has to
    /// occur at least once to qualify.
    pub fn from_ratio(ratio: f64, num_transactions: usize) -> Self {
        let min_count = (ratio * num_transactions as f64).floor() as usize;
        Self::from_count(min_count)
    }

    pub fn from_count(min_count: usize) -> Self {
        Self {
            min_count: min_count.max(1),
        }
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }

    pub fn admits(&self, count: usize) -> bool {
        count >= self.min_count
    }

    /// Drops every entry whose count is below the threshold. Works on item
    /// counts as well as itemset tables of any item type.
    pub fn prune<K: Eq + Hash>(&self, counts: &mut HashMap<K, usize>) {
        counts.retain(|_, &mut count| self.admits(count));
    }
}

/// Occurrences of every item across `transactions`.
pub fn count_items(transactions: &[Transaction]) -> ItemCounts {
    let mut item_counts = HashMap::new();
    for transaction in transactions {
        for &item in transaction {
            *item_counts.entry(item).or_insert(0) += 1;
        }
    }
    item_counts
}

/// Both slices must be sorted ascending.
pub fn is_subset(candidate: &[ItemId], transaction: &[ItemId]) -> bool {
    if candidate.len() > transaction.len() {
        return false;
    }
    let mut rest = transaction.iter();
    candidate
        .iter()
        .all(|item| rest.by_ref().any(|other| other == item))
}

fn count_one(candidate: &[ItemId], transactions: &[Transaction]) -> usize {
    transactions
        .iter()
        .filter(|transaction| is_subset(candidate, transaction))
        .count()
}

/// Number of transactions containing each candidate, index aligned with
/// `candidates`.
pub fn count_candidates(
    candidates: &[Itemset],
    transactions: &[Transaction],
    parallel: bool,
) -> Vec<usize> {
    if parallel {
        candidates
            .par_iter()
            .map(|candidate| count_one(candidate, transactions))
            .collect()
    } else {
        candidates
            .iter()
            .map(|candidate| count_one(candidate, transactions))
            .collect()
    }
}

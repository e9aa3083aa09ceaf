use std::{
    collections::{BTreeMap, HashMap},
    fmt::Debug,
    hash::Hash,
    iter::FromIterator,
};

/// Anything that can be mined: compared, hashed and cloned.
pub trait Item: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> Item for T {}

pub type ItemId = usize;
pub type Itemset = Vec<ItemId>;

/// Sorted, duplicate-free item ids of one transaction.
pub type Transaction = Vec<ItemId>;

pub type ItemCounts = HashMap<ItemId, usize>;
pub type ItemsetCounts = HashMap<Itemset, usize>;

pub type ItemsetLength = usize;

/// One Apriori level: itemsets of a single size and their supports, index aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<I> {
    pub itemsets: Vec<Vec<I>>,
    pub supports: Vec<usize>,
}

impl<I> FrequencyTable<I> {
    pub fn new() -> Self {
        Self {
            itemsets: Vec::new(),
            supports: Vec::new(),
        }
    }

    pub fn push(&mut self, itemset: Vec<I>, support: usize) {
        self.itemsets.push(itemset);
        self.supports.push(support);
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }
}

impl<I> Default for FrequencyTable<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Order independent result table shared by every strategy.
///
/// Keys are itemsets sorted by the item's own `Ord`, so two tables compare
/// equal iff they hold the same itemsets with the same supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentItemsets<I: Item> {
    counts: BTreeMap<Vec<I>, usize>,
}

impl<I: Item> FrequentItemsets<I> {
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Adds `support` to the itemset's tally; absent itemsets start at zero.
    pub fn add(&mut self, mut itemset: Vec<I>, support: usize) {
        itemset.sort_unstable();
        *self.counts.entry(itemset).or_insert(0) += support;
    }

    /// Support of `itemset` in any item order, 0 when it is not frequent.
    pub fn support(&self, itemset: &[I]) -> usize {
        let mut key = itemset.to_vec();
        key.sort_unstable();
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn contains(&self, itemset: &[I]) -> bool {
        self.support(itemset) > 0
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Vec<I>, usize)> {
        self.counts.iter().map(|(itemset, &count)| (itemset, count))
    }

    /// Itemsets of exactly `len` items.
    pub fn of_len(&self, len: ItemsetLength) -> impl Iterator<Item = (&Vec<I>, usize)> {
        self.iter().filter(move |(itemset, _)| itemset.len() == len)
    }

    pub fn max_len(&self) -> ItemsetLength {
        self.counts.keys().map(Vec::len).max().unwrap_or(0)
    }
}

impl<I: Item> Default for FrequentItemsets<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Item> FromIterator<(Vec<I>, usize)> for FrequentItemsets<I> {
    fn from_iter<T: IntoIterator<Item = (Vec<I>, usize)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (itemset, support) in iter {
            table.add(itemset, support);
        }
        table
    }
}

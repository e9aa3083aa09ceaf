use crate::{
    support::Threshold,
    types::{ItemId, Itemset},
};
use std::{cmp::Reverse, collections::HashMap};

pub type NodeId = usize;

/// A path through the tree together with how many transactions follow it.
pub type WeightedPath = (Itemset, usize);

#[derive(Debug, Clone)]
pub struct FpNode {
    pub item: Option<ItemId>,
    pub count: usize,
    pub parent: Option<NodeId>,
    pub children: HashMap<ItemId, NodeId>,
}

impl FpNode {
    fn new_root() -> Self {
        Self {
            item: None,
            count: 0,
            parent: None,
            children: HashMap::new(),
        }
    }

    fn new_item(item: ItemId, count: usize, parent: NodeId) -> Self {
        Self {
            item: Some(item),
            count,
            parent: Some(parent),
            children: HashMap::new(),
        }
    }
}

/// Every node holding one item, plus the item's support in the tree.
#[derive(Debug, Clone, Default)]
pub struct HeaderEntry {
    pub support: usize,
    pub nodes: Vec<NodeId>,
}

/// Prefix tree over frequent items.
///
/// Nodes live in an arena and point at their parent by index; ownership runs
/// root to leaf through `children`. Transactions are inserted with items in
/// descending support, ties going to the lower id, so every path in the tree
/// follows the same total order.
#[derive(Debug, Clone)]
pub struct FpTree {
    nodes: Vec<FpNode>,
    header: HashMap<ItemId, HeaderEntry>,
    order: Vec<ItemId>,
}

const ROOT: NodeId = 0;

impl FpTree {
    /// Builds a tree from weighted paths, dropping items `threshold` rejects.
    /// Paths left empty after pruning are skipped.
    pub fn build(paths: &[WeightedPath], threshold: Threshold) -> Self {
        let mut supports: HashMap<ItemId, usize> = HashMap::new();
        for (path, weight) in paths {
            for &item in path {
                *supports.entry(item).or_insert(0) += weight;
            }
        }
        supports.retain(|_, &mut support| threshold.admits(support));

        let mut order: Vec<ItemId> = supports.keys().copied().collect();
        order.sort_unstable_by_key(|item| (Reverse(supports[item]), *item));
        let rank: HashMap<ItemId, usize> = order
            .iter()
            .enumerate()
            .map(|(rank, &item)| (item, rank))
            .collect();

        let mut tree = Self {
            nodes: vec![FpNode::new_root()],
            header: supports
                .iter()
                .map(|(&item, &support)| {
                    (
                        item,
                        HeaderEntry {
                            support,
                            nodes: Vec::new(),
                        },
                    )
                })
                .collect(),
            order,
        };

        let mut filtered: Itemset = Vec::new();
        for (path, weight) in paths {
            filtered.clear();
            filtered.extend(path.iter().copied().filter(|item| rank.contains_key(item)));
            if filtered.is_empty() {
                continue;
            }
            filtered.sort_unstable_by_key(|item| rank[item]);
            tree.insert(&filtered, *weight);
        }

        tree
    }

    /// Builds a tree from plain transactions, each counting once.
    pub fn from_transactions(transactions: &[Itemset], threshold: Threshold) -> Self {
        let paths: Vec<WeightedPath> = transactions
            .iter()
            .map(|transaction| (transaction.clone(), 1))
            .collect();
        Self::build(&paths, threshold)
    }

    fn insert(&mut self, path: &[ItemId], weight: usize) {
        let mut current = ROOT;

        for &item in path {
            if let Some(&child) = self.nodes[current].children.get(&item) {
                self.nodes[child].count += weight;
                current = child;
            } else {
                let child = self.nodes.len();
                self.nodes.push(FpNode::new_item(item, weight, current));
                self.nodes[current].children.insert(item, child);
                self.header.entry(item).or_default().nodes.push(child);
                current = child;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn node(&self, id: NodeId) -> &FpNode {
        &self.nodes[id]
    }

    /// Frequent items of the tree, most frequent first.
    pub fn items(&self) -> &[ItemId] {
        &self.order
    }

    /// Support of `item` in this tree; 0 for items it does not hold.
    pub fn support(&self, item: ItemId) -> usize {
        self.header.get(&item).map_or(0, |entry| entry.support)
    }

    pub fn header(&self, item: ItemId) -> Option<&HeaderEntry> {
        self.header.get(&item)
    }

    /// The items from the root down when no node branches, `None` otherwise.
    pub fn single_path(&self) -> Option<Itemset> {
        let mut path = Vec::new();
        let mut current = &self.nodes[ROOT];

        loop {
            let mut children = current.children.values();
            let child = match (children.next(), children.next()) {
                (None, _) => return Some(path),
                (Some(&child), None) => child,
                (Some(_), Some(_)) => return None,
            };
            current = &self.nodes[child];
            path.extend(current.item);
        }
    }

    /// Prefix paths leading to each occurrence of `item`, root side first,
    /// weighted by the occurrence's count. Occurrences hanging directly off the
    /// root have an empty prefix and are left out.
    pub fn conditional_base(&self, item: ItemId) -> Vec<WeightedPath> {
        let occurrences = match self.header.get(&item) {
            Some(entry) => &entry.nodes,
            None => return Vec::new(),
        };

        occurrences
            .iter()
            .filter_map(|&id| {
                let mut path = Vec::new();
                let mut current = self.nodes[id].parent;

                while let Some(parent) = current {
                    let node = &self.nodes[parent];
                    path.extend(node.item);
                    current = node.parent;
                }

                path.reverse();
                (!path.is_empty()).then(|| (path, self.nodes[id].count))
            })
            .collect()
    }
}

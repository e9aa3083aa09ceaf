use crate::types::{Item, ItemId, Transaction};
use std::collections::HashMap;

const APPROX_NUM_UNIQUE_ITEMS: usize = 1024; // arbitrary

/// Two-way mapping between caller items and dense ids.
///
/// Ids are handed out in order of first appearance, scanning transactions in
/// input order and items in their given order. Ascending id is the canonical
/// itemset order every strategy joins on.
#[derive(Debug)]
pub struct Inventory<I> {
    items: Vec<I>,
    reverse_lookup: HashMap<I, ItemId>,
}

impl<I: Item> Inventory<I> {
    /// Interns every item and returns the transactions as sorted id lists.
    /// Repeated items within one transaction collapse to one.
    pub fn encode(raw_transactions: &[Vec<I>]) -> (Self, Vec<Transaction>) {
        let mut inventory = Self {
            items: Vec::with_capacity(APPROX_NUM_UNIQUE_ITEMS),
            reverse_lookup: HashMap::with_capacity(APPROX_NUM_UNIQUE_ITEMS),
        };

        let transactions = raw_transactions
            .iter()
            .map(|raw_transaction| {
                let mut items: Transaction = raw_transaction
                    .iter()
                    .map(|item| inventory.intern(item))
                    .collect();
                items.sort_unstable();
                items.dedup();
                items
            })
            .collect();

        (inventory, transactions)
    }

    fn intern(&mut self, item: &I) -> ItemId {
        if let Some(&id) = self.reverse_lookup.get(item) {
            return id;
        }
        let id = self.items.len();
        self.items.push(item.clone());
        self.reverse_lookup.insert(item.clone(), id);
        id
    }

    pub fn item(&self, id: ItemId) -> &I {
        &self.items[id]
    }

    pub fn decode(&self, itemset: &[ItemId]) -> Vec<I> {
        itemset.iter().map(|&id| self.item(id).clone()).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

//! Shopping basket storage.

use serde::Serialize;

use crate::model::catalog::Product;
use crate::model::error::InvalidOperation;

/// Minimal projection of a product retained for purchase.
///
/// Never a reference into the catalog — the basket survives a catalog
/// reload that drops or reprices the underlying product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasketEntry {
    pub id: String,
    pub title: String,
    pub price: u64,
}

impl BasketEntry {
    /// Projects a purchasable product; `None` when it has no price.
    pub fn project(product: &Product) -> Option<Self> {
        product.price.map(|price| Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price,
        })
    }
}

/// Selected items in insertion order (which is display order).
///
/// The catalog-membership and price checks for an add live in
/// [`crate::model::AppState`]; this store enforces only its own membership
/// rules. The total is recomputed on demand, never cached.
#[derive(Debug, Default)]
pub struct Basket {
    entries: Vec<BasketEntry>,
}

impl Basket {
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Inserts at the end; an id cannot be added twice.
    pub fn insert(&mut self, entry: BasketEntry) -> Result<(), InvalidOperation> {
        if self.contains(&entry.id) {
            return Err(InvalidOperation::AlreadyInBasket { id: entry.id });
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<(), InvalidOperation> {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(position) => {
                self.entries.remove(position);
                Ok(())
            }
            None => Err(InvalidOperation::NotInBasket { id: id.to_string() }),
        }
    }

    /// Empties unconditionally; used after a successful order.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn items(&self) -> &[BasketEntry] {
        &self.entries
    }

    pub fn item_ids(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.id.clone()).collect()
    }

    /// Sum of entry prices; O(n) derived read.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.price).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Product catalog storage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A catalog item as served by the shop API.
///
/// Immutable once loaded; owned exclusively by the [`Catalog`]. A `None`
/// price means the product is not purchasable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Absolute URL after the API client prefixes the configured asset base.
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub price: Option<u64>,
}

/// The catalog map, replaced wholesale on every load.
///
/// Server order is preserved for display; lookups by id are O(1). There is
/// no incremental merge.
#[derive(Debug, Default)]
pub struct Catalog {
    items: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Clears and rebuilds the map from one load cycle.
    ///
    /// Contents are trusted as-is. A duplicate id keeps its first position
    /// and the last value.
    pub fn replace_all(&mut self, products: Vec<Product>) {
        self.items.clear();
        self.index.clear();
        for product in products {
            match self.index.get(&product.id) {
                Some(&position) => self.items[position] = product,
                None => {
                    self.index.insert(product.id.clone(), self.items.len());
                    self.items.push(product);
                }
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    /// All products in display order.
    pub fn products(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//! TCGPlayer Pro dialect: search returns product ids, prices come from a
//! separate inventory call keyed by those ids.

use crate::models::{PriceQuantityPair, StoreResult};
use serde::Deserialize;
use std::collections::HashSet;

/// Search response envelope (`products.items`)
#[derive(Debug, Deserialize, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: ProductPage,
}

#[derive(Debug, Deserialize, Default)]
pub struct ProductPage {
    #[serde(default)]
    pub items: Vec<Product>,
}

/// Product entry from a search response
#[derive(Debug, Deserialize, Clone)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Inventory entry for one product
#[derive(Debug, Deserialize, Clone)]
pub struct InventoryEntry {
    #[serde(rename = "productId")]
    #[serde(default)]
    pub product_id: Option<u64>,
    #[serde(default)]
    pub skus: Vec<Sku>,
}

/// A priced inventory item (condition/printing variant)
#[derive(Debug, Deserialize, Clone)]
pub struct Sku {
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub price: f64,
}

/// Reduce search products plus inventory entries into one result.
///
/// Inventory entries whose product id did not appear in the search results
/// are skipped; skus without positive quantity are skipped.
pub fn reduce(card_name: &str, products: &[Product], inventory: &[InventoryEntry]) -> StoreResult {
    let known_ids: HashSet<u64> = products.iter().map(|p| p.id).collect();

    let mut pairs = Vec::new();
    for entry in inventory {
        match entry.product_id {
            Some(id) if known_ids.contains(&id) => {}
            _ => continue,
        }

        for sku in &entry.skus {
            if sku.quantity > 0 {
                pairs.push(PriceQuantityPair {
                    price: sku.price,
                    quantity: sku.quantity as u64,
                });
            }
        }
    }

    super::consolidate(card_name, &pairs)
}

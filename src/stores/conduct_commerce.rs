//! ConductCommerce dialect: search returns self-contained listings that
//! already carry priced variants, so no inventory call is needed.

use crate::models::{PriceQuantityPair, StoreResult};
use serde::Deserialize;

/// Search response envelope (`result.listings`)
#[derive(Debug, Deserialize, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub result: SearchResult,
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchResult {
    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// A product listing with its priced variants
#[derive(Debug, Deserialize, Clone)]
pub struct Listing {
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// A priced, quantity-bearing sub-item of a listing
#[derive(Debug, Deserialize, Clone)]
pub struct Variant {
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub price: f64,
}

/// Reduce listings into one result, keeping only in-stock variants.
pub fn reduce(card_name: &str, listings: &[Listing]) -> StoreResult {
    let mut pairs = Vec::new();
    for listing in listings {
        for variant in &listing.variants {
            if variant.quantity > 0 {
                pairs.push(PriceQuantityPair {
                    price: variant.price,
                    quantity: variant.quantity as u64,
                });
            }
        }
    }

    super::consolidate(card_name, &pairs)
}

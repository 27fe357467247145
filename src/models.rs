//! Result, record and summary types
//!
//! Internally prices are `Option<f64>` — `None` means not available. The
//! original flat wire shape with its `"n/a"` sentinels is produced only at
//! serialization time by [`CardRecord`].

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Whether a card is in stock at a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    NotAvailable,
}

impl Availability {
    /// Wire representation ("Available" / "n/a")
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::NotAvailable => "n/a",
        }
    }
}

/// A priced, in-stock variant collected while reducing one store's listings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuantityPair {
    pub price: f64,
    pub quantity: u64,
}

/// Consolidated result for one card at one store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreResult {
    pub card_name: String,
    pub availability: Availability,
    /// Lowest in-stock price; `Some` iff availability is `Available`
    pub price: Option<f64>,
    /// Total in-stock quantity across all variants
    pub quantity: u64,
}

impl StoreResult {
    /// Result for a card with no available inventory
    pub fn not_available(card_name: &str) -> Self {
        StoreResult {
            card_name: card_name.to_string(),
            availability: Availability::NotAvailable,
            price: None,
            quantity: 0,
        }
    }
}

/// Price/availability pair for one store within a [`CardRecord`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreQuote {
    pub price: Option<f64>,
    pub availability: Availability,
}

impl StoreQuote {
    pub fn not_available() -> Self {
        StoreQuote {
            price: None,
            availability: Availability::NotAvailable,
        }
    }
}

/// Per-card record merged across every configured store.
///
/// Every configured store has a quote entry; unselected stores carry
/// not-available quotes. `lowest_price` is the minimum numeric quote among
/// selected stores, and `lowest_price_store` is the store achieving it.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRecord {
    pub card_name: String,
    pub quotes: BTreeMap<String, StoreQuote>,
    pub lowest_price: Option<f64>,
    pub lowest_price_store: Option<String>,
    /// Set when per-card processing failed and the record was blanked
    pub error: Option<String>,
}

impl CardRecord {
    /// All-not-available record carrying an error annotation
    pub fn error_record<'a, I>(card_name: &str, store_keys: I, error: String) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let quotes = store_keys
            .into_iter()
            .map(|key| (key.clone(), StoreQuote::not_available()))
            .collect();

        CardRecord {
            card_name: card_name.to_string(),
            quotes,
            lowest_price: None,
            lowest_price_store: None,
            error: Some(error),
        }
    }
}

impl Serialize for CardRecord {
    /// Flat wire shape: `card_name`, `{key}_price`, `{key}_availability` per
    /// store, `lowest_price`, `lowest_price_store`, and `error` when present.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let extra = usize::from(self.error.is_some());
        let mut map = serializer.serialize_map(Some(3 + self.quotes.len() * 2 + extra))?;

        map.serialize_entry("card_name", &self.card_name)?;

        for (key, quote) in &self.quotes {
            let price_key = format!("{}_price", key);
            match quote.price {
                Some(price) => map.serialize_entry(&price_key, &price)?,
                None => map.serialize_entry(&price_key, "n/a")?,
            }
            map.serialize_entry(&format!("{}_availability", key), quote.availability.as_str())?;
        }

        match self.lowest_price {
            Some(price) => map.serialize_entry("lowest_price", &price)?,
            None => map.serialize_entry("lowest_price", "n/a")?,
        }
        match &self.lowest_price_store {
            Some(store) => map.serialize_entry("lowest_price_store", store)?,
            None => map.serialize_entry("lowest_price_store", "n/a")?,
        }

        if let Some(error) = &self.error {
            map.serialize_entry("error", error)?;
        }

        map.end()
    }
}

/// Per-store batch statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStats {
    pub name: String,
    /// Number of cards with an available numeric price at this store
    pub available: u32,
    /// Sum of this store's prices over those cards
    pub total_price: f64,
}

/// Batch-level summary accumulated over all cards in one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_cards: usize,
    /// Statistics for exactly the selected stores
    pub store_stats: BTreeMap<String, StoreStats>,
    /// Sum of each record's lowest price, where numeric
    pub overall_lowest_total: f64,
}

/// Complete output of one batch request
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub results: Vec<CardRecord>,
    pub summary: BatchSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> CardRecord {
        let mut quotes = BTreeMap::new();
        quotes.insert(
            "a".to_string(),
            StoreQuote {
                price: Some(0.5),
                availability: Availability::Available,
            },
        );
        quotes.insert("b".to_string(), StoreQuote::not_available());

        CardRecord {
            card_name: "Lightning Bolt".to_string(),
            quotes,
            lowest_price: Some(0.5),
            lowest_price_store: Some("a".to_string()),
            error: None,
        }
    }

    #[test]
    fn record_serializes_to_flat_wire_shape() {
        let json = serde_json::to_value(sample_record()).unwrap();

        assert_eq!(json["card_name"], "Lightning Bolt");
        assert_eq!(json["a_price"], 0.5);
        assert_eq!(json["a_availability"], "Available");
        assert_eq!(json["b_price"], "n/a");
        assert_eq!(json["b_availability"], "n/a");
        assert_eq!(json["lowest_price"], 0.5);
        assert_eq!(json["lowest_price_store"], "a");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn record_with_no_prices_serializes_sentinels() {
        let mut record = sample_record();
        record.quotes.insert("a".to_string(), StoreQuote::not_available());
        record.lowest_price = None;
        record.lowest_price_store = None;

        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["a_price"], "n/a");
        assert_eq!(json["lowest_price"], "n/a");
        assert_eq!(json["lowest_price_store"], "n/a");
    }

    #[test]
    fn error_record_serializes_annotation() {
        let keys = vec!["a".to_string(), "b".to_string()];
        let record = CardRecord::error_record("Counterspell", keys.iter(), "boom".to_string());

        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["card_name"], "Counterspell");
        assert_eq!(json["a_price"], "n/a");
        assert_eq!(json["b_availability"], "n/a");
        assert_eq!(json["lowest_price"], "n/a");
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn availability_wire_strings() {
        assert_eq!(Availability::Available.as_str(), "Available");
        assert_eq!(Availability::NotAvailable.as_str(), "n/a");
    }

    #[test]
    fn not_available_store_result() {
        let result = StoreResult::not_available("Brainstorm");
        assert_eq!(result.card_name, "Brainstorm");
        assert_eq!(result.availability, Availability::NotAvailable);
        assert_eq!(result.price, None);
        assert_eq!(result.quantity, 0);
    }

    #[test]
    fn summary_serializes_expected_keys() {
        let mut store_stats = BTreeMap::new();
        store_stats.insert(
            "a".to_string(),
            StoreStats {
                name: "Store A".to_string(),
                available: 1,
                total_price: 2.0,
            },
        );

        let summary = BatchSummary {
            total_cards: 2,
            store_stats,
            overall_lowest_total: 2.0,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_cards"], 2);
        assert_eq!(json["store_stats"]["a"]["name"], "Store A");
        assert_eq!(json["store_stats"]["a"]["available"], 1);
        assert_eq!(json["store_stats"]["a"]["total_price"], 2.0);
        assert_eq!(json["overall_lowest_total"], 2.0);
    }
}

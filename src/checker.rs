//! Cross-store price checking and batch aggregation

use crate::config::{StoreConfig, StoresConfig};
use crate::error::{CheckerError, Result};
use crate::models::{
    BatchReport, BatchSummary, CardRecord, StoreQuote, StoreResult, StoreStats,
};
use crate::stores::{SearchHits, StoreClient, REQUEST_TIMEOUT};
use std::collections::{BTreeMap, HashSet};

/// Checks card prices and availability across the configured stores.
///
/// Constructed once at startup and shared read-only; all store queries within
/// one batch run sequentially in sorted store-key order.
pub struct PriceChecker {
    stores: BTreeMap<String, StoreClient>,
}

impl PriceChecker {
    /// Build a checker from loaded configuration. One HTTP client with a
    /// fixed per-call timeout is shared by all stores.
    pub fn new(config: StoresConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let stores = config
            .stores
            .into_iter()
            .map(|(key, store_config)| (key, StoreClient::new(store_config, http.clone())))
            .collect();

        Ok(PriceChecker { stores })
    }

    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Configured stores in sorted key order
    pub fn store_configs(&self) -> impl Iterator<Item = (&String, &StoreConfig)> {
        self.stores.iter().map(|(key, client)| (key, client.config()))
    }

    /// Split newline-delimited card text into trimmed, non-empty names
    pub fn parse_card_list(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Check one card at one store, returning a single consolidated result.
    ///
    /// An unknown store key is logged and yields a not-available result
    /// without any network call.
    pub async fn check_card(&self, card_name: &str, store_key: &str) -> Result<StoreResult> {
        let Some(store) = self.stores.get(store_key) else {
            log::warn!("Store '{}' not configured", store_key);
            return Ok(StoreResult::not_available(card_name));
        };

        log::info!(
            "Checking prices for '{}' at {}",
            card_name,
            store.config().name
        );

        let hits = store.search(card_name).await?;
        if hits.is_empty() {
            log::info!("No products found for '{}'", card_name);
            return Ok(StoreResult::not_available(card_name));
        }

        match hits {
            // ConductCommerce search responses already carry priced variants
            SearchHits::ConductCommerce(listings) => {
                Ok(crate::stores::conduct_commerce::reduce(card_name, &listings))
            }
            // TCGPlayer Pro needs a second inventory call keyed by product id
            SearchHits::TcgplayerPro(products) => {
                let product_ids: Vec<u64> = products.iter().map(|p| p.id).collect();
                let inventory = store.fetch_inventory(&product_ids).await;
                if inventory.is_empty() {
                    log::info!("No inventory data found for '{}'", card_name);
                    return Ok(StoreResult::not_available(card_name));
                }
                Ok(crate::stores::tcgplayer_pro::reduce(
                    card_name, &products, &inventory,
                ))
            }
        }
    }

    /// Build the merged record for one card: selected stores are queried in
    /// sorted key order, unselected stores get not-available quotes without
    /// querying. A per-card failure replaces the record with an
    /// error-annotated all-not-available one; the batch continues.
    pub async fn check_card_across_stores(
        &self,
        card_name: &str,
        selected: &HashSet<String>,
    ) -> CardRecord {
        match self.try_card_across_stores(card_name, selected).await {
            Ok(record) => record,
            Err(e) => {
                log::error!("Error processing card '{}': {}", card_name, e);
                CardRecord::error_record(card_name, self.stores.keys(), e.to_string())
            }
        }
    }

    async fn try_card_across_stores(
        &self,
        card_name: &str,
        selected: &HashSet<String>,
    ) -> Result<CardRecord> {
        let mut quotes = BTreeMap::new();
        // On a price tie the first store in key order wins (strict `<`).
        let mut lowest: Option<(f64, String)> = None;

        for store_key in self.stores.keys() {
            if !selected.contains(store_key) {
                quotes.insert(store_key.clone(), StoreQuote::not_available());
                continue;
            }

            let result = self.check_card(card_name, store_key).await?;
            if let Some(price) = result.price {
                if lowest.as_ref().map_or(true, |(low, _)| price < *low) {
                    lowest = Some((price, store_key.clone()));
                }
            }
            quotes.insert(
                store_key.clone(),
                StoreQuote {
                    price: result.price,
                    availability: result.availability,
                },
            );
        }

        let (lowest_price, lowest_price_store) = match lowest {
            Some((price, store)) => (Some(price), Some(store)),
            None => (None, None),
        };

        Ok(CardRecord {
            card_name: card_name.to_string(),
            quotes,
            lowest_price,
            lowest_price_store,
            error: None,
        })
    }

    /// Run a full batch: validate the request, then produce one record per
    /// card in input order plus the accumulated summary.
    pub async fn run_batch(
        &self,
        cards_text: &str,
        selected_stores: &[String],
    ) -> Result<BatchReport> {
        let card_names = Self::parse_card_list(cards_text);
        if card_names.is_empty() {
            return Err(CheckerError::NoCards);
        }
        if selected_stores.is_empty() {
            return Err(CheckerError::NoStoresSelected);
        }

        let mut invalid: Vec<String> = selected_stores
            .iter()
            .filter(|key| !self.stores.contains_key(*key))
            .cloned()
            .collect();
        if !invalid.is_empty() {
            invalid.sort();
            invalid.dedup();
            return Err(CheckerError::InvalidStores(invalid));
        }

        let selected: HashSet<String> = selected_stores.iter().cloned().collect();

        let mut store_stats: BTreeMap<String, StoreStats> = selected
            .iter()
            .map(|key| {
                (
                    key.clone(),
                    StoreStats {
                        name: self.stores[key].config().name.clone(),
                        available: 0,
                        total_price: 0.0,
                    },
                )
            })
            .collect();

        let mut results = Vec::with_capacity(card_names.len());
        let mut overall_lowest_total = 0.0;

        for card_name in &card_names {
            let record = self.check_card_across_stores(card_name, &selected).await;

            for (key, stats) in store_stats.iter_mut() {
                let quote = &record.quotes[key];
                if let (Some(price), crate::models::Availability::Available) =
                    (quote.price, quote.availability)
                {
                    stats.available += 1;
                    stats.total_price += price;
                }
            }

            if let Some(lowest) = record.lowest_price {
                overall_lowest_total += lowest;
            }

            results.push(record);
        }

        Ok(BatchReport {
            results,
            summary: BatchSummary {
                total_cards: card_names.len(),
                store_stats,
                overall_lowest_total,
            },
        })
    }
}

#[cfg(test)]
#[path = "checker_tests.rs"]
mod tests;

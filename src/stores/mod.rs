//! Store API clients for the two supported wire dialects

pub mod conduct_commerce;
pub mod tcgplayer_pro;

use crate::config::{StoreConfig, StoreKind};
use crate::error::{CheckerError, Result};
use crate::models::{Availability, PriceQuantityPair, StoreResult};
use std::time::Duration;

/// Per-call timeout for all store requests; no retries.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw search results, tagged by the dialect that produced them
#[derive(Debug)]
pub enum SearchHits {
    TcgplayerPro(Vec<tcgplayer_pro::Product>),
    ConductCommerce(Vec<conduct_commerce::Listing>),
}

impl SearchHits {
    fn empty(kind: StoreKind) -> Self {
        match kind {
            StoreKind::TcgplayerPro => SearchHits::TcgplayerPro(Vec::new()),
            StoreKind::ConductCommerce => SearchHits::ConductCommerce(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SearchHits::TcgplayerPro(products) => products.len(),
            SearchHits::ConductCommerce(listings) => listings.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Client for one configured store.
///
/// Transport failures, HTTP error statuses and malformed response bodies are
/// logged and degraded to empty results; they never abort a batch.
pub struct StoreClient {
    config: StoreConfig,
    http: reqwest::Client,
}

impl StoreClient {
    pub fn new(config: StoreConfig, http: reqwest::Client) -> Self {
        StoreClient { config, http }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Search the store for a card by name.
    ///
    /// The configured payload template is cloned and the card name inserted
    /// into the dialect's query field. A template that is not a JSON object
    /// is a configuration mistake and the one error that propagates.
    pub async fn search(&self, card_name: &str) -> Result<SearchHits> {
        let mut payload = self.config.search_payload.clone();
        let fields = payload
            .as_object_mut()
            .ok_or_else(|| CheckerError::PayloadTemplate(self.config.name.clone()))?;

        let query_field = match self.config.kind {
            StoreKind::TcgplayerPro => "query",
            StoreKind::ConductCommerce => "name",
        };
        fields.insert(query_field.to_string(), serde_json::Value::from(card_name));

        let request = self
            .apply_headers(self.http.post(&self.config.search_url))
            .json(&payload);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Error searching for '{}' at {}: {}", card_name, self.config.name, e);
                return Ok(SearchHits::empty(self.config.kind));
            }
        };

        if !response.status().is_success() {
            log::warn!(
                "Search for '{}' at {} returned HTTP {}",
                card_name,
                self.config.name,
                response.status()
            );
            return Ok(SearchHits::empty(self.config.kind));
        }

        let hits = match self.config.kind {
            StoreKind::TcgplayerPro => match response.json::<tcgplayer_pro::SearchResponse>().await
            {
                Ok(body) => SearchHits::TcgplayerPro(body.products.items),
                Err(e) => {
                    log::warn!("Error parsing search response for '{}': {}", card_name, e);
                    SearchHits::empty(self.config.kind)
                }
            },
            StoreKind::ConductCommerce => {
                match response.json::<conduct_commerce::SearchResponse>().await {
                    Ok(body) => SearchHits::ConductCommerce(body.result.listings),
                    Err(e) => {
                        log::warn!("Error parsing search response for '{}': {}", card_name, e);
                        SearchHits::empty(self.config.kind)
                    }
                }
            }
        };

        log::info!("Found {} product(s) for '{}' at {}", hits.len(), card_name, self.config.name);
        Ok(hits)
    }

    /// Fetch inventory entries for the given product ids (tcgplayer_pro only).
    ///
    /// An empty id list makes no network call. Any failure yields an empty
    /// result.
    pub async fn fetch_inventory(&self, product_ids: &[u64]) -> Vec<tcgplayer_pro::InventoryEntry> {
        if product_ids.is_empty() {
            return Vec::new();
        }

        let Some(inventory_url) = &self.config.inventory_url else {
            log::warn!("Store {} has no inventory endpoint configured", self.config.name);
            return Vec::new();
        };

        let joined = product_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}?productIds={}", inventory_url, joined);

        let response = match self.apply_headers(self.http.get(&url)).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Error getting inventory from {}: {}", self.config.name, e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            log::warn!(
                "Inventory request to {} returned HTTP {}",
                self.config.name,
                response.status()
            );
            return Vec::new();
        }

        match response.json::<Vec<tcgplayer_pro::InventoryEntry>>().await {
            Ok(entries) => {
                log::info!(
                    "Retrieved inventory for {} product(s) from {}",
                    product_ids.len(),
                    self.config.name
                );
                entries
            }
            Err(e) => {
                log::warn!("Error parsing inventory response: {}", e);
                Vec::new()
            }
        }
    }

    fn apply_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        self.config
            .headers
            .iter()
            .fold(request, |request, (key, value)| request.header(key, value))
    }
}

/// Collapse collected pairs into one per-store result: minimum price,
/// summed quantity. The first-encountered pair wins a price tie.
pub fn consolidate(card_name: &str, pairs: &[PriceQuantityPair]) -> StoreResult {
    let Some(first) = pairs.first() else {
        return StoreResult::not_available(card_name);
    };

    let mut lowest = first.price;
    let mut total = 0u64;
    for pair in pairs {
        if pair.price < lowest {
            lowest = pair.price;
        }
        total += pair.quantity;
    }

    StoreResult {
        card_name: card_name.to_string(),
        availability: Availability::Available,
        price: Some(lowest),
        quantity: total,
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

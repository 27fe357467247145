//! Store configuration loading
//!
//! Stores are described in a JSON file keyed by a short store identifier:
//!
//! ```json
//! {
//!     "stores": {
//!         "elegantoctopus": {
//!             "name": "Elegant Octopus",
//!             "type": "tcgplayer_pro",
//!             "search_url": "https://...",
//!             "inventory_url": "https://...",
//!             "headers": { "Content-Type": "application/json" },
//!             "search_payload": { "from": 0, "size": 24 }
//!         }
//!     }
//! }
//! ```

use crate::error::Result;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Wire-format family a store's API speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum StoreKind {
    /// Search returns product ids; prices come from a second inventory call
    #[serde(rename = "tcgplayer_pro")]
    TcgplayerPro,
    /// Search returns self-contained listings with priced variants
    #[serde(rename = "conductcommerce")]
    ConductCommerce,
}

impl StoreKind {
    /// Wire tag used in the config file and the /api/stores response
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::TcgplayerPro => "tcgplayer_pro",
            StoreKind::ConductCommerce => "conductcommerce",
        }
    }
}

/// Immutable descriptor for one configured store
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Human-readable store name
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StoreKind,
    /// Search endpoint (POST)
    pub search_url: String,
    /// Inventory endpoint (GET, tcgplayer_pro stores only)
    #[serde(default)]
    pub inventory_url: Option<String>,
    /// Headers sent on every request to this store
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Payload template cloned for every search; the card name is inserted
    /// into it per dialect
    pub search_payload: serde_json::Value,
}

/// Full store configuration, keyed by short store identifier.
///
/// A BTreeMap keeps store iteration order deterministic (sorted by key).
#[derive(Debug, Clone, Deserialize)]
pub struct StoresConfig {
    pub stores: BTreeMap<String, StoreConfig>,
}

impl StoresConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &str) -> Result<Self> {
        log::info!("Loading store configuration from: {}", path);

        let content = std::fs::read_to_string(path)?;
        let config: StoresConfig = serde_json::from_str(&content)?;

        log::info!("Loaded {} store(s)", config.stores.len());

        Ok(config)
    }
}

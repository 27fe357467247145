//! MTG card price and availability checker
//!
//! Queries configurable store APIs (two supported wire dialects), reduces
//! each store's listings to one price/availability result per card, merges
//! results across the selected stores, and serves the batch API.

pub mod checker;
pub mod config;
pub mod error;
pub mod models;
pub mod stores;
pub mod web;

// Re-export commonly used items
pub use checker::PriceChecker;
pub use config::{StoreConfig, StoreKind, StoresConfig};
pub use error::{CheckerError, Result};
pub use models::{
    Availability, BatchReport, BatchSummary, CardRecord, StoreQuote, StoreResult,
};

//! Error types for the price checker

use std::fmt;

/// Unified error type for price checker operations
#[derive(Debug)]
pub enum CheckerError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse JSON
    Parse(serde_json::Error),
    /// File I/O error
    Io(std::io::Error),
    /// A store's search payload template is not a JSON object
    PayloadTemplate(String),
    /// Batch request contained no card names
    NoCards,
    /// Batch request selected no stores
    NoStoresSelected,
    /// Batch request selected store keys that are not configured
    InvalidStores(Vec<String>),
}

impl fmt::Display for CheckerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckerError::Network(e) => write!(f, "Network error: {}", e),
            CheckerError::Parse(e) => write!(f, "Parse error: {}", e),
            CheckerError::Io(e) => write!(f, "I/O error: {}", e),
            CheckerError::PayloadTemplate(store) => {
                write!(
                    f,
                    "Search payload template for store '{}' is not a JSON object",
                    store
                )
            }
            CheckerError::NoCards => write!(f, "No cards provided"),
            CheckerError::NoStoresSelected => write!(f, "No stores selected"),
            CheckerError::InvalidStores(keys) => {
                write!(f, "Invalid stores: {}", keys.join(", "))
            }
        }
    }
}

impl std::error::Error for CheckerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckerError::Network(e) => Some(e),
            CheckerError::Parse(e) => Some(e),
            CheckerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CheckerError {
    fn from(err: reqwest::Error) -> Self {
        CheckerError::Network(err)
    }
}

impl From<serde_json::Error> for CheckerError {
    fn from(err: serde_json::Error) -> Self {
        CheckerError::Parse(err)
    }
}

impl From<std::io::Error> for CheckerError {
    fn from(err: std::io::Error) -> Self {
        CheckerError::Io(err)
    }
}

/// Result alias for price checker operations
pub type Result<T> = std::result::Result<T, CheckerError>;

impl CheckerError {
    /// Whether the error should be reported to the caller as a bad request
    /// rather than an internal failure.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            CheckerError::NoCards
                | CheckerError::NoStoresSelected
                | CheckerError::InvalidStores(_)
        )
    }
}

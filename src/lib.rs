//! Quill-Enrich: author demographic enrichment for book datasets
//!
//! This crate augments a tabular book/author dataset with inferred author
//! gender and country, resolving each author through a tiered fallback chain:
//! a manual override table, pronoun analysis of the author's scraped
//! biography, and a name-inference API, in that order.

pub mod config;
pub mod country;
pub mod dataset;
pub mod enrich;
pub mod page;

use thiserror::Error;

/// Main error type for Quill-Enrich operations
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] dataset::DatasetError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors surfaced by the page fetch boundary
///
/// Rate limiting (HTTP 429) is handled inside the retry executor and never
/// appears here; the two variants distinguish terminal client errors from
/// transient failures that persisted through every allowed attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Terminal HTTP client error (404 and friends); not retried
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Transient failures (timeout, 5xx, connection error) exhausted retries
    #[error("Giving up on {url} after {attempts} attempts: {reason}")]
    Exhausted {
        url: String,
        attempts: u32,
        reason: String,
    },
}

/// Result type alias for Quill-Enrich operations
pub type Result<T> = std::result::Result<T, EnrichError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use enrich::{Gender, GenderSource, Resolution, Resolver};

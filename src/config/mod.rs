//! Configuration module for Quill-Enrich
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use quill_enrich::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Concurrency cap: {}", config.enrichment.max_concurrent_requests);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, EnrichmentConfig, HttpConfig, InferenceConfig, IoConfig};

// Re-export parser functions
pub use parser::load_config;

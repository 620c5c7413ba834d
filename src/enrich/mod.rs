//! Enrichment resolution engine
//!
//! This module contains the core of the crate:
//! - Origin-level rate limiting
//! - HTTP fetching with bounded retries and backoff
//! - The pronoun heuristic for biography text
//! - The name-inference API client and its per-first-name cache
//! - The tiered fallback resolver with its single-flight author cache
//! - The concurrency scheduler fanning records out and collecting them in order

mod fetcher;
mod heuristic;
mod inference;
mod limiter;
mod resolver;
mod runner;
mod scheduler;

pub use fetcher::{build_http_client, fetch_with_retry, FetchPolicy};
pub use heuristic::{guess_gender, Gender};
pub use inference::{GenderizeClient, Inference};
pub use limiter::RateLimiter;
pub use resolver::{AuthorKey, GenderSource, Resolution, Resolver, AUTHOR_PROFILE_PREFIX};
pub use runner::{run_enrichment, EnrichStats};
pub use scheduler::enrich_records;

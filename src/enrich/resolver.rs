//! The resolution engine: tiered fallback from manual override to bio
//! heuristic to external inference
//!
//! Each author resolves through at most one execution of the chain per run;
//! concurrent resolvers for the same [`AuthorKey`] coordinate through a
//! single-flight cache so only the first performs the expensive path.
//! Failures inside one tier are contained at that tier's boundary and the
//! chain continues; one author's failure can never abort another's task.

use crate::country;
use crate::dataset::ManualOverrides;
use crate::enrich::fetcher::{fetch_with_retry, FetchPolicy};
use crate::enrich::heuristic::{guess_gender, Gender};
use crate::enrich::inference::GenderizeClient;
use crate::enrich::limiter::RateLimiter;
use crate::page;
use crate::FetchError;
use reqwest::Client;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, OnceCell, Semaphore};

/// Author-profile URLs start with this; anything else is treated as a book
/// page that must be fetched to discover the profile link
pub const AUTHOR_PROFILE_PREFIX: &str = "https://www.goodreads.com/author/show";

/// Which tier produced the resolved gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenderSource {
    /// Manual override table
    Manual,

    /// Pronoun analysis of the scraped biography
    BioHeuristic,

    /// Name-inference API above the confidence threshold
    ExternalApi,

    /// Every tier missed; a valid output, not an error
    None,

    /// The resolution task itself could not run
    Error,
}

impl GenderSource {
    /// The string form written to the output dataset
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderSource::Manual => "manual",
            GenderSource::BioHeuristic => "bio_heuristic",
            GenderSource::ExternalApi => "external_api",
            GenderSource::None => "none",
            GenderSource::Error => "error",
        }
    }
}

impl fmt::Display for GenderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The per-author output of the resolution chain
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub gender: Gender,

    /// Standardized country from the born location, when tier 2 extracted one
    pub country: Option<String>,

    pub source: GenderSource,

    /// Only set when the external API tier fired
    pub confidence: Option<f64>,
}

impl Resolution {
    /// All tiers missed
    pub fn none() -> Self {
        Self {
            gender: Gender::Unknown,
            country: None,
            source: GenderSource::None,
            confidence: None,
        }
    }

    /// The resolution task never ran (e.g. task join failure)
    pub fn error() -> Self {
        Self {
            gender: Gender::Unknown,
            country: None,
            source: GenderSource::Error,
            confidence: None,
        }
    }
}

/// Identity used for de-duplication and caching
///
/// The profile URL when the record already carries one, otherwise the display
/// name. Profile URLs are preferred because names collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorKey(String);

impl AuthorKey {
    /// Builds the key for a record's author
    pub fn new(author: &str, link: &str, profile_prefix: &str) -> Self {
        if link.starts_with(profile_prefix) {
            Self(link.to_string())
        } else {
            Self(author.to_string())
        }
    }
}

/// What the bio tier learned from the author's profile page
#[derive(Debug)]
struct BioFindings {
    gender: Gender,
    country: Option<String>,
}

/// Failures inside the bio tier; contained at the tier boundary
#[derive(Debug, Error)]
enum BioError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no author link found on {0}")]
    MissingAuthorLink(String),

    #[error("record has no link")]
    MissingLink,
}

/// The resolution engine
///
/// Owns the per-author single-flight cache, the manual override table, and
/// the admission gate bounding concurrent network work.
pub struct Resolver {
    client: Client,
    site_limiter: Arc<RateLimiter>,
    permits: Semaphore,
    overrides: ManualOverrides,
    inference: GenderizeClient,
    policy: FetchPolicy,
    profile_prefix: String,
    cache: Mutex<HashMap<AuthorKey, Arc<OnceCell<Resolution>>>>,
}

impl Resolver {
    /// Creates a resolver
    ///
    /// `max_concurrent` bounds simultaneously in-flight network operations
    /// across all resolution tasks.
    pub fn new(
        client: Client,
        site_limiter: Arc<RateLimiter>,
        overrides: ManualOverrides,
        inference: GenderizeClient,
        policy: FetchPolicy,
        max_concurrent: usize,
    ) -> Self {
        Self {
            client,
            site_limiter,
            permits: Semaphore::new(max_concurrent),
            overrides,
            inference,
            policy,
            profile_prefix: AUTHOR_PROFILE_PREFIX.to_string(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Overrides the author-profile URL prefix (used by tests against mock
    /// servers)
    pub fn with_profile_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.profile_prefix = prefix.into();
        self
    }

    /// Resolves one author, memoized by [`AuthorKey`]
    ///
    /// The first caller for a key runs the fallback chain; concurrent callers
    /// for the same key await that in-progress result. Never fails: a fully
    /// missed chain is a valid `source=none` resolution.
    pub async fn resolve(&self, author: &str, link: &str) -> Resolution {
        let key = AuthorKey::new(author, link, &self.profile_prefix);

        let cell = {
            let mut cache = self.cache.lock().await;
            Arc::clone(cache.entry(key).or_default())
        };

        cell.get_or_init(|| self.resolve_uncached(author.to_string(), link.to_string()))
            .await
            .clone()
    }

    /// Runs the fallback chain once for an author
    async fn resolve_uncached(&self, author: String, link: String) -> Resolution {
        // Tier 1: manual override, authoritative and network-free
        if let Some(gender) = self.overrides.get(&author) {
            tracing::debug!("Resolved '{}' from manual override", author);
            return Resolution {
                gender,
                country: None,
                source: GenderSource::Manual,
                confidence: None,
            };
        }

        // Everything below is network work; gate it on the global cap.
        // Cache hits and single-flight waiters never reach this point, so
        // they never hold permits.
        let _permit = match self.permits.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                tracing::error!("Admission gate closed while resolving '{}'", author);
                return Resolution::none();
            }
        };

        // Tier 2: biography pronoun heuristic. Country comes out of this
        // tier and is kept for the final result no matter which later tier
        // resolves the gender.
        let mut country = None;
        let mut bio_gender = Gender::Unknown;
        match self.fetch_bio(&link).await {
            Ok(findings) => {
                country = findings.country;
                bio_gender = findings.gender;
            }
            Err(e) => {
                tracing::warn!("Bio tier missed for '{}': {}", author, e);
            }
        }

        if bio_gender != Gender::Unknown {
            tracing::debug!("Resolved '{}' from biography", author);
            return Resolution {
                gender: bio_gender,
                country,
                source: GenderSource::BioHeuristic,
                confidence: None,
            };
        }

        // Tier 3: name-inference API on the lower-cased first name
        if let Some(first_name) = author.split_whitespace().next() {
            if let Some(inference) = self.inference.infer(&first_name.to_lowercase()).await {
                tracing::debug!(
                    "Resolved '{}' from inference API (p={})",
                    author,
                    inference.probability
                );
                return Resolution {
                    gender: inference.gender,
                    country,
                    source: GenderSource::ExternalApi,
                    confidence: Some(inference.probability),
                };
            }
        }

        // Tier 4: all tiers missed
        Resolution {
            gender: Gender::Unknown,
            country,
            source: GenderSource::None,
            confidence: None,
        }
    }

    /// Fetches the author's profile page and extracts gender and country
    ///
    /// Resolves the profile URL through the book page first when the record
    /// link is not already a profile URL.
    async fn fetch_bio(&self, link: &str) -> Result<BioFindings, BioError> {
        if link.trim().is_empty() {
            return Err(BioError::MissingLink);
        }

        let profile_url = if link.starts_with(&self.profile_prefix) {
            link.to_string()
        } else {
            let book_html =
                fetch_with_retry(&self.client, &self.site_limiter, link, &self.policy).await?;
            page::extract_author_link(&book_html)
                .ok_or_else(|| BioError::MissingAuthorLink(link.to_string()))?
        };

        let profile_html =
            fetch_with_retry(&self.client, &self.site_limiter, &profile_url, &self.policy)
                .await?;
        let author_page = page::parse_author_page(&profile_html);

        let gender = author_page
            .bio_text
            .as_deref()
            .map(guess_gender)
            .unwrap_or(Gender::Unknown);

        // Standardize when possible, otherwise keep the raw location text
        let country = author_page.born_location.map(|born| {
            country::extract_country(&born).unwrap_or_else(|| born.trim().to_string())
        });

        Ok(BioFindings { gender, country })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn offline_resolver(overrides: ManualOverrides) -> Resolver {
        // Points at a closed port; any network attempt fails fast and is
        // contained by the tier boundaries.
        let client = Client::new();
        let inference = GenderizeClient::new(
            client.clone(),
            "http://127.0.0.1:9".to_string(),
            0.9,
            Duration::from_millis(0),
        );
        Resolver::new(
            client,
            Arc::new(RateLimiter::new(Duration::from_millis(0))),
            overrides,
            inference,
            FetchPolicy {
                max_attempts: 1,
                backoff_unit: Duration::from_millis(1),
                retry_after_default: Duration::from_millis(1),
            },
            5,
        )
    }

    #[test]
    fn test_author_key_prefers_profile_url() {
        let key_a = AuthorKey::new(
            "Jane Roe",
            "https://www.goodreads.com/author/show/1.Jane_Roe",
            AUTHOR_PROFILE_PREFIX,
        );
        let key_b = AuthorKey::new(
            "Jane Roe (different person)",
            "https://www.goodreads.com/author/show/1.Jane_Roe",
            AUTHOR_PROFILE_PREFIX,
        );
        assert_eq!(key_a, key_b);
    }

    #[test]
    fn test_author_key_falls_back_to_name() {
        let key_a = AuthorKey::new("Jane Roe", "https://example.com/book/1", AUTHOR_PROFILE_PREFIX);
        let key_b = AuthorKey::new("Jane Roe", "https://example.com/book/2", AUTHOR_PROFILE_PREFIX);
        assert_eq!(key_a, key_b);

        let key_c = AuthorKey::new("John Doe", "https://example.com/book/1", AUTHOR_PROFILE_PREFIX);
        assert_ne!(key_a, key_c);
    }

    #[test]
    fn test_source_strings() {
        assert_eq!(GenderSource::Manual.as_str(), "manual");
        assert_eq!(GenderSource::BioHeuristic.as_str(), "bio_heuristic");
        assert_eq!(GenderSource::ExternalApi.as_str(), "external_api");
        assert_eq!(GenderSource::None.as_str(), "none");
        assert_eq!(GenderSource::Error.as_str(), "error");
    }

    #[tokio::test]
    async fn test_manual_override_needs_no_network() {
        let overrides = ManualOverrides::from_entries([
            ("Jane Roe".to_string(), Gender::Female),
        ]);
        let resolver = offline_resolver(overrides);

        let resolution = resolver.resolve("Jane Roe", "https://example.com/book/1").await;
        assert_eq!(resolution.gender, Gender::Female);
        assert_eq!(resolution.source, GenderSource::Manual);
        assert_eq!(resolution.country, None);
        assert_eq!(resolution.confidence, None);
    }

    #[tokio::test]
    async fn test_all_tiers_failing_degrades_to_none() {
        let resolver = offline_resolver(ManualOverrides::empty());

        let resolution = resolver.resolve("Jane Roe", "").await;
        assert_eq!(resolution.gender, Gender::Unknown);
        assert_eq!(resolution.source, GenderSource::None);
    }

    #[tokio::test]
    async fn test_resolution_memoized() {
        let overrides = ManualOverrides::from_entries([
            ("Jane Roe".to_string(), Gender::Female),
        ]);
        let resolver = offline_resolver(overrides);

        let first = resolver.resolve("Jane Roe", "https://example.com/book/1").await;
        let second = resolver.resolve("Jane Roe", "https://example.com/book/2").await;
        assert_eq!(first, second);
    }
}

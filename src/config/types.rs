use serde::Deserialize;

/// Main configuration structure for Quill-Enrich
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub enrichment: EnrichmentConfig,
    pub http: HttpConfig,
    pub inference: InferenceConfig,
    pub io: IoConfig,
}

/// Enrichment behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    /// Maximum number of concurrent in-flight network operations
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: u32,

    /// Minimum time between requests to the book site (milliseconds)
    #[serde(rename = "site-request-delay-millis")]
    pub site_request_delay_millis: u64,

    /// Maximum fetch attempts per URL (429 responses do not consume one)
    #[serde(rename = "max-fetch-attempts")]
    pub max_fetch_attempts: u32,

    /// Base unit for exponential backoff between retries (milliseconds)
    #[serde(rename = "backoff-unit-millis", default = "default_backoff_unit")]
    pub backoff_unit_millis: u64,
}

fn default_backoff_unit() -> u64 {
    1000
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User agent string sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

/// Name-inference API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the name-inference API
    pub endpoint: String,

    /// Minimum probability required to accept an inference result
    #[serde(rename = "confidence-threshold")]
    pub confidence_threshold: f64,

    /// Minimum time between inference API requests (milliseconds)
    #[serde(rename = "request-delay-millis")]
    pub request_delay_millis: u64,
}

/// Input/output path configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IoConfig {
    /// Path to the input CSV (must have `author` and `link` columns)
    #[serde(rename = "input-path")]
    pub input_path: String,

    /// Path the enriched CSV is written to
    #[serde(rename = "output-path")]
    pub output_path: String,

    /// Path to the two-column manual override CSV (`author,author_gender`)
    #[serde(rename = "manual-overrides-path")]
    pub manual_overrides_path: String,
}

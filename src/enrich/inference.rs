//! Name-inference API client with a per-first-name single-flight cache
//!
//! Many authors share a first name, so inference results are cached for the
//! lifetime of the run, keyed by the lower-cased first name. A result is
//! accepted only when its probability strictly exceeds the configured
//! threshold; everything else (below threshold, null gender, API failure)
//! is a cached miss, so a common ambiguous name costs one API call total.

use crate::enrich::heuristic::Gender;
use crate::enrich::limiter::RateLimiter;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};

/// Raw response from the inference API
#[derive(Debug, Deserialize)]
struct ApiResponse {
    gender: Option<String>,
    #[serde(default)]
    probability: f64,
}

/// An accepted inference result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inference {
    pub gender: Gender,
    pub probability: f64,
}

/// Client for a genderize-style name-inference API
pub struct GenderizeClient {
    client: Client,
    endpoint: String,
    threshold: f64,
    limiter: RateLimiter,
    cache: Mutex<HashMap<String, Arc<OnceCell<Option<Inference>>>>>,
}

impl GenderizeClient {
    /// Creates a client for the given endpoint
    ///
    /// `threshold` is the minimum probability (exclusive) to accept a result;
    /// `request_delay` paces requests toward the API origin.
    pub fn new(
        client: Client,
        endpoint: String,
        threshold: f64,
        request_delay: Duration,
    ) -> Self {
        Self {
            client,
            endpoint,
            threshold,
            limiter: RateLimiter::new(request_delay),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Infers gender from a first name, if the API is confident enough
    ///
    /// The first caller for a given name performs the API call; concurrent
    /// callers for the same name await that pending result.
    pub async fn infer(&self, first_name: &str) -> Option<Inference> {
        let key = first_name.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }

        let cell = {
            let mut cache = self.cache.lock().await;
            Arc::clone(cache.entry(key.clone()).or_default())
        };

        *cell.get_or_init(|| self.query(key)).await
    }

    /// Performs one rate-limited API call; any failure is a miss
    async fn query(&self, first_name: String) -> Option<Inference> {
        self.limiter.acquire().await;

        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[("name", first_name.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Inference API request for '{}' failed: {}", first_name, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "Inference API returned HTTP {} for '{}'",
                response.status().as_u16(),
                first_name
            );
            return None;
        }

        let body: ApiResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Inference API response for '{}' unreadable: {}", first_name, e);
                return None;
            }
        };

        let gender = body.gender.as_deref().and_then(Gender::parse)?;
        if body.probability > self.threshold {
            Some(Inference {
                gender,
                probability: body.probability,
            })
        } else {
            tracing::debug!(
                "Inference for '{}' below threshold ({} <= {})",
                first_name,
                body.probability,
                self.threshold
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(endpoint: String) -> GenderizeClient {
        GenderizeClient::new(
            Client::new(),
            endpoint,
            0.9,
            Duration::from_millis(0),
        )
    }

    #[tokio::test]
    async fn test_accepts_confident_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("name", "jane"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "jane", "gender": "female", "probability": 0.98, "count": 1000
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let inference = client.infer("Jane").await.unwrap();
        assert_eq!(inference.gender, Gender::Female);
        assert_eq!(inference.probability, 0.98);
    }

    #[tokio::test]
    async fn test_rejects_below_threshold() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "sam", "gender": "male", "probability": 0.4, "count": 10
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert_eq!(client.infer("sam").await, None);
    }

    #[tokio::test]
    async fn test_threshold_is_exclusive() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "kim", "gender": "female", "probability": 0.9, "count": 10
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert_eq!(client.infer("kim").await, None);
    }

    #[tokio::test]
    async fn test_null_gender_is_miss() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "xzq", "gender": null, "probability": 0.0, "count": 0
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert_eq!(client.infer("xzq").await, None);
    }

    #[tokio::test]
    async fn test_api_error_is_miss() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert_eq!(client.infer("jane").await, None);
    }

    #[tokio::test]
    async fn test_results_cached_per_first_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("name", "jane"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "jane", "gender": "female", "probability": 0.98, "count": 1000
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert!(client.infer("jane").await.is_some());
        // cache is case-normalized
        assert!(client.infer("JANE").await.is_some());
        assert!(client.infer(" jane ").await.is_some());
    }

    #[tokio::test]
    async fn test_misses_cached_too() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "sam", "gender": "male", "probability": 0.4, "count": 10
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert_eq!(client.infer("sam").await, None);
        assert_eq!(client.infer("sam").await, None);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_single_flight() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "name": "jane", "gender": "female", "probability": 0.98, "count": 1000
                    }))
                    .set_delay(Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = Arc::new(test_client(server.uri()));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let client = Arc::clone(&client);
            handles.push(tokio::spawn(async move { client.infer("jane").await }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn test_empty_name_skips_api() {
        let server = MockServer::start().await;
        // No mock mounted: any request would 404 and panic wiremock's expect
        let client = test_client(server.uri());
        assert_eq!(client.infer("").await, None);
        assert_eq!(client.infer("   ").await, None);
    }
}

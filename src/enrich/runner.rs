//! Run driver: wires the configured components together and executes one
//! full enrichment pass over the input dataset

use crate::config::Config;
use crate::dataset::{self, EnrichedRecord, ManualOverrides};
use crate::enrich::fetcher::{build_http_client, FetchPolicy};
use crate::enrich::inference::GenderizeClient;
use crate::enrich::limiter::RateLimiter;
use crate::enrich::resolver::{GenderSource, Resolver};
use crate::enrich::scheduler::enrich_records;
use crate::enrich::Gender;
use crate::EnrichError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Summary of one enrichment run
#[derive(Debug, Clone)]
pub struct EnrichStats {
    /// Total records processed
    pub total: usize,

    /// Record counts by gender source
    pub by_source: HashMap<GenderSource, usize>,

    /// Record counts by resolved gender
    pub by_gender: HashMap<Gender, usize>,
}

impl EnrichStats {
    fn tally(enriched: &[EnrichedRecord]) -> Self {
        let mut by_source = HashMap::new();
        let mut by_gender = HashMap::new();

        for record in enriched {
            *by_source.entry(record.resolution.source).or_insert(0) += 1;
            *by_gender.entry(record.resolution.gender).or_insert(0) += 1;
        }

        Self {
            total: enriched.len(),
            by_source,
            by_gender,
        }
    }

    /// Count of records resolved through a given tier
    pub fn source_count(&self, source: GenderSource) -> usize {
        self.by_source.get(&source).copied().unwrap_or(0)
    }
}

/// Runs one complete enrichment pass
///
/// Loads the dataset and override table, resolves every author through the
/// fallback chain under the configured concurrency cap, writes the enriched
/// output, and returns the per-source tallies. Startup and I/O failures
/// abort the run; per-author resolution failures never do.
pub async fn run_enrichment(config: Config) -> Result<EnrichStats, EnrichError> {
    let dataset = dataset::load_dataset(Path::new(&config.io.input_path))?;
    let overrides = ManualOverrides::load(Path::new(&config.io.manual_overrides_path))?;

    let client = build_http_client(&config.http)?;
    let site_limiter = Arc::new(RateLimiter::new(Duration::from_millis(
        config.enrichment.site_request_delay_millis,
    )));
    let inference = GenderizeClient::new(
        client.clone(),
        config.inference.endpoint.clone(),
        config.inference.confidence_threshold,
        Duration::from_millis(config.inference.request_delay_millis),
    );
    let policy = FetchPolicy {
        max_attempts: config.enrichment.max_fetch_attempts,
        backoff_unit: Duration::from_millis(config.enrichment.backoff_unit_millis),
        ..FetchPolicy::default()
    };

    let resolver = Arc::new(Resolver::new(
        client,
        site_limiter,
        overrides,
        inference,
        policy,
        config.enrichment.max_concurrent_requests as usize,
    ));

    let start = std::time::Instant::now();
    let headers = dataset.headers.clone();
    let enriched = enrich_records(resolver, dataset.records).await;

    dataset::write_enriched(Path::new(&config.io.output_path), &headers, &enriched)?;

    let stats = EnrichStats::tally(&enriched);
    tracing::info!(
        "Enrichment completed: {} records in {:?}",
        stats.total,
        start.elapsed()
    );
    for source in [
        GenderSource::Manual,
        GenderSource::BioHeuristic,
        GenderSource::ExternalApi,
        GenderSource::None,
        GenderSource::Error,
    ] {
        let count = stats.source_count(source);
        if count > 0 {
            tracing::info!("  {}: {}", source, count);
        }
    }

    Ok(stats)
}

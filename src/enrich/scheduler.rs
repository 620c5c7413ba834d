//! Fan-out of per-record resolution tasks with ordered collection
//!
//! One task per input record; the global network cap lives inside the
//! resolver's admission gate, so spawning everything up front is cheap. Join
//! handles are awaited in input order, which makes output order equal input
//! order no matter how fetches interleave.

use crate::dataset::{BookRecord, EnrichedRecord};
use crate::enrich::resolver::{Resolution, Resolver};
use std::sync::Arc;

const PROGRESS_INTERVAL: usize = 25;

/// Resolves every record's author and pairs each input row with its result
///
/// Output length always equals input length; a record whose task could not
/// be joined degrades to `source=error` rather than aborting the run.
pub async fn enrich_records(
    resolver: Arc<Resolver>,
    records: Vec<BookRecord>,
) -> Vec<EnrichedRecord> {
    let total = records.len();
    tracing::info!("Resolving {} records", total);

    let mut handles = Vec::with_capacity(total);
    for record in &records {
        let resolver = Arc::clone(&resolver);
        let author = record.author.clone();
        let link = record.link.clone();
        handles.push(tokio::spawn(async move {
            resolver.resolve(&author, &link).await
        }));
    }

    let mut enriched = Vec::with_capacity(total);
    for (i, (record, handle)) in records.into_iter().zip(handles).enumerate() {
        let resolution = match handle.await {
            Ok(resolution) => resolution,
            Err(e) => {
                tracing::error!("Resolution task for '{}' failed: {}", record.author, e);
                Resolution::error()
            }
        };

        enriched.push(EnrichedRecord {
            row: record.row,
            resolution,
        });

        if (i + 1) % PROGRESS_INTERVAL == 0 {
            tracing::info!("Progress: {}/{} records resolved", i + 1, total);
        }
    }

    enriched
}

//! Dataset boundary: CSV loading, enriched output, and the manual override table
//!
//! Input records need `author` and `link` columns; every other column passes
//! through to the output untouched, with the three enrichment columns
//! appended at the end.

mod overrides;
mod records;

pub use overrides::ManualOverrides;
pub use records::{load_dataset, write_enriched, BookRecord, Dataset, EnrichedRecord};

use thiserror::Error;

/// Errors from the dataset boundary
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { column: String, path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

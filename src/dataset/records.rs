//! CSV record loading and enriched-output writing

use crate::dataset::DatasetError;
use crate::enrich::Resolution;
use csv::StringRecord;
use std::path::Path;

/// One input row: the author identity plus the untouched original row
#[derive(Debug, Clone)]
pub struct BookRecord {
    /// Author display name
    pub author: String,

    /// Profile or book URL for this record
    pub link: String,

    /// The full original row, passed through to the output unchanged
    pub row: StringRecord,
}

/// A loaded input dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Original header row
    pub headers: StringRecord,

    /// All input records, in file order
    pub records: Vec<BookRecord>,
}

/// One output row: the original row plus its author's resolution
#[derive(Debug, Clone)]
pub struct EnrichedRecord {
    /// The original input row
    pub row: StringRecord,

    /// The resolution for this row's author
    pub resolution: Resolution,
}

/// Loads the input dataset, requiring `author` and `link` columns
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let author_idx = column_index(&headers, "author", path)?;
    let link_idx = column_index(&headers, "link", path)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let author = row.get(author_idx).unwrap_or("").trim().to_string();
        let link = row.get(link_idx).unwrap_or("").trim().to_string();
        records.push(BookRecord { author, link, row });
    }

    tracing::info!("Loaded {} records from {}", records.len(), path.display());

    Ok(Dataset { headers, records })
}

/// Writes the enriched dataset: original columns plus
/// `author_country`, `author_gender`, `gender_source`
pub fn write_enriched(
    path: &Path,
    headers: &StringRecord,
    enriched: &[EnrichedRecord],
) -> Result<(), DatasetError> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header_row = headers.clone();
    header_row.push_field("author_country");
    header_row.push_field("author_gender");
    header_row.push_field("gender_source");
    writer.write_record(&header_row)?;

    for record in enriched {
        let mut row = record.row.clone();
        row.push_field(record.resolution.country.as_deref().unwrap_or("unknown"));
        row.push_field(record.resolution.gender.as_str());
        row.push_field(record.resolution.source.as_str());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    tracing::info!("Wrote {} enriched records to {}", enriched.len(), path.display());

    Ok(())
}

fn column_index(
    headers: &StringRecord,
    column: &str,
    path: &Path,
) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DatasetError::MissingColumn {
            column: column.to_string(),
            path: path.display().to_string(),
        })
}

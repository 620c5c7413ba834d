//! Manual override table: `author name -> gender`, authoritative when present
//!
//! Loaded once at startup from a two-column CSV and read-only afterwards. A
//! missing file is not an error; curation simply has not happened yet.

use crate::dataset::DatasetError;
use crate::enrich::Gender;
use std::collections::HashMap;
use std::path::Path;

/// Precomputed author -> gender mapping
#[derive(Debug, Clone, Default)]
pub struct ManualOverrides {
    map: HashMap<String, Gender>,
}

impl ManualOverrides {
    /// An empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from in-memory entries
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Gender)>,
    {
        Self {
            map: entries.into_iter().collect(),
        }
    }

    /// Loads the table from a CSV with `author` and `author_gender` columns
    ///
    /// Rows whose gender is not male/female are skipped with a warning. A
    /// missing file yields an empty table.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        if !path.exists() {
            tracing::warn!(
                "Manual override file {} not found, continuing without overrides",
                path.display()
            );
            return Ok(Self::empty());
        }

        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let author_idx = headers.iter().position(|h| h == "author").ok_or_else(|| {
            DatasetError::MissingColumn {
                column: "author".to_string(),
                path: path.display().to_string(),
            }
        })?;
        let gender_idx = headers
            .iter()
            .position(|h| h == "author_gender")
            .ok_or_else(|| DatasetError::MissingColumn {
                column: "author_gender".to_string(),
                path: path.display().to_string(),
            })?;

        let mut map = HashMap::new();
        for result in reader.records() {
            let row = result?;
            let author = row.get(author_idx).unwrap_or("").trim();
            let gender_str = row.get(gender_idx).unwrap_or("");

            if author.is_empty() {
                continue;
            }

            match Gender::parse(gender_str) {
                Some(gender) => {
                    map.insert(author.to_string(), gender);
                }
                None => {
                    tracing::warn!(
                        "Skipping override for '{}': unrecognized gender '{}'",
                        author,
                        gender_str
                    );
                }
            }
        }

        tracing::info!("Loaded {} manual overrides from {}", map.len(), path.display());

        Ok(Self { map })
    }

    /// Looks up the override for an author name
    pub fn get(&self, author: &str) -> Option<Gender> {
        self.map.get(author.trim()).copied()
    }

    /// Number of loaded overrides
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

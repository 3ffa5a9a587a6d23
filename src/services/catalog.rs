use std::path::{Path, PathBuf};

use crate::{error::AppResult, models::WineEntry};

/// Wine catalog read contract
///
/// A catalog source returns the full catalog snapshot. Sources must
/// degrade rather than crash: a missing or unreadable backing store is
/// an empty catalog, and malformed rows are skipped.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads the full wine catalog
    async fn load_catalog(&self) -> AppResult<Vec<WineEntry>>;

    /// Connection parameters identifying this source, used in the
    /// session cache key
    fn describe(&self) -> String;
}

/// CSV-file catalog source
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for CsvCatalog {
    async fn load_catalog(&self) -> AppResult<Vec<WineEntry>> {
        let mut reader = match csv::Reader::from_path(&self.path) {
            Ok(reader) => reader,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Wine catalog unavailable, continuing with empty catalog"
                );
                return Ok(Vec::new());
            }
        };

        let mut catalog = Vec::new();
        let mut skipped = 0usize;

        for row in reader.deserialize::<WineEntry>() {
            match row {
                Ok(mut entry) => {
                    entry.wine_type = entry.wine_type.to_lowercase();
                    catalog.push(entry);
                }
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(error = %e, "Skipping malformed catalog row");
                }
            }
        }

        tracing::info!(
            path = %self.path.display(),
            wines = catalog.len(),
            skipped = skipped,
            "Wine catalog loaded"
        );

        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

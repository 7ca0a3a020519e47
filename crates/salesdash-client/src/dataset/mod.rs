pub mod cache;
pub(crate) mod parse;
pub mod record;
pub mod source;

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::LoadError;

pub use cache::DatasetCache;
pub use record::{SaleFields, SalesRecord};
pub use source::SourceKey;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows_read: i64,
    pub rows_loaded: i64,
    pub rows_skipped: i64,
    pub unparsed_dates: i64,
}

/// The loaded, read-only record set for one data source.
#[derive(Debug, Clone)]
pub struct Dataset {
    source_label: String,
    records: Vec<SalesRecord>,
    summary: LoadSummary,
}

impl Dataset {
    pub fn from_records(source_label: &str, records: Vec<SalesRecord>) -> Self {
        let count = records.len() as i64;
        Self {
            source_label: source_label.to_string(),
            records,
            summary: LoadSummary {
                rows_read: count,
                rows_loaded: count,
                ..LoadSummary::default()
            },
        }
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let content = source::read_source(path)?;
    if content.trim().is_empty() {
        warn!(path = %path.display(), "sales data file is empty");
        return Err(LoadError::not_found(path));
    }
    load_dataset_from_str(&path.display().to_string(), &content)
}

pub fn load_dataset_from_str(source_label: &str, content: &str) -> Result<Dataset, LoadError> {
    let parsed = parse::parse_sales_csv(source_label, content)?;

    if parsed.summary.rows_skipped > 0 {
        warn!(
            source = source_label,
            rows_skipped = parsed.summary.rows_skipped,
            "skipped rows with blank numeric fields"
        );
    }
    if parsed.summary.unparsed_dates > 0 {
        warn!(
            source = source_label,
            unparsed_dates = parsed.summary.unparsed_dates,
            "some dates could not be parsed and were left empty"
        );
    }
    info!(
        source = source_label,
        rows_read = parsed.summary.rows_read,
        rows_loaded = parsed.summary.rows_loaded,
        "loaded sales dataset"
    );

    Ok(Dataset {
        source_label: source_label.to_string(),
        records: parsed.records,
        summary: parsed.summary,
    })
}

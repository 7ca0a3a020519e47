use std::path::PathBuf;

use crate::ClientResult;
use crate::analysis::filter_options;
use crate::commands::common::{ensure_has_records, source_info};
use crate::config::resolve_data_path;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::FiltersData;
use crate::dataset::{Dataset, DatasetCache};

#[derive(Debug, Clone, Default)]
pub struct FiltersRunOptions {
    pub data_path: Option<PathBuf>,
}

pub fn run(options: FiltersRunOptions) -> ClientResult<SuccessEnvelope> {
    let mut cache = DatasetCache::new();
    run_with_cache(&mut cache, &options)
}

pub fn run_with_cache(
    cache: &mut DatasetCache,
    options: &FiltersRunOptions,
) -> ClientResult<SuccessEnvelope> {
    let path = resolve_data_path(options.data_path.as_deref())?;
    let dataset = cache.get_or_load(&path)?;
    filters_envelope(&dataset, false)
}

pub(crate) fn filters_envelope(dataset: &Dataset, bundled: bool) -> ClientResult<SuccessEnvelope> {
    ensure_has_records(dataset)?;
    let data = FiltersData {
        source: source_info(dataset, bundled),
        options: filter_options(dataset.records()),
    };
    success("filters", data)
}

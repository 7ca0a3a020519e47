use std::path::PathBuf;

use crate::ClientResult;
use crate::analysis::{FilterSelection, build_filter};
use crate::commands::common::dashboard_envelope;
use crate::config::resolve_data_path;
use crate::contracts::envelope::SuccessEnvelope;
use crate::dataset::DatasetCache;

#[derive(Debug, Clone, Default)]
pub struct DashboardRunOptions {
    pub data_path: Option<PathBuf>,
    pub selection: FilterSelection,
}

pub fn run(options: DashboardRunOptions) -> ClientResult<SuccessEnvelope> {
    let mut cache = DatasetCache::new();
    run_with_cache(&mut cache, &options)
}

pub fn run_with_cache(
    cache: &mut DatasetCache,
    options: &DashboardRunOptions,
) -> ClientResult<SuccessEnvelope> {
    let path = resolve_data_path(options.data_path.as_deref())?;
    let dataset = cache.get_or_load(&path)?;
    let filter = build_filter(&options.selection, "dash")?;

    dashboard_envelope("dash", &dataset, &options.selection, &filter, false)
}

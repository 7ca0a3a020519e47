use serde::Serialize;

use crate::analysis::{Dashboard, FilterOptions, FilterSelection};
use crate::dataset::LoadSummary;

#[derive(Debug, Clone, Serialize)]
pub struct DataRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub label: String,
    pub bundled: bool,
    pub load_summary: LoadSummary,
    pub data_range: DataRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub source: SourceInfo,
    pub selection: FilterSelection,
    #[serde(flatten)]
    pub dashboard: Dashboard,
}

#[derive(Debug, Clone, Serialize)]
pub struct FiltersData {
    pub source: SourceInfo,
    #[serde(flatten)]
    pub options: FilterOptions,
}

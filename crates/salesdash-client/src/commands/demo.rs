use crate::ClientResult;
use crate::analysis::{FilterSelection, build_filter};
use crate::commands::common::dashboard_envelope;
use crate::commands::filters::filters_envelope;
use crate::contracts::envelope::SuccessEnvelope;
use crate::dataset::{Dataset, load_dataset_from_str};

pub const DEMO_SOURCE_LABEL: &str = "bundled sample";

const SAMPLE_SALES_CSV: &str = include_str!("../../data/sample_sales.csv");

pub fn sample_dataset() -> ClientResult<Dataset> {
    Ok(load_dataset_from_str(DEMO_SOURCE_LABEL, SAMPLE_SALES_CSV)?)
}

pub fn run(selection: &FilterSelection) -> ClientResult<SuccessEnvelope> {
    let dataset = sample_dataset()?;
    let filter = build_filter(selection, "demo")?;
    dashboard_envelope("demo", &dataset, selection, &filter, true)
}

pub fn filters() -> ClientResult<SuccessEnvelope> {
    let dataset = sample_dataset()?;
    filters_envelope(&dataset, true)
}

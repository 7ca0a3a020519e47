use crate::analysis::filter::FilterConfig;
use crate::analysis::{FilterSelection, build_dashboard};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{DashboardData, DataRange, SourceInfo};
use crate::dataset::{Dataset, SalesRecord};
use crate::{ClientError, ClientResult};

/// A load that produced no records is terminal: nothing is rendered from it.
pub(crate) fn ensure_has_records(dataset: &Dataset) -> ClientResult<()> {
    if dataset.is_empty() {
        return Err(ClientError::data_load_error(
            dataset.source_label(),
            "source contains no sales records",
        ));
    }
    Ok(())
}

pub(crate) fn source_info(dataset: &Dataset, bundled: bool) -> SourceInfo {
    SourceInfo {
        label: dataset.source_label().to_string(),
        bundled,
        load_summary: dataset.summary().clone(),
        data_range: data_range(dataset),
    }
}

pub(crate) fn dashboard_envelope(
    command: &str,
    dataset: &Dataset,
    selection: &FilterSelection,
    filter: &FilterConfig,
    bundled: bool,
) -> ClientResult<SuccessEnvelope> {
    ensure_has_records(dataset)?;
    let data = DashboardData {
        source: source_info(dataset, bundled),
        selection: selection.clone(),
        dashboard: build_dashboard(dataset, filter),
    };
    success(command, data)
}

fn data_range(dataset: &Dataset) -> DataRange {
    let dates = || dataset.records().iter().filter_map(SalesRecord::date);
    let earliest = dates().min();
    let latest = dates().max();

    DataRange {
        earliest: earliest.map(|date| date.format("%Y-%m-%d").to_string()),
        latest: latest.map(|date| date.format("%Y-%m-%d").to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{ensure_has_records, source_info};
    use crate::dataset::{Dataset, SaleFields, SalesRecord};

    fn dated(date: Option<NaiveDate>) -> SalesRecord {
        SalesRecord::new(SaleFields {
            date,
            year: 2016,
            month: "March".to_string(),
            country: "France".to_string(),
            product_category: "Bikes".to_string(),
            sub_category: "Road Bikes".to_string(),
            customer_age: 40,
            revenue: 500.0,
            cost: 350.0,
            quantity: 1,
        })
    }

    #[test]
    fn data_range_skips_missing_dates() {
        let dataset = Dataset::from_records(
            "memory",
            vec![
                dated(NaiveDate::from_ymd_opt(2016, 3, 9)),
                dated(None),
                dated(NaiveDate::from_ymd_opt(2015, 7, 1)),
            ],
        );
        let info = source_info(&dataset, false);
        assert_eq!(info.data_range.earliest.as_deref(), Some("2015-07-01"));
        assert_eq!(info.data_range.latest.as_deref(), Some("2016-03-09"));
        assert_eq!(info.load_summary.rows_loaded, 3);
    }

    #[test]
    fn empty_dataset_is_a_load_error() {
        let dataset = Dataset::from_records("memory", Vec::new());
        let result = ensure_has_records(&dataset);
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "data_load_error");
            assert!(error.message.contains("no sales records"));
        }
    }
}

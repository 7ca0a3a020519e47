pub mod aggregate;
pub mod facets;
pub mod filter;

use serde::Serialize;

use crate::analysis::aggregate::{
    AgeTopSubCategory, CountryShare, MonthlyPoint, ProfitRank, QuantityRank, Totals,
};
use crate::analysis::filter::{FilterConfig, apply_filter};
use crate::dataset::Dataset;

pub use facets::{FilterOptions, filter_options};
pub use filter::{FilterSelection, FilteredView, build_filter};

/// Every aggregate the dashboard shows, computed over one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub filter: FilterConfig,
    pub source_records: i64,
    pub filtered_records: i64,
    pub totals: Totals,
    pub monthly: Vec<MonthlyPoint>,
    pub sub_category_by_quantity: Vec<QuantityRank>,
    pub sub_category_by_profit: Vec<ProfitRank>,
    pub country_profit: Vec<CountryShare>,
    pub top_sub_category_by_age: Vec<AgeTopSubCategory>,
}

pub fn build_dashboard(dataset: &Dataset, filter: &FilterConfig) -> Dashboard {
    let view = apply_filter(dataset.records(), filter);
    Dashboard {
        filter: filter.clone(),
        source_records: view.source_len() as i64,
        filtered_records: view.len() as i64,
        totals: aggregate::totals(&view),
        monthly: aggregate::monthly_series(&view),
        sub_category_by_quantity: aggregate::sub_category_by_quantity(&view),
        sub_category_by_profit: aggregate::sub_category_by_profit(&view),
        country_profit: aggregate::country_profit_shares(&view),
        top_sub_category_by_age: aggregate::top_sub_category_by_age(&view),
    }
}

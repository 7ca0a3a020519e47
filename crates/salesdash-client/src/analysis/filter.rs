use serde::Serialize;
use tracing::debug;

use crate::dataset::SalesRecord;
use crate::{ClientError, ClientResult};

/// Raw user selections, as typed on the command line or in an explore session.
///
/// `None`, a blank string, or `all` (any case) means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub country: Option<String>,
    pub year: Option<String>,
    pub product_category: Option<String>,
    pub age_min: Option<i64>,
    pub age_max: Option<i64>,
}

/// Conjunctive predicates applied to every record. `None` is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterConfig {
    pub country: Option<String>,
    pub year: Option<i32>,
    pub product_category: Option<String>,
    pub age_min: Option<i64>,
    pub age_max: Option<i64>,
}

impl FilterConfig {
    pub fn is_identity(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, record: &SalesRecord) -> bool {
        if let Some(country) = &self.country
            && record.country() != country
        {
            return false;
        }
        if let Some(year) = self.year
            && record.year() != year
        {
            return false;
        }
        if let Some(category) = &self.product_category
            && record.product_category() != category
        {
            return false;
        }
        if let Some(min) = self.age_min
            && record.customer_age() < min
        {
            return false;
        }
        if let Some(max) = self.age_max
            && record.customer_age() > max
        {
            return false;
        }
        true
    }
}

/// Borrowed subset of a record set, in source order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    records: Vec<&'a SalesRecord>,
    source_len: usize,
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SalesRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source_len(&self) -> usize {
        self.source_len
    }
}

pub fn apply_filter<'a>(records: &'a [SalesRecord], filter: &FilterConfig) -> FilteredView<'a> {
    let matched = records
        .iter()
        .filter(|record| filter.matches(record))
        .collect::<Vec<&SalesRecord>>();
    debug!(
        source = records.len(),
        matched = matched.len(),
        "applied sales filter"
    );
    FilteredView {
        records: matched,
        source_len: records.len(),
    }
}

pub fn build_filter(selection: &FilterSelection, command: &str) -> ClientResult<FilterConfig> {
    let year = match normalize_choice(selection.year.as_deref()) {
        Some(value) => Some(value.parse::<i32>().map_err(|_| {
            ClientError::invalid_argument_for_command(
                &format!("Year must be a whole number or `all`, got `{value}`."),
                Some(command),
            )
        })?),
        None => None,
    };

    Ok(FilterConfig {
        country: normalize_choice(selection.country.as_deref()).map(str::to_string),
        year,
        product_category: normalize_choice(selection.product_category.as_deref())
            .map(str::to_string),
        age_min: selection.age_min,
        age_max: selection.age_max,
    })
}

fn normalize_choice(value: Option<&str>) -> Option<&str> {
    let trimmed = value?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return None;
    }
    Some(trimmed)
}

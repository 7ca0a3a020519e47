use std::collections::BTreeSet;

use serde::Serialize;

use crate::dataset::SalesRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeBounds {
    pub min: i64,
    pub max: i64,
}

/// Selectable values for each filter, taken from the full record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub years: Vec<i32>,
    pub product_categories: Vec<String>,
    pub customer_age: Option<AgeBounds>,
}

pub fn filter_options(records: &[SalesRecord]) -> FilterOptions {
    let mut countries = BTreeSet::new();
    let mut years = BTreeSet::new();
    let mut product_categories = BTreeSet::new();
    let mut customer_age: Option<AgeBounds> = None;

    for record in records {
        countries.insert(record.country());
        years.insert(record.year());
        product_categories.insert(record.product_category());

        let age = record.customer_age();
        customer_age = Some(match customer_age {
            Some(bounds) => AgeBounds {
                min: bounds.min.min(age),
                max: bounds.max.max(age),
            },
            None => AgeBounds { min: age, max: age },
        });
    }

    FilterOptions {
        countries: countries.into_iter().map(str::to_string).collect(),
        years: years.into_iter().collect(),
        product_categories: product_categories
            .into_iter()
            .map(str::to_string)
            .collect(),
        customer_age,
    }
}

#[cfg(test)]
mod tests {
    use super::{AgeBounds, FilterOptions, filter_options};
    use crate::dataset::{SaleFields, SalesRecord};

    fn record(country: &str, year: i32, category: &str, age: i64) -> SalesRecord {
        SalesRecord::new(SaleFields {
            date: None,
            year,
            month: "July".to_string(),
            country: country.to_string(),
            product_category: category.to_string(),
            sub_category: "Caps".to_string(),
            customer_age: age,
            revenue: 1.0,
            cost: 1.0,
            quantity: 1,
        })
    }

    #[test]
    fn options_are_sorted_and_distinct() {
        let records = vec![
            record("United States", 2016, "Clothing", 44),
            record("France", 2015, "Bikes", 17),
            record("United States", 2015, "Accessories", 87),
            record("France", 2016, "Bikes", 30),
        ];
        let options = filter_options(&records);
        assert_eq!(options.countries, vec!["France", "United States"]);
        assert_eq!(options.years, vec![2015, 2016]);
        assert_eq!(
            options.product_categories,
            vec!["Accessories", "Bikes", "Clothing"]
        );
        assert_eq!(options.customer_age, Some(AgeBounds { min: 17, max: 87 }));
    }

    #[test]
    fn empty_record_set_has_no_options() {
        assert_eq!(filter_options(&[]), FilterOptions::default());
    }
}

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::filter::FilteredView;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Totals {
    pub record_count: i64,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub year_month: String,
    pub cost: f64,
    pub revenue: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityRank {
    pub sub_category: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitRank {
    pub sub_category: String,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryShare {
    pub country: String,
    pub profit: f64,
    /// Fraction of total profit across all listed countries; 0 when the total is 0.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeTopSubCategory {
    pub customer_age: i64,
    pub sub_category: String,
    pub quantity: i64,
}

pub fn totals(view: &FilteredView<'_>) -> Totals {
    view.iter().fold(Totals::default(), |mut acc, record| {
        acc.record_count += 1;
        acc.revenue += record.revenue();
        acc.cost += record.cost();
        acc.profit += record.profit();
        acc.quantity = acc.quantity.saturating_add(record.quantity());
        acc
    })
}

/// Cost, revenue, and profit per `year_month`, ordered by the key as a string.
pub fn monthly_series(view: &FilteredView<'_>) -> Vec<MonthlyPoint> {
    let mut groups: BTreeMap<&str, (f64, f64, f64)> = BTreeMap::new();
    for record in view.iter() {
        let entry = groups.entry(record.year_month()).or_insert((0.0, 0.0, 0.0));
        entry.0 += record.cost();
        entry.1 += record.revenue();
        entry.2 += record.profit();
    }

    groups
        .into_iter()
        .map(|(year_month, (cost, revenue, profit))| MonthlyPoint {
            year_month: year_month.to_string(),
            cost,
            revenue,
            profit,
        })
        .collect()
}

pub fn sub_category_by_quantity(view: &FilteredView<'_>) -> Vec<QuantityRank> {
    let mut groups: BTreeMap<&str, i64> = BTreeMap::new();
    for record in view.iter() {
        let quantity = groups.entry(record.sub_category()).or_insert(0);
        *quantity = quantity.saturating_add(record.quantity());
    }

    let mut ranked = groups
        .into_iter()
        .map(|(sub_category, quantity)| QuantityRank {
            sub_category: sub_category.to_string(),
            quantity,
        })
        .collect::<Vec<QuantityRank>>();
    // Stable sort over name-ordered groups: ties stay alphabetical.
    ranked.sort_by(|left, right| right.quantity.cmp(&left.quantity));
    ranked
}

pub fn sub_category_by_profit(view: &FilteredView<'_>) -> Vec<ProfitRank> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for record in view.iter() {
        *groups.entry(record.sub_category()).or_insert(0.0) += record.profit();
    }

    let mut ranked = groups
        .into_iter()
        .map(|(sub_category, profit)| ProfitRank {
            sub_category: sub_category.to_string(),
            profit,
        })
        .collect::<Vec<ProfitRank>>();
    ranked.sort_by(|left, right| right.profit.total_cmp(&left.profit));
    ranked
}

pub fn country_profit_shares(view: &FilteredView<'_>) -> Vec<CountryShare> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for record in view.iter() {
        *groups.entry(record.country()).or_insert(0.0) += record.profit();
    }

    let total = groups.values().sum::<f64>();
    groups
        .into_iter()
        .map(|(country, profit)| CountryShare {
            country: country.to_string(),
            profit,
            share: if total.abs() <= f64::EPSILON {
                0.0
            } else {
                profit / total
            },
        })
        .collect()
}

/// For each customer age (ascending), the sub-category with the largest summed
/// quantity. Ties go to the alphabetically first sub-category.
pub fn top_sub_category_by_age(view: &FilteredView<'_>) -> Vec<AgeTopSubCategory> {
    let mut groups: BTreeMap<i64, BTreeMap<&str, i64>> = BTreeMap::new();
    for record in view.iter() {
        let quantity = groups
            .entry(record.customer_age())
            .or_default()
            .entry(record.sub_category())
            .or_insert(0);
        *quantity = quantity.saturating_add(record.quantity());
    }

    let mut top = Vec::with_capacity(groups.len());
    for (customer_age, by_sub_category) in groups {
        let mut best: Option<(&str, i64)> = None;
        for (sub_category, quantity) in by_sub_category {
            match best {
                Some((_, best_quantity)) if quantity <= best_quantity => {}
                _ => best = Some((sub_category, quantity)),
            }
        }
        if let Some((sub_category, quantity)) = best {
            top.push(AgeTopSubCategory {
                customer_age,
                sub_category: sub_category.to_string(),
                quantity,
            });
        }
    }
    top
}

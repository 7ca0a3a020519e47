use std::collections::HashMap;

use chrono::NaiveDate;

use crate::dataset::LoadSummary;
use crate::dataset::record::{SaleFields, SalesRecord};
use crate::error::LoadError;

pub(crate) const REQUIRED_COLUMNS: [&str; 10] = [
    "Date",
    "Year",
    "Month",
    "Country",
    "Product Category",
    "Sub Category",
    "Customer Age",
    "Revenue",
    "Cost",
    "Quantity",
];

const NUMERIC_COLUMNS: [&str; 5] = ["Year", "Customer Age", "Revenue", "Cost", "Quantity"];

#[derive(Debug, Clone)]
pub(crate) struct ParsedSales {
    pub(crate) records: Vec<SalesRecord>,
    pub(crate) summary: LoadSummary,
}

pub(crate) fn parse_sales_csv(source_label: &str, content: &str) -> Result<ParsedSales, LoadError> {
    if content.trim().is_empty() {
        return Err(LoadError::data_load(source_label, "source is empty"));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| {
            LoadError::data_load(
                source_label,
                format!("header row is missing or unreadable ({error})"),
            )
        })?
        .iter()
        .map(|value| value.trim_start_matches('\u{feff}').trim().to_string())
        .collect::<Vec<String>>();

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.clone(), index))
        .collect::<HashMap<String, usize>>();

    let missing = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !index_by_name.contains_key(**column))
        .copied()
        .collect::<Vec<&str>>();
    if !missing.is_empty() {
        return Err(LoadError::data_load(
            source_label,
            format!("missing required columns: {}", missing.join(", ")),
        ));
    }

    let mut records = Vec::new();
    let mut summary = LoadSummary::default();
    for (row_index, result_row) in reader.records().enumerate() {
        let row = (row_index as i64) + 1;
        summary.rows_read += 1;

        let record = result_row.map_err(|error| {
            LoadError::data_load(source_label, format!("row {row} is malformed ({error})"))
        })?;
        let cells = RowCells {
            record: &record,
            index_by_name: &index_by_name,
            row,
            source_label,
        };

        if NUMERIC_COLUMNS.iter().any(|column| cells.get(column).is_empty()) {
            summary.rows_skipped += 1;
            continue;
        }

        let date = parse_sale_date(cells.get("Date"));
        if date.is_none() {
            summary.unparsed_dates += 1;
        }

        let year = cells.integer("Year")?;
        let year = i32::try_from(year).map_err(|_| cells.invalid("Year", "is out of range"))?;

        records.push(SalesRecord::new(SaleFields {
            date,
            year,
            month: cells.get("Month").to_string(),
            country: cells.get("Country").to_string(),
            product_category: cells.get("Product Category").to_string(),
            sub_category: cells.get("Sub Category").to_string(),
            customer_age: cells.integer("Customer Age")?,
            revenue: cells.decimal("Revenue")?,
            cost: cells.decimal("Cost")?,
            quantity: cells.integer("Quantity")?,
        }));
    }

    summary.rows_loaded = records.len() as i64;
    Ok(ParsedSales { records, summary })
}

struct RowCells<'a> {
    record: &'a csv::StringRecord,
    index_by_name: &'a HashMap<String, usize>,
    row: i64,
    source_label: &'a str,
}

impl RowCells<'_> {
    fn get(&self, column: &str) -> &str {
        self.index_by_name
            .get(column)
            .and_then(|index| self.record.get(*index))
            .map(str::trim)
            .unwrap_or("")
    }

    fn integer(&self, column: &str) -> Result<i64, LoadError> {
        let raw = self.get(column);
        parse_integer(raw).ok_or_else(|| self.invalid(column, &format!("has non-integer value `{raw}`")))
    }

    fn decimal(&self, column: &str) -> Result<f64, LoadError> {
        let raw = self.get(column);
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| self.invalid(column, &format!("has non-numeric value `{raw}`")))
    }

    fn invalid(&self, column: &str, detail: &str) -> LoadError {
        LoadError::data_load(
            self.source_label,
            format!("row {}: column `{column}` {detail}", self.row),
        )
    }
}

fn parse_integer(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }

    // Exports that passed through a float column write `2016.0`.
    let value = raw.parse::<f64>().ok()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

pub(crate) fn parse_sale_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim().split(['T', ' ']).next()?.trim();
    if value.is_empty() {
        return None;
    }

    let format = if value.contains('/') {
        if value.find('/') == Some(4) {
            "%Y/%m/%d"
        } else if value.rsplit('/').next().is_some_and(|year| year.len() == 2) {
            "%m/%d/%y"
        } else {
            "%m/%d/%Y"
        }
    } else if value.contains('.') {
        "%d.%m.%Y"
    } else {
        "%Y-%m-%d"
    };

    NaiveDate::parse_from_str(value, format).ok()
}

use std::io;

use serde_json::Value;

use super::format::{
    self, BAR_WIDTH, Column, bar, bar_scale, format_count, format_money, format_percent,
};

pub fn render_dashboard(command: &str, data: &Value) -> io::Result<String> {
    let totals = data
        .get("totals")
        .ok_or_else(|| io::Error::other("dashboard output requires totals"))?;

    let mut lines = heading_lines(command, data);
    lines.push(String::new());
    lines.push("Metrics:".to_string());
    lines.extend(format::key_value_rows(
        &[
            ("Total Revenue:", format_money(number(totals, "revenue"))),
            ("Total Profit:", format_money(number(totals, "profit"))),
            (
                "Total Quantity Sold:",
                format_count(integer(totals, "quantity")),
            ),
        ],
        2,
    ));

    if integer(data, "filtered_records") == 0 {
        lines.push(String::new());
        lines.push("No matching transactions for the selected filters.".to_string());
        lines.push(
            "  Widen the filters, or run `reset` in explore mode to clear them.".to_string(),
        );
        return Ok(lines.join("\n"));
    }

    let width = format::terminal_width();
    push_section(&mut lines, "Monthly revenue, cost and profit:", monthly_table(data, width));
    push_section(
        &mut lines,
        "Sub-categories by quantity sold:",
        quantity_table(data, width),
    );
    push_section(&mut lines, "Sub-categories by profit:", profit_table(data, width));
    push_section(&mut lines, "Profit by country:", country_table(data, width));
    push_section(
        &mut lines,
        "Top sub-category by customer age:",
        age_table(data, width),
    );

    Ok(lines.join("\n"))
}

fn heading_lines(command: &str, data: &Value) -> Vec<String> {
    let source = data.get("source");
    let label = source
        .and_then(|value| value.get("label"))
        .and_then(Value::as_str)
        .unwrap_or("unknown source");

    let mut lines = vec![format!("Sales dashboard: {label}")];
    if command == "demo" {
        lines.push(
            "Using bundled sample data. Run `salesdash dash --data <path>` for your own file."
                .to_string(),
        );
    }

    lines.push(format!("Filters: {}", describe_selection(data.get("selection"))));
    lines.push(format!(
        "Showing {} of {} transactions",
        format_count(integer(data, "filtered_records")),
        format_count(integer(data, "source_records"))
    ));

    if let Some(range) = source.and_then(|value| value.get("data_range")) {
        let earliest = range.get("earliest").and_then(Value::as_str);
        let latest = range.get("latest").and_then(Value::as_str);
        if earliest.is_some() || latest.is_some() {
            lines.push(format!(
                "Data covers {} to {}",
                earliest.unwrap_or("unknown"),
                latest.unwrap_or("unknown")
            ));
        }
    }

    if let Some(summary) = source.and_then(|value| value.get("load_summary")) {
        let skipped = integer(summary, "rows_skipped");
        if skipped > 0 {
            lines.push(format!(
                "Note: {} row(s) with blank numeric fields were skipped.",
                format_count(skipped)
            ));
        }
    }

    lines
}

fn describe_selection(selection: Option<&Value>) -> String {
    let Some(selection) = selection else {
        return "none".to_string();
    };

    let choice = |key: &str| {
        selection
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("all"))
            .unwrap_or("All")
            .to_string()
    };
    let age_min = selection.get("age_min").and_then(Value::as_i64);
    let age_max = selection.get("age_max").and_then(Value::as_i64);
    let age = match (age_min, age_max) {
        (None, None) => "All".to_string(),
        (Some(min), None) => format!("{min}+"),
        (None, Some(max)) => format!("up to {max}"),
        (Some(min), Some(max)) => format!("{min}-{max}"),
    };

    format!(
        "country={}, year={}, category={}, age={age}",
        choice("country"),
        choice("year"),
        choice("product_category")
    )
}

fn push_section(lines: &mut Vec<String>, title: &str, table: Vec<String>) {
    if table.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(title.to_string());
    lines.extend(table);
}

fn monthly_table(data: &Value, width: usize) -> Vec<String> {
    let points = rows(data, "monthly");
    let scale = bar_scale(points.iter().map(|point| number(point, "revenue")));
    let table_rows = points
        .iter()
        .map(|point| {
            let revenue = number(point, "revenue");
            vec![
                text(point, "year_month"),
                format_money(revenue),
                format_money(number(point, "cost")),
                format_money(number(point, "profit")),
                bar(revenue, scale, BAR_WIDTH),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table_or_blocks(
        &[
            Column::left("Month"),
            Column::right("Revenue"),
            Column::right("Cost"),
            Column::right("Profit"),
            Column::left(""),
        ],
        &table_rows,
        width,
        "Month",
    )
}

fn quantity_table(data: &Value, width: usize) -> Vec<String> {
    let ranks = rows(data, "sub_category_by_quantity");
    let scale = bar_scale(ranks.iter().map(|rank| integer(rank, "quantity") as f64));
    let table_rows = ranks
        .iter()
        .map(|rank| {
            let quantity = integer(rank, "quantity");
            vec![
                text(rank, "sub_category"),
                format_count(quantity),
                bar(quantity as f64, scale, BAR_WIDTH),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table_or_blocks(
        &[
            Column::left("Sub Category"),
            Column::right("Quantity"),
            Column::left(""),
        ],
        &table_rows,
        width,
        "Sub-category",
    )
}

fn profit_table(data: &Value, width: usize) -> Vec<String> {
    let ranks = rows(data, "sub_category_by_profit");
    let scale = bar_scale(ranks.iter().map(|rank| number(rank, "profit")));
    let table_rows = ranks
        .iter()
        .map(|rank| {
            let profit = number(rank, "profit");
            vec![
                text(rank, "sub_category"),
                format_money(profit),
                bar(profit, scale, BAR_WIDTH),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table_or_blocks(
        &[
            Column::left("Sub Category"),
            Column::right("Profit"),
            Column::left(""),
        ],
        &table_rows,
        width,
        "Sub-category",
    )
}

fn country_table(data: &Value, width: usize) -> Vec<String> {
    let shares = rows(data, "country_profit");
    let scale = bar_scale(shares.iter().map(|share| number(share, "share")));
    let table_rows = shares
        .iter()
        .map(|share| {
            let fraction = number(share, "share");
            vec![
                text(share, "country"),
                format_money(number(share, "profit")),
                format_percent(fraction),
                bar(fraction, scale, BAR_WIDTH),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table_or_blocks(
        &[
            Column::left("Country"),
            Column::right("Profit"),
            Column::right("Share"),
            Column::left(""),
        ],
        &table_rows,
        width,
        "Country",
    )
}

fn age_table(data: &Value, width: usize) -> Vec<String> {
    let entries = rows(data, "top_sub_category_by_age");
    let scale = bar_scale(entries.iter().map(|entry| integer(entry, "quantity") as f64));
    let table_rows = entries
        .iter()
        .map(|entry| {
            let quantity = integer(entry, "quantity");
            vec![
                integer(entry, "customer_age").to_string(),
                text(entry, "sub_category"),
                format_count(quantity),
                bar(quantity as f64, scale, BAR_WIDTH),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table_or_blocks(
        &[
            Column::right("Age"),
            Column::left("Sub Category"),
            Column::right("Quantity"),
            Column::left(""),
        ],
        &table_rows,
        width,
        "Age",
    )
}

fn rows<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

fn number(row: &Value, key: &str) -> f64 {
    row.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn integer(row: &Value, key: &str) -> i64 {
    row.get(key).and_then(Value::as_i64).unwrap_or(0)
}

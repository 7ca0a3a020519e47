use std::io;

use serde_json::Value;

use super::format;

pub fn render_filters(data: &Value) -> io::Result<String> {
    let countries = joined(data, "countries")?;
    let years = joined(data, "years")?;
    let categories = joined(data, "product_categories")?;
    let ages = match data.get("customer_age") {
        Some(Value::Object(bounds)) => format!(
            "{} to {}",
            bounds.get("min").and_then(Value::as_i64).unwrap_or(0),
            bounds.get("max").and_then(Value::as_i64).unwrap_or(0)
        ),
        _ => "none".to_string(),
    };

    let label = data
        .get("source")
        .and_then(|source| source.get("label"))
        .and_then(Value::as_str)
        .unwrap_or("unknown source");

    let mut lines = vec![format!("Filter values in {label}:")];
    lines.extend(format::key_value_rows(
        &[
            ("Countries:", countries),
            ("Years:", years),
            ("Product categories:", categories),
            ("Customer age:", ages),
        ],
        2,
    ));
    lines.push(String::new());
    lines.push("Apply them with:".to_string());
    lines.push(
        "  salesdash dash --country <name> --year <year> --category <name> --age-min <n> --age-max <n>"
            .to_string(),
    );

    Ok(lines.join("\n"))
}

fn joined(data: &Value, key: &str) -> io::Result<String> {
    let values = data
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other(format!("filters output requires {key}")))?;

    if values.is_empty() {
        return Ok("none".to_string());
    }

    Ok(values
        .iter()
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<String>>()
        .join(", "))
}

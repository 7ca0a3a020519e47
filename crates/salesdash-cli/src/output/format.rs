use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

impl<'a> Column<'a> {
    pub const fn left(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Left,
        }
    }

    pub const fn right(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Right,
        }
    }
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
pub const BAR_WIDTH: usize = 24;
const BAR_FULL: char = '█';
const BAR_NEGATIVE: char = '░';

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(100);
    cmp::max(from_env, 40)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{}  {value}", pad(label, label_width, Align::Left)))
        .collect()
}

/// Renders an aligned table, or numbered blocks when the table would not fit
/// in `max_width` columns.
pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(columns, rows);
    let total = INDENT + widths.iter().sum::<usize>() + COLUMN_GAP * (widths.len() - 1);
    if total > max_width {
        return render_blocks(columns, rows, block_label);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();

    let mut output = Vec::with_capacity(rows.len() + 1);
    output.push(format_row(columns, &header, &widths));
    output.extend(rows.iter().map(|row| format_row(columns, row, &widths)));
    output
}

/// Horizontal bar proportional to `|value| / scale`. Negative values use a
/// lighter glyph so losses stand out next to gains.
pub fn bar(value: f64, scale: f64, width: usize) -> String {
    if !value.is_finite() || !scale.is_finite() || scale <= 0.0 {
        return String::new();
    }
    let ratio = (value.abs() / scale).min(1.0);
    let mut cells = (ratio * width as f64).round() as usize;
    if cells == 0 && value != 0.0 {
        cells = 1;
    }
    let glyph = if value < 0.0 { BAR_NEGATIVE } else { BAR_FULL };
    std::iter::repeat_n(glyph, cells).collect()
}

/// Largest absolute value in `values`, used as the shared bar scale.
pub fn bar_scale(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(0.0, |max, value| max.max(value.abs()))
}

pub fn format_money(value: f64) -> String {
    let cents = format!("{:.2}", value.abs());
    let (whole, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let sign = if value < 0.0 && cents != "0.00" { "-" } else { "" };
    format!("{sign}${}.{fraction}", group_thousands(whole))
}

pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(&digits))
}

pub fn format_percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn pad(value: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(value)));
    match align {
        Align::Left => format!("{value}{fill}"),
        Align::Right => format!("{fill}{value}"),
    }
}

fn column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| display_width(column.name))
        .collect::<Vec<usize>>();

    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, display_width(value));
            }
        }
    }

    widths
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, width))| {
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            pad(value, *width, column.align)
        })
        .collect::<Vec<String>>();

    let line = format!("{}{}", " ".repeat(INDENT), pieces.join("  "));
    line.trim_end().to_string()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();
    let label_width = labels.iter().map(|label| display_width(label)).max().unwrap_or(0);

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        output.push(format!("  {block_label} {}:", row_index + 1));

        for (column_index, label) in labels.iter().enumerate() {
            let value = row.get(column_index).map(String::as_str).unwrap_or("");
            output.push(format!("    {}  {value}", pad(label, label_width, Align::Left)).trim_end().to_string());
        }

        if row_index + 1 < rows.len() {
            output.push(String::new());
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::{
        Column, bar, bar_scale, format_count, format_money, format_percent, key_value_rows,
        render_table_or_blocks,
    };

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Total Revenue:", "$10.00".to_string()),
                ("Rows:", "4".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Total Revenue:  $10.00");
        assert_eq!(rows[1], "  Rows:           4");
    }

    #[test]
    fn money_uses_dollar_sign_and_thousands_separators() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(12.5), "$12.50");
        assert_eq!(format_money(1234.567), "$1,234.57");
        assert_eq!(format_money(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_money(-987_654.321), "-$987,654.32");
        assert_eq!(format_money(-0.001), "$0.00");
    }

    #[test]
    fn counts_and_percentages() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(-45_210), "-45,210");
        assert_eq!(format_percent(0.25), "25.0%");
        assert_eq!(format_percent(-0.125), "-12.5%");
    }

    #[test]
    fn bars_scale_to_the_largest_magnitude() {
        let scale = bar_scale([10.0, -20.0, 5.0]);
        assert_eq!(scale, 20.0);
        assert_eq!(bar(20.0, scale, 10).chars().count(), 10);
        assert_eq!(bar(10.0, scale, 10).chars().count(), 5);
        assert!(bar(-20.0, scale, 10).chars().all(|ch| ch == '░'));
        assert_eq!(bar(0.01, scale, 10).chars().count(), 1);
        assert_eq!(bar(0.0, scale, 10), "");
        assert_eq!(bar(5.0, 0.0, 10), "");
    }

    #[test]
    fn table_aligns_columns_by_character_width() {
        let columns = [Column::left("Sub Category"), Column::right("Quantity"), Column::left("")];
        let rows = vec![
            vec!["Tires and Tubes".to_string(), "12".to_string(), "████".to_string()],
            vec!["Caps".to_string(), "3".to_string(), "█".to_string()],
        ];

        let rendered = render_table_or_blocks(&columns, &rows, 80, "Row");
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0], "  Sub Category     Quantity");
        assert_eq!(rendered[1], "  Tires and Tubes        12  ████");
        assert_eq!(rendered[2], "  Caps                    3  █");
    }

    #[test]
    fn narrow_width_falls_back_to_blocks() {
        let columns = [
            Column::left("Country"),
            Column::right("Profit"),
            Column::right("Share"),
        ];
        let rows = vec![vec![
            "United Kingdom".to_string(),
            "$1,234.00".to_string(),
            "40.0%".to_string(),
        ]];

        let rendered = render_table_or_blocks(&columns, &rows, 20, "Country");
        assert_eq!(rendered[0], "  Country 1:");
        assert!(rendered[1].contains("Country:"));
        assert!(rendered[2].contains("Profit:"));
        assert!(rendered[3].contains("Share:"));
    }
}

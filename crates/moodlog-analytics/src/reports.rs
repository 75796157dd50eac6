//! Plain-text rendering of journal listings and daily statistics.

use chrono::{DateTime, FixedOffset};

use moodlog_core::error::{JournalError, Result};
use moodlog_core::table::{Table, Value};

use crate::daily::DailyStat;

/// Render the `last` most recent entries, newest first, as an aligned text
/// table over the journal's columns.
pub fn render_recent(table: &Table, last: usize) -> Result<String> {
    let timestamps = table
        .column("timestamp")
        .ok_or_else(|| JournalError::InvalidFormat("journal has no timestamp column".into()))?;

    let mut order: Vec<(usize, DateTime<FixedOffset>)> = Vec::with_capacity(table.len());
    for (row, value) in timestamps.values.iter().enumerate() {
        let raw = value.as_text().ok_or_else(|| {
            JournalError::InvalidFormat(format!("row {} has a non-text timestamp", row))
        })?;
        let parsed = DateTime::parse_from_rfc3339(raw)
            .map_err(|e| JournalError::InvalidFormat(format!("row {} timestamp: {}", row, e)))?;
        order.push((row, parsed));
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    let rows: Vec<usize> = order.into_iter().take(last).map(|(row, _)| row).collect();

    Ok(render_rows(table, &rows))
}

/// Render daily stats oldest first, with the rolling column named after the
/// window (`avg_mood_7d` for a 7-day window).
pub fn render_daily(stats: &[DailyStat], window: usize) -> String {
    let rolling_name = format!("avg_mood_{}d", window);
    let header = ["date", "avg_mood", "entries", rolling_name.as_str()];

    let cells: Vec<Vec<String>> = stats
        .iter()
        .map(|s| {
            vec![
                s.date.to_string(),
                format!("{:.2}", s.avg_mood),
                s.entries.to_string(),
                s.rolling.map(|r| format!("{:.2}", r)).unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();

    render_grid(&header.map(String::from), &cells)
}

fn render_rows(table: &Table, rows: &[usize]) -> String {
    let names = table.column_names();
    let header: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|&row| {
            names
                .iter()
                .map(|name| format_cell(table.get(row, name).unwrap_or(&Value::Null)))
                .collect()
        })
        .collect();
    render_grid(&header, &cells)
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".into(),
        Value::Int(v) => v.to_string(),
        Value::Float(v) => format!("{:.2}", v),
        Value::Text(v) => v.clone(),
        Value::List(v) => {
            if v.is_empty() {
                "-".into()
            } else {
                v.join(",")
            }
        }
    }
}

/// Column-aligned grid with a header row, two spaces between columns.
fn render_grid(header: &[String], cells: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in cells {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut out = String::new();
    render_line(&mut out, header, &widths);
    for row in cells {
        render_line(&mut out, row, &widths);
    }
    out
}

fn render_line(out: &mut String, row: &[String], widths: &[usize]) {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&format!("{:<width$}", cell, width = widths[i]));
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

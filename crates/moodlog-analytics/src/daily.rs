//! Day-level aggregation over the journal table.
//!
//! Groups entries by the date component of their stored timestamp, computes
//! mean mood and entry counts per day, and optionally a trailing rolling
//! mean over the per-day averages.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use moodlog_core::error::{JournalError, Result};
use moodlog_core::table::Table;

/// Aggregate statistics for one calendar day. Derived on demand, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub avg_mood: f64,
    pub entries: u32,
    /// Trailing rolling mean of `avg_mood`; `None` until the window fills.
    pub rolling: Option<f64>,
}

/// Compute per-day mean mood and entry counts, ascending by date.
///
/// The date is taken from the timestamp as stored; no timezone conversion.
/// An empty table yields an empty result.
pub fn daily_stats(table: &Table) -> Result<Vec<DailyStat>> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let timestamps = table
        .column("timestamp")
        .ok_or_else(|| JournalError::InvalidFormat("journal has no timestamp column".into()))?;
    let moods = table
        .column("mood")
        .ok_or_else(|| JournalError::InvalidFormat("journal has no mood column".into()))?;

    let mut groups: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    for row in 0..table.len() {
        let raw = timestamps.values[row].as_text().ok_or_else(|| {
            JournalError::InvalidFormat(format!("row {} has a non-text timestamp", row))
        })?;
        let date = DateTime::parse_from_rfc3339(raw)
            .map_err(|e| JournalError::InvalidFormat(format!("row {} timestamp: {}", row, e)))?
            .date_naive();
        let mood = moods.values[row].as_f64().ok_or_else(|| {
            JournalError::InvalidFormat(format!("row {} has a non-numeric mood", row))
        })?;

        let group = groups.entry(date).or_insert((0.0, 0));
        group.0 += mood;
        group.1 += 1;
    }

    tracing::debug!(days = groups.len(), rows = table.len(), "grouped journal by day");

    Ok(groups
        .into_iter()
        .map(|(date, (sum, count))| DailyStat {
            date,
            avg_mood: sum / count as f64,
            entries: count,
            rolling: None,
        })
        .collect())
}

/// Fill the rolling column: for each day, the mean of `avg_mood` over the
/// trailing `window` days of data ending at and including that day.
///
/// `window >= 1` is the caller's contract; the CLI rejects anything else
/// before getting here.
pub fn with_rolling(mut stats: Vec<DailyStat>, window: usize) -> Vec<DailyStat> {
    for i in 0..stats.len() {
        if i + 1 >= window {
            let sum: f64 = stats[i + 1 - window..=i].iter().map(|s| s.avg_mood).sum();
            stats[i].rolling = Some(sum / window as f64);
        }
    }
    stats
}

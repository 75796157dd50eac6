//! Aggregation and reporting for moodlog journals.
//!
//! Computes day-level statistics (mean mood, entry counts, trailing rolling
//! averages) from the journal table and renders them as text.

pub mod daily;
pub mod reports;

pub use daily::{daily_stats, with_rolling, DailyStat};
pub use reports::{render_daily, render_recent};

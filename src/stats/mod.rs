//! Stats module - descriptive statistics and frequency counts

mod calculator;
mod frequency;

pub use calculator::{ColumnStats, StatsCalculator};
pub use frequency::{value_counts, GroupCounts};

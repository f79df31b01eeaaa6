//! Text report written to stdout.

use crate::stats::{ColumnStats, GroupCounts};
use std::fmt::Write;

const MISSING_LABEL: &str = "NaN";

pub fn format_group_counts(counts: &GroupCounts) -> String {
    let labels: Vec<&str> = counts
        .entries
        .iter()
        .map(|(value, _)| value.as_deref().unwrap_or(MISSING_LABEL))
        .collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = format!("Agrupación por {}:\n", counts.column);
    for (label, (_, count)) in labels.iter().zip(&counts.entries) {
        let pad = width - label.chars().count();
        let _ = writeln!(out, "{label}{}    {count}", " ".repeat(pad));
    }
    out
}

/// Values print at full precision (`150.0`, `0.004`), never rounded.
pub fn format_stats(stats: &ColumnStats) -> String {
    let mode = stats
        .mode
        .map(|m| format!("{m:?}"))
        .unwrap_or_else(|| "None".to_string());

    format!(
        "Estadísticas para {}:\nMedia: {:?}\nMediana: {:?}\nModa: {}\nDesviación Estándar: {:?}\n",
        stats.column, stats.mean, stats.median, mode, stats.std_dev
    )
}

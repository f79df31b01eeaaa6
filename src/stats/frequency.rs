//! Frequency counts per distinct value of a column.

use crate::error::{AnalysisError, Result};
use polars::prelude::*;
use std::collections::HashMap;

/// Occurrence counts ordered by descending count. `None` is the missing group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCounts {
    pub column: String,
    pub entries: Vec<(Option<String>, usize)>,
}

impl GroupCounts {
    /// Total number of rows counted across all groups.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    #[cfg(test)]
    pub fn get(&self, value: Option<&str>) -> Option<usize> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_deref() == value)
            .map(|(_, count)| *count)
    }
}

/// Count rows per distinct value of `column`.
///
/// Ties keep the order in which values first appear. Non-text columns are
/// grouped by their textual rendering.
pub fn value_counts(df: &DataFrame, column: &str) -> Result<GroupCounts> {
    let series = df
        .column(column)
        .map_err(|_| AnalysisError::column_not_found(column))?;
    let text = series.cast(&DataType::String)?;

    let mut index: HashMap<Option<&str>, usize> = HashMap::new();
    let mut entries: Vec<(Option<String>, usize)> = Vec::new();

    for value in text.str()?.into_iter() {
        match index.get(&value) {
            Some(&pos) => entries[pos].1 += 1,
            None => {
                index.insert(value, entries.len());
                entries.push((value.map(str::to_string), 1));
            }
        }
    }

    // Stable sort: first-seen order survives among equal counts.
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(GroupCounts {
        column: column.to_string(),
        entries,
    })
}

//! Trimming to the engine-running window

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::AlignedTable;

/// How far beyond the first/last running sample the window extends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimMargin {
    /// Whole rows on the master time axis
    Rows(usize),
    /// Seconds on the master time axis
    Seconds(f64),
}

impl Default for TrimMargin {
    fn default() -> Self {
        TrimMargin::Rows(1)
    }
}

/// Compute the rows to keep, based on where `channel` is present and nonzero.
///
/// Returns `None` when the channel is absent or never present-and-nonzero,
/// meaning the table should be left untouched.
pub fn trim_window(
    table: &AlignedTable,
    channel: &str,
    margin: TrimMargin,
) -> Option<RangeInclusive<usize>> {
    let column = table.column(channel)?;
    let mut running = column
        .values
        .iter()
        .enumerate()
        .filter(|(_, v)| matches!(v, Some(v) if *v != 0.0))
        .map(|(pos, _)| pos);

    let first = running.next()?;
    let last = running.last().unwrap_or(first);
    let last_row = table.row_count() - 1;

    match margin {
        TrimMargin::Rows(n) => Some(first.saturating_sub(n)..=last.saturating_add(n).min(last_row)),
        TrimMargin::Seconds(secs) => {
            let times = table.times();
            let start_time = times[first] - secs;
            let end_time = times[last] + secs;
            let start = times.partition_point(|&t| t < start_time);
            let end = times.partition_point(|&t| t <= end_time).saturating_sub(1);
            Some(start..=end)
        }
    }
}

//! Time alignment
//!
//! Places every channel on the time axis of the fastest ("master") channel.
//! Values are carried over only where a channel's own sample time equals a
//! master time exactly; nothing is interpolated.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use super::{Channel, Precision};
use crate::error::ConvertError;

/// One output column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Channel name
    pub name: String,
    /// Precision used when rendering values
    pub precision: Precision,
    /// One entry per master timestamp; `None` when the channel has no sample there
    pub values: Vec<Option<f64>>,
}

/// Channels aligned onto a single time axis
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTable {
    master: String,
    master_frequency: f64,
    times: Vec<f64>,
    columns: Vec<Column>,
}

impl AlignedTable {
    /// Name of the channel defining the time axis
    pub fn master(&self) -> &str {
        &self.master
    }

    /// Sample rate of the master channel in Hz
    pub fn master_frequency(&self) -> f64 {
        self.master_frequency
    }

    /// Row times in seconds, ascending
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Columns in channel order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.times.len()
    }

    /// Keep only the rows at positions in `rows`
    pub fn retain_rows(&mut self, rows: RangeInclusive<usize>) {
        let start = *rows.start();
        let end = rows.end().saturating_add(1).min(self.times.len());
        if start >= end {
            self.times.clear();
            self.columns.iter_mut().for_each(|c| c.values.clear());
            return;
        }

        self.times = self.times[start..end].to_vec();
        for column in &mut self.columns {
            column.values = column.values[start..end].to_vec();
        }
    }
}

/// Pick the master channel: strictly highest frequency, first one wins ties
fn master_channel(channels: &[Channel]) -> Option<&Channel> {
    let mut max_freq = 0.0;
    let mut master = None;
    for channel in channels {
        if channel.frequency > max_freq {
            max_freq = channel.frequency;
            master = Some(channel);
        }
    }
    master
}

/// Collapse channels by name. A later channel replaces an earlier one's data
/// but the column keeps the position where the name first appeared.
fn unique_by_name(channels: &[Channel]) -> Vec<&Channel> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut unique: Vec<&Channel> = Vec::with_capacity(channels.len());

    for channel in channels {
        match positions.get(channel.name.as_str()) {
            Some(&pos) => {
                tracing::warn!("Duplicate channel '{}', keeping the later one", channel.name);
                unique[pos] = channel;
            }
            None => {
                positions.insert(&channel.name, unique.len());
                unique.push(channel);
            }
        }
    }

    unique
}

/// Look up `channel`'s value at each of `times` (ascending) by exact time match
fn reindex(channel: &Channel, times: &[f64]) -> Vec<Option<f64>> {
    if !(channel.frequency > 0.0) {
        return vec![None; times.len()];
    }

    let mut values = Vec::with_capacity(times.len());
    let mut i = 0;
    for &t in times {
        while i < channel.samples.len() && channel.timestamp(i) < t {
            i += 1;
        }
        let value = if i < channel.samples.len() && channel.timestamp(i) == t {
            Some(channel.samples[i]).filter(|v| !v.is_nan())
        } else {
            None
        };
        values.push(value);
    }
    values
}

/// Align `channels` onto the master channel's time axis
pub fn align(channels: &[Channel]) -> Result<AlignedTable, ConvertError> {
    let master = master_channel(channels).ok_or(ConvertError::NoMasterChannel)?;
    let columns = unique_by_name(channels);

    let master_series = columns
        .iter()
        .find(|c| c.name == master.name)
        .copied()
        .unwrap_or(master);
    let times: Vec<f64> = master_series.timestamps().collect();

    let columns = columns
        .into_iter()
        .map(|channel| {
            if !(channel.frequency > 0.0) {
                tracing::warn!(
                    "Channel '{}' has no usable sample rate ({} Hz); column left empty",
                    channel.name,
                    channel.frequency
                );
            }
            Column {
                name: channel.name.clone(),
                precision: channel.precision,
                values: reindex(channel, &times),
            }
        })
        .collect();

    Ok(AlignedTable {
        master: master.name.clone(),
        master_frequency: master.frequency,
        times,
        columns,
    })
}

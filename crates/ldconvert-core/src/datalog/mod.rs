//! Data Logging
//!
//! In-memory channel model, time alignment, trimming, and CSV export.

mod align;
mod format;
mod trim;

pub use align::{align, AlignedTable, Column};
pub use format::{format_value, write_csv, write_csv_to, LogFormat};
pub use trim::{trim_window, TrimMargin};

use serde::{Deserialize, Serialize};

use crate::ld::LdHeader;

/// Numeric precision a channel's samples were recorded at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Precision {
    /// IEEE half precision
    Half,
    /// IEEE single precision
    Single,
    /// Integers and anything computed in double precision
    #[default]
    Double,
}

/// A named, independently timed sample sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel name, used as the column key
    pub name: String,
    /// Abbreviated name
    pub short_name: String,
    /// Engineering unit
    pub unit: String,
    /// Sample rate in Hz
    pub frequency: f64,
    /// Precision the samples were stored at
    pub precision: Precision,
    /// Samples in engineering units; NaN means missing
    pub samples: Vec<f64>,
}

impl Channel {
    /// Create a double-precision channel with no unit
    pub fn new(name: impl Into<String>, frequency: f64, samples: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            short_name: String::new(),
            unit: String::new(),
            frequency,
            precision: Precision::Double,
            samples,
        }
    }

    /// Set the recorded precision
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the channel holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time in seconds of sample `index`
    pub fn timestamp(&self, index: usize) -> f64 {
        index as f64 / self.frequency
    }

    /// Times in seconds of every sample
    pub fn timestamps(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples.len()).map(|i| self.timestamp(i))
    }
}

/// A decoded log: header metadata plus channels in file order
#[derive(Debug, Clone)]
pub struct Log {
    /// Header record
    pub head: LdHeader,
    /// Channels in the order they appear in the file
    pub channels: Vec<Channel>,
}

impl Log {
    /// Find a channel by name
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }
}

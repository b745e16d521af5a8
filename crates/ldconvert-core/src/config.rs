//! Conversion settings
//!
//! Defaults reproduce the standard conversion: trim on the motor RPM channel
//! with a one-row margin, time column `Time_s`, short comment appended to
//! output names.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::datalog::TrimMargin;
use crate::error::ConvertError;

/// Channel whose nonzero readings mark the engine as running
pub const DEFAULT_TRIM_CHANNEL: &str = "Car Data Motor MotorRPM";

/// Header of the time axis column
pub const DEFAULT_TIME_COLUMN: &str = "Time_s";

/// Settings for converting a log to CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Channel used to find the engine-running window
    pub trim_channel: String,
    /// Margin kept around the running window
    pub trim_margin: TrimMargin,
    /// Header of the time axis column
    pub time_column: String,
    /// Append `_<short comment>` to output file names
    pub append_short_comment: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            trim_channel: DEFAULT_TRIM_CHANNEL.to_string(),
            trim_margin: TrimMargin::default(),
            time_column: DEFAULT_TIME_COLUMN.to_string(),
            append_short_comment: true,
        }
    }
}

impl ConvertConfig {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConvertError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConvertError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.time_column.is_empty() {
            return Err(ConvertError::ConfigError(
                "time_column must not be empty".to_string(),
            ));
        }
        if let TrimMargin::Seconds(secs) = self.trim_margin {
            if !secs.is_finite() || secs < 0.0 {
                return Err(ConvertError::ConfigError(format!(
                    "trim_margin seconds must be a non-negative number, got {secs}"
                )));
            }
        }
        Ok(())
    }
}

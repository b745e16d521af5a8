//! Single-log conversion
//!
//! Decode → align on the master channel → trim to the engine-running
//! window → name the output → write CSV.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ConvertConfig;
use crate::datalog::{align, trim_window, write_csv, AlignedTable, Log};
use crate::error::ConvertError;
use crate::ld;

/// An aligned, trimmed table ready for export
#[derive(Debug, Clone)]
pub struct Resampled {
    /// The table
    pub table: AlignedTable,
    /// Rows on the master time axis before trimming
    pub aligned_rows: usize,
    /// Row positions kept by trimming, if trimming applied
    pub trim: Option<RangeInclusive<usize>>,
}

/// Outcome of converting one log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionSummary {
    /// Source `.ld` file
    pub input: PathBuf,
    /// CSV file actually written
    pub output: PathBuf,
    /// Channel defining the time axis
    pub master_channel: String,
    /// Sample rate of the master channel in Hz
    pub master_frequency: f64,
    /// Rows before trimming
    pub aligned_rows: usize,
    /// Rows written
    pub rows: usize,
    /// Row positions kept by trimming, if trimming applied
    pub trim: Option<RangeInclusive<usize>>,
}

/// Align a decoded log and trim it to the engine-running window
pub fn resample_and_trim(log: &Log, config: &ConvertConfig) -> Result<Resampled, ConvertError> {
    let mut table = align(&log.channels)?;
    let aligned_rows = table.row_count();
    // Values are reindexed, not interpolated: slower channels only keep
    // samples whose time lands exactly on a master timestamp.
    tracing::info!(
        "Resampling all channels to {}Hz (based on '{}')",
        table.master_frequency(),
        table.master()
    );

    let trim = trim_window(&table, &config.trim_channel, config.trim_margin);
    match &trim {
        Some(rows) => {
            tracing::info!("Trimming data to start from row: {}", rows.start());
            tracing::info!("Trimming data to end at row: {}", rows.end());
            table.retain_rows(rows.clone());
        }
        None if table.column(&config.trim_channel).is_some() => {
            tracing::debug!("'{}' is never nonzero, not trimming", config.trim_channel);
        }
        None => {
            tracing::debug!("No '{}' channel, not trimming", config.trim_channel);
        }
    }

    Ok(Resampled {
        table,
        aligned_rows,
        trim,
    })
}

/// Insert `_<comment>` between a path's stem and its extension.
///
/// Path separators in the comment are replaced so the file stays in the
/// requested directory.
pub fn output_path_with_comment(path: &Path, comment: Option<&str>) -> PathBuf {
    let Some(comment) = comment.filter(|c| !c.is_empty()) else {
        return path.to_path_buf();
    };

    let comment = comment.replace(['/', '\\'], "_");
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{stem}_{comment}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{comment}"),
    };
    path.with_file_name(file_name)
}

/// Convert one `.ld` file to CSV.
///
/// `output` is the requested path; the file actually written may carry the
/// log's short comment (see [`output_path_with_comment`]).
pub fn convert_file(
    input: &Path,
    output: &Path,
    config: &ConvertConfig,
) -> Result<ConversionSummary, ConvertError> {
    tracing::info!("Reading MoTeC file: {}", input.display());
    let log = ld::parse(input).map_err(|source| ConvertError::DecodeError {
        path: input.to_path_buf(),
        source,
    })?;
    tracing::info!("{}", log.head.summary());

    convert_log(&log, input, output, config)
}

/// Convert an already decoded log to CSV
pub fn convert_log(
    log: &Log,
    input: &Path,
    output: &Path,
    config: &ConvertConfig,
) -> Result<ConversionSummary, ConvertError> {
    let Resampled {
        table,
        aligned_rows,
        trim,
    } = resample_and_trim(log, config)?;

    let output = match log.head.short_comment() {
        Some(comment) if config.append_short_comment => {
            let path = output_path_with_comment(output, Some(comment));
            tracing::info!("Appending short comment to filename: {}", path.display());
            path
        }
        _ => output.to_path_buf(),
    };

    write_csv(&output, &table, &config.time_column)?;
    tracing::info!("Successfully exported to: {}", output.display());

    Ok(ConversionSummary {
        input: input.to_path_buf(),
        output,
        master_channel: table.master().to_string(),
        master_frequency: table.master_frequency(),
        aligned_rows,
        rows: table.row_count(),
        trim,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_inserted_before_extension() {
        assert_eq!(
            output_path_with_comment(Path::new("out.csv"), Some("run1")),
            PathBuf::from("out_run1.csv")
        );
        assert_eq!(
            output_path_with_comment(Path::new("dir/autox.csv"), Some("heat 2")),
            PathBuf::from("dir/autox_heat 2.csv")
        );
    }

    #[test]
    fn test_no_comment_keeps_path() {
        assert_eq!(
            output_path_with_comment(Path::new("out.csv"), None),
            PathBuf::from("out.csv")
        );
        assert_eq!(
            output_path_with_comment(Path::new("out.csv"), Some("")),
            PathBuf::from("out.csv")
        );
    }

    #[test]
    fn test_comment_without_extension() {
        assert_eq!(
            output_path_with_comment(Path::new("out"), Some("run1")),
            PathBuf::from("out_run1")
        );
    }

    #[test]
    fn test_comment_separators_replaced() {
        assert_eq!(
            output_path_with_comment(Path::new("out.csv"), Some("a/b\\c")),
            PathBuf::from("out_a_b_c.csv")
        );
    }
}

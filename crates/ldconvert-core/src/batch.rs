//! Folder conversion
//!
//! Converts every `.ld` file in a folder, one after another. The first
//! failure stops the run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ConvertConfig;
use crate::convert::{convert_file, ConversionSummary};
use crate::datalog::LogFormat;
use crate::error::ConvertError;

/// Summary of a folder conversion
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Converted files in processing order
    pub conversions: Vec<ConversionSummary>,
}

impl BatchReport {
    /// Number of converted files
    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    /// Check if nothing was converted
    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }
}

/// List `.ld` files directly inside `folder`, sorted by file name
pub fn list_log_files(folder: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let read_dir_error = |source: std::io::Error| ConvertError::ReadDirError {
        path: folder.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(folder).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::warn!("Skipping non UTF-8 file name {:?}", name);
            continue;
        };
        if LogFormat::Ld.matches(name) && entry.path().is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

/// Output file name for an input log: the `ld` suffix swapped for `csv`
pub fn csv_name_for(file_name: &str) -> String {
    let stem = file_name
        .strip_suffix(LogFormat::Ld.extension())
        .unwrap_or(file_name);
    format!("{stem}{}", LogFormat::Csv.extension())
}

/// Convert every `.ld` file in `input` into `output`
pub fn convert_folder(
    input: &Path,
    output: &Path,
    config: &ConvertConfig,
) -> Result<BatchReport, ConvertError> {
    let files = list_log_files(input)?;
    if files.is_empty() {
        tracing::warn!("No .ld files found in {}", input.display());
    }

    fs::create_dir_all(output)?;

    let mut report = BatchReport::default();
    for file in files {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .map(csv_name_for)
            .unwrap_or_default();
        let summary = convert_file(&file, &output.join(file_name), config)?;
        report.conversions.push(summary);
    }

    Ok(report)
}

//! Log file formats
//!
//! Input/output file naming and CSV export of aligned tables.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use half::f16;

use super::{AlignedTable, Precision};

/// Supported log file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// MoTeC binary log (.ld)
    Ld,
    /// Comma-separated values
    Csv,
}

impl LogFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            LogFormat::Ld => "ld",
            LogFormat::Csv => "csv",
        }
    }

    /// Check whether a file name carries this format's suffix (case-sensitive)
    pub fn matches(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(self.extension())
            .is_some_and(|stem| stem.ends_with('.'))
    }
}

/// Render a value the way it should appear in a CSV cell.
///
/// Shortest representation that reads back to the same number at the
/// channel's precision, always with a decimal point for finite values.
pub fn format_value(value: f64, precision: Precision) -> String {
    let text = match precision {
        Precision::Double => value.to_string(),
        Precision::Single => (value as f32).to_string(),
        Precision::Half => format_half(value),
    };
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

/// Fewest fixed decimals that read back to the same half-precision value
fn format_half(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let target = f16::from_f64(value);
    (0..=24)
        .map(|decimals| format!("{value:.decimals$}"))
        .find(|text| text.parse::<f64>().is_ok_and(|v| f16::from_f64(v) == target))
        .unwrap_or_else(|| value.to_string())
}

/// Write an aligned table as CSV to `path`
pub fn write_csv<P: AsRef<Path>>(
    path: P,
    table: &AlignedTable,
    time_column: &str,
) -> Result<(), csv::Error> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_csv_to(&mut writer, table, time_column)?;
    writer.flush()?;
    Ok(())
}

/// Write an aligned table as CSV to any writer
pub fn write_csv_to<W: Write>(
    writer: W,
    table: &AlignedTable,
    time_column: &str,
) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    // Write header
    writer.write_record(
        std::iter::once(time_column).chain(table.columns().iter().map(|c| c.name.as_str())),
    )?;

    // Write data rows
    let mut record = Vec::with_capacity(table.columns().len() + 1);
    for (row, &time) in table.times().iter().enumerate() {
        record.clear();
        record.push(format_value(time, Precision::Double));
        for column in table.columns() {
            record.push(
                column.values[row]
                    .map(|v| format_value(v, column.precision))
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

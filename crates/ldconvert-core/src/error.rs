//! Conversion errors

use std::path::PathBuf;

use thiserror::Error;

use crate::ld::LdError;

/// Errors that can occur while converting logs
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to decode {}", path.display())]
    DecodeError {
        path: PathBuf,
        #[source]
        source: LdError,
    },

    #[error("Log has no channel with a positive sample rate")]
    NoMasterChannel,

    #[error("Failed to list input folder {}", path.display())]
    ReadDirError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

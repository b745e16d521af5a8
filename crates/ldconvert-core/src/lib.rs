//! # ldconvert Core Library
//!
//! Converts MoTeC `.ld` telemetry logs into time-aligned CSV files.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - `.ld` binary decoding (header, session metadata, channels)
//! - Alignment of every channel onto the fastest channel's time axis
//! - Trimming to the window where the engine was running
//! - CSV export and folder-level batch conversion
//!
//! ## Example
//!
//! ```rust,ignore
//! use ldconvert_core::prelude::*;
//!
//! let config = ConvertConfig::default();
//! let summary = convert_file(
//!     Path::new("autox_run1.ld"),
//!     Path::new("autox_run1.csv"),
//!     &config,
//! )?;
//! println!("{} rows written to {}", summary.rows, summary.output.display());
//! ```

pub mod batch;
pub mod config;
pub mod convert;
pub mod datalog;
pub mod error;
pub mod ld;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::batch::{convert_folder, BatchReport};
    pub use crate::config::ConvertConfig;
    pub use crate::convert::{convert_file, output_path_with_comment, ConversionSummary};
    pub use crate::datalog::{align, AlignedTable, Channel, Log, TrimMargin};
    pub use crate::error::ConvertError;
    pub use crate::ld::{parse, LdError, LdHeader};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

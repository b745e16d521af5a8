//! Error types for `.ld` decoding

use thiserror::Error;

/// Errors that can occur while decoding a MoTeC `.ld` file
#[derive(Error, Debug)]
pub enum LdError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("File truncated reading {what} at offset {offset:#x}: needed {needed} bytes, {available} available")]
    Truncated {
        what: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Unsupported data type (class {class:#06x}, size {size}) in channel '{channel}'")]
    UnsupportedDataType {
        channel: String,
        class: u16,
        size: u16,
    },

    #[error("Channel list loops back to offset {0:#x}")]
    ChannelLoop(u32),
}

//! MoTeC `.ld` decoding
//!
//! Reads the binary log written by MoTeC data loggers: a fixed header,
//! optional event/venue/vehicle records, and a linked list of channel
//! metadata records each pointing at a block of raw samples.
//!
//! All multi-byte fields are little-endian.

mod channel;
mod error;
mod header;
mod reader;

pub use channel::{read_channel_list, ChannelMeta, SampleType, Scaling, CHANNEL_META_LEN};
pub use error::LdError;
pub use header::{LdEvent, LdHeader, LdVehicle, LdVenue, HEADER_LEN};

use std::fs;
use std::path::Path;

use crate::datalog::Log;

/// Read and decode an `.ld` file
pub fn parse<P: AsRef<Path>>(path: P) -> Result<Log, LdError> {
    let data = fs::read(path)?;
    parse_bytes(&data)
}

/// Decode an `.ld` file image already in memory
pub fn parse_bytes(data: &[u8]) -> Result<Log, LdError> {
    let head = LdHeader::read(data)?;
    tracing::debug!(?head, "Decoded log header");

    let metas = read_channel_list(data, head.channel_meta_ptr)?;
    if metas.len() != head.channel_count as usize {
        tracing::warn!(
            "Header declares {} channels but {} were found",
            head.channel_count,
            metas.len()
        );
    }

    let channels = metas
        .into_iter()
        .map(|meta| meta.into_channel(data))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Log { head, channels })
}

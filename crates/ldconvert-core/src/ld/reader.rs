//! Bounds-checked little-endian field access over the file image

use byteorder::{ByteOrder, LittleEndian};

use super::LdError;

/// A fixed-size record borrowed from the file image.
///
/// Construction checks the record fits inside the file, so field reads at
/// offsets inside the record length cannot go out of bounds.
pub(crate) struct Record<'a> {
    bytes: &'a [u8],
}

impl<'a> Record<'a> {
    /// Borrow `len` bytes starting at file offset `offset`
    pub fn at(data: &'a [u8], offset: usize, len: usize, what: &'static str) -> Result<Self, LdError> {
        match offset.checked_add(len) {
            Some(end) if end <= data.len() => Ok(Self {
                bytes: &data[offset..end],
            }),
            _ => Err(LdError::Truncated {
                what,
                offset,
                needed: len,
                available: data.len().saturating_sub(offset),
            }),
        }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn u16(&self, at: usize) -> u16 {
        LittleEndian::read_u16(&self.bytes[at..])
    }

    pub fn i16(&self, at: usize) -> i16 {
        LittleEndian::read_i16(&self.bytes[at..])
    }

    pub fn u32(&self, at: usize) -> u32 {
        LittleEndian::read_u32(&self.bytes[at..])
    }

    pub fn string(&self, at: usize, len: usize) -> String {
        decode_string(&self.bytes[at..at + len])
    }
}

/// Decode a fixed-width, NUL-padded text field
pub(crate) fn decode_string(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).trim().to_string()
}

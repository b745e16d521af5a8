//! Channel metadata records and sample decoding

use std::collections::HashSet;

use byteorder::{ByteOrder, LittleEndian};
use half::f16;

use super::reader::Record;
use super::LdError;
use crate::datalog::{Channel, Precision};

/// Size of a channel metadata record in bytes
pub const CHANNEL_META_LEN: usize = 124;

/// On-disk sample encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    /// Signed 16-bit integer
    I16,
    /// Signed 32-bit integer
    I32,
    /// IEEE half precision float
    F16,
    /// IEEE single precision float
    F32,
}

impl SampleType {
    /// Resolve the (class, size) pair stored in the metadata record
    pub fn from_codes(class: u16, size: u16) -> Option<Self> {
        match (class, size) {
            (0x07, 2) => Some(SampleType::F16),
            (0x07, 4) => Some(SampleType::F32),
            (0x00 | 0x03 | 0x05, 2) => Some(SampleType::I16),
            (0x00 | 0x03 | 0x05, 4) => Some(SampleType::I32),
            _ => None,
        }
    }

    /// Bytes per sample
    pub fn width(&self) -> usize {
        match self {
            SampleType::I16 | SampleType::F16 => 2,
            SampleType::I32 | SampleType::F32 => 4,
        }
    }

    /// Precision the decoded values carry
    pub fn precision(&self) -> Precision {
        match self {
            SampleType::I16 | SampleType::I32 => Precision::Double,
            SampleType::F16 => Precision::Half,
            SampleType::F32 => Precision::Single,
        }
    }

    fn read(&self, bytes: &[u8]) -> f64 {
        match self {
            SampleType::I16 => LittleEndian::read_i16(bytes) as f64,
            SampleType::I32 => LittleEndian::read_i32(bytes) as f64,
            SampleType::F16 => f16::from_bits(LittleEndian::read_u16(bytes)).to_f64(),
            SampleType::F32 => LittleEndian::read_f32(bytes) as f64,
        }
    }
}

/// Linear conversion from raw counts to engineering units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    /// Offset added after scaling
    pub shift: i16,
    /// Final multiplier
    pub mul: i16,
    /// Divisor applied to the raw value
    pub scale: i16,
    /// Power-of-ten divisor exponent
    pub dec_places: i16,
}

impl Scaling {
    /// `(raw / scale * 10^-dec + shift) * mul`
    pub fn apply(&self, raw: f64) -> f64 {
        (raw / self.scale as f64 * 10f64.powi(-(self.dec_places as i32)) + self.shift as f64)
            * self.mul as f64
    }
}

/// A channel metadata record
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMeta {
    /// Offset of the previous record (0 for the first)
    pub prev_ptr: u32,
    /// Offset of the next record (0 for the last)
    pub next_ptr: u32,
    /// Offset of the sample block
    pub data_ptr: u32,
    /// Number of samples in the block
    pub sample_count: u32,
    /// Encoding of each sample
    pub sample_type: SampleType,
    /// Sample rate in Hz
    pub frequency: u16,
    /// Raw-to-engineering conversion
    pub scaling: Scaling,
    /// Channel name
    pub name: String,
    /// Abbreviated name
    pub short_name: String,
    /// Engineering unit
    pub unit: String,
}

impl ChannelMeta {
    /// Read the metadata record at `offset`
    pub fn read(data: &[u8], offset: usize) -> Result<Self, LdError> {
        let record = Record::at(data, offset, CHANNEL_META_LEN, "channel metadata")?;
        let name = record.string(32, 32);

        let class = record.u16(18);
        let size = record.u16(20);
        let sample_type =
            SampleType::from_codes(class, size).ok_or_else(|| LdError::UnsupportedDataType {
                channel: name.clone(),
                class,
                size,
            })?;

        Ok(Self {
            prev_ptr: record.u32(0),
            next_ptr: record.u32(4),
            data_ptr: record.u32(8),
            sample_count: record.u32(12),
            sample_type,
            frequency: record.u16(22),
            scaling: Scaling {
                shift: record.i16(24),
                mul: record.i16(26),
                scale: record.i16(28),
                dec_places: record.i16(30),
            },
            name,
            short_name: record.string(64, 8),
            unit: record.string(72, 12),
        })
    }

    /// Decode this channel's samples into engineering units
    pub fn read_samples(&self, data: &[u8]) -> Result<Vec<f64>, LdError> {
        let width = self.sample_type.width();
        let len = (self.sample_count as usize).saturating_mul(width);
        let record = Record::at(data, self.data_ptr as usize, len, "channel data")?;

        Ok(record
            .bytes()
            .chunks_exact(width)
            .map(|raw| self.scaling.apply(self.sample_type.read(raw)))
            .collect())
    }

    /// Decode samples and build the in-memory channel
    pub fn into_channel(self, data: &[u8]) -> Result<Channel, LdError> {
        let samples = self.read_samples(data)?;
        Ok(Channel {
            name: self.name,
            short_name: self.short_name,
            unit: self.unit,
            frequency: self.frequency as f64,
            precision: self.sample_type.precision(),
            samples,
        })
    }
}

/// Walk the channel metadata list starting at `first` until a zero next pointer
pub fn read_channel_list(data: &[u8], first: u32) -> Result<Vec<ChannelMeta>, LdError> {
    let mut metas = Vec::new();
    let mut visited = HashSet::new();
    let mut ptr = first;

    while ptr != 0 {
        if !visited.insert(ptr) {
            return Err(LdError::ChannelLoop(ptr));
        }
        let meta = ChannelMeta::read(data, ptr as usize)?;
        ptr = meta.next_ptr;
        metas.push(meta);
    }

    Ok(metas)
}

//! File header and session metadata
//!
//! The header sits at offset 0 and points at the channel list and the
//! optional event record. The event in turn may point at a venue, and the
//! venue at a vehicle.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::reader::Record;
use super::LdError;

/// Size of the fixed header record in bytes
pub const HEADER_LEN: usize = 1762;

// Header field offsets
const MARKER: usize = 0;
const CHANNEL_META_PTR: usize = 8;
const CHANNEL_DATA_PTR: usize = 12;
const EVENT_PTR: usize = 36;
const DEVICE_SERIAL: usize = 70;
const DEVICE_TYPE: usize = 74;
const DEVICE_VERSION: usize = 82;
const CHANNEL_COUNT: usize = 86;
const DATE: usize = 94;
const TIME: usize = 126;
const DRIVER: usize = 158;
const VEHICLE_ID: usize = 222;
const VENUE: usize = 350;
const PRO_LOGGING: usize = 1502;
const SHORT_COMMENT: usize = 1572;

const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
const DATETIME_FORMAT_SHORT_YEAR: &str = "%d/%m/%y %H:%M:%S";

/// Decoded `.ld` file header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdHeader {
    /// File marker word
    pub marker: u32,
    /// Offset of the first channel metadata record
    pub channel_meta_ptr: u32,
    /// Offset of the first channel's sample data
    pub channel_data_ptr: u32,
    /// Offset of the event record (0 when absent)
    pub event_ptr: u32,
    /// Logger serial number
    pub device_serial: u32,
    /// Logger model, e.g. "ADL"
    pub device_type: String,
    /// Logger firmware version
    pub device_version: u16,
    /// Channel count as recorded by the logger
    pub channel_count: u32,
    /// Raw date text
    pub date: String,
    /// Raw time text
    pub time: String,
    /// Recording start, when the date and time fields parse
    pub datetime: Option<NaiveDateTime>,
    /// Driver name
    pub driver: String,
    /// Vehicle identifier
    pub vehicle_id: String,
    /// Venue (track) name
    pub venue: String,
    /// "Pro logging" flag word
    pub pro_logging: u32,
    /// Free-text short comment; `None` when blank
    pub short_comment: Option<String>,
    /// Event metadata
    pub event: Option<LdEvent>,
}

impl LdHeader {
    /// Read the header (and any event chain it points at) from the file image
    pub fn read(data: &[u8]) -> Result<Self, LdError> {
        let record = Record::at(data, 0, HEADER_LEN, "header")?;

        let date = record.string(DATE, 16);
        let time = record.string(TIME, 16);
        let datetime = parse_datetime(&date, &time);
        if datetime.is_none() {
            tracing::warn!("Unrecognised recording date/time: '{date} {time}'");
        }

        let short_comment = Some(record.string(SHORT_COMMENT, 64)).filter(|c| !c.is_empty());

        let event_ptr = record.u32(EVENT_PTR);
        let event = if event_ptr > 0 {
            Some(LdEvent::read(data, event_ptr as usize)?)
        } else {
            None
        };

        Ok(Self {
            marker: record.u32(MARKER),
            channel_meta_ptr: record.u32(CHANNEL_META_PTR),
            channel_data_ptr: record.u32(CHANNEL_DATA_PTR),
            event_ptr,
            device_serial: record.u32(DEVICE_SERIAL),
            device_type: record.string(DEVICE_TYPE, 8),
            device_version: record.u16(DEVICE_VERSION),
            channel_count: record.u32(CHANNEL_COUNT),
            date,
            time,
            datetime,
            driver: record.string(DRIVER, 64),
            vehicle_id: record.string(VEHICLE_ID, 64),
            venue: record.string(VENUE, 64),
            pro_logging: record.u32(PRO_LOGGING),
            short_comment,
            event,
        })
    }

    /// The short comment, if one was entered
    pub fn short_comment(&self) -> Option<&str> {
        self.short_comment.as_deref()
    }

    /// One-line description of the session for progress output
    pub fn summary(&self) -> String {
        let recorded = match self.datetime {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format!("{} {}", self.date, self.time).trim().to_string(),
        };
        format!(
            "{} #{} at '{}', driver '{}', vehicle '{}', recorded {}, comment '{}'",
            self.device_type,
            self.device_serial,
            self.venue,
            self.driver,
            self.vehicle_id,
            recorded,
            self.short_comment().unwrap_or_default()
        )
    }
}

fn parse_datetime(date: &str, time: &str) -> Option<NaiveDateTime> {
    // chrono's %Y happily takes "19" as year 19, so pick by digit count
    let year_digits = date.rsplit('/').next().map_or(0, str::len);
    let fmt = if year_digits == 2 {
        DATETIME_FORMAT_SHORT_YEAR
    } else {
        DATETIME_FORMAT
    };
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), fmt).ok()
}

/// Event (session) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdEvent {
    /// Event name
    pub name: String,
    /// Session within the event
    pub session: String,
    /// Long free-text comment
    pub comment: String,
    /// Venue record, when the event points at one
    pub venue: Option<LdVenue>,
}

impl LdEvent {
    const LEN: usize = 64 + 64 + 1024 + 2;

    fn read(data: &[u8], offset: usize) -> Result<Self, LdError> {
        let record = Record::at(data, offset, Self::LEN, "event")?;
        let venue_ptr = record.u16(1152);
        let venue = if venue_ptr > 0 {
            Some(LdVenue::read(data, venue_ptr as usize)?)
        } else {
            None
        };

        Ok(Self {
            name: record.string(0, 64),
            session: record.string(64, 64),
            comment: record.string(128, 1024),
            venue,
        })
    }
}

/// Venue record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdVenue {
    /// Venue name
    pub name: String,
    /// Vehicle record, when the venue points at one
    pub vehicle: Option<LdVehicle>,
}

impl LdVenue {
    const LEN: usize = 64 + 1034 + 2;

    fn read(data: &[u8], offset: usize) -> Result<Self, LdError> {
        let record = Record::at(data, offset, Self::LEN, "venue")?;
        let vehicle_ptr = record.u16(1098);
        let vehicle = if vehicle_ptr > 0 {
            Some(LdVehicle::read(data, vehicle_ptr as usize)?)
        } else {
            None
        };

        Ok(Self {
            name: record.string(0, 64),
            vehicle,
        })
    }
}

/// Vehicle record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdVehicle {
    /// Vehicle identifier
    pub id: String,
    /// Vehicle weight
    pub weight: u32,
    /// Vehicle class or type
    pub vehicle_type: String,
    /// Free-text comment
    pub comment: String,
}

impl LdVehicle {
    const LEN: usize = 64 + 128 + 4 + 32 + 32;

    fn read(data: &[u8], offset: usize) -> Result<Self, LdError> {
        let record = Record::at(data, offset, Self::LEN, "vehicle")?;
        Ok(Self {
            id: record.string(0, 64),
            weight: record.u32(192),
            vehicle_type: record.string(196, 32),
            comment: record.string(228, 32),
        })
    }
}

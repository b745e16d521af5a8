//! Builds synthetic `.ld` file images for tests.

#![allow(dead_code)]

use byteorder::{ByteOrder, LittleEndian};
use ldconvert_core::ld::{CHANNEL_META_LEN, HEADER_LEN};

const EVENT_LEN: usize = 64 + 64 + 1024 + 2;
const VENUE_LEN: usize = 64 + 1034 + 2;
const VEHICLE_LEN: usize = 64 + 128 + 4 + 32 + 32;

/// Send library log output through the test harness
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("ldconvert_core=debug")
        .try_init();
}

/// A channel to be written into a test file
pub struct TestChannel {
    pub name: String,
    pub short_name: String,
    pub unit: String,
    pub frequency: u16,
    pub class: u16,
    pub size: u16,
    pub shift: i16,
    pub mul: i16,
    pub scale: i16,
    pub dec_places: i16,
    pub count: u32,
    pub raw: Vec<u8>,
}

impl TestChannel {
    fn new(name: &str, frequency: u16, class: u16, size: u16, count: usize, raw: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            short_name: String::new(),
            unit: String::new(),
            frequency,
            class,
            size,
            shift: 0,
            mul: 1,
            scale: 1,
            dec_places: 0,
            count: count as u32,
            raw,
        }
    }

    pub fn i16(name: &str, frequency: u16, values: &[i16]) -> Self {
        let raw = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        Self::new(name, frequency, 0x03, 2, values.len(), raw)
    }

    pub fn i32(name: &str, frequency: u16, values: &[i32]) -> Self {
        let raw = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        Self::new(name, frequency, 0x05, 4, values.len(), raw)
    }

    pub fn f32(name: &str, frequency: u16, values: &[f32]) -> Self {
        let raw = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        Self::new(name, frequency, 0x07, 4, values.len(), raw)
    }

    pub fn f16(name: &str, frequency: u16, values: &[f32]) -> Self {
        let raw = values
            .iter()
            .flat_map(|v| half::f16::from_f32(*v).to_bits().to_le_bytes())
            .collect();
        Self::new(name, frequency, 0x07, 2, values.len(), raw)
    }

    pub fn scaled(mut self, shift: i16, mul: i16, scale: i16, dec_places: i16) -> Self {
        self.shift = shift;
        self.mul = mul;
        self.scale = scale;
        self.dec_places = dec_places;
        self
    }

    pub fn with_unit(mut self, short_name: &str, unit: &str) -> Self {
        self.short_name = short_name.to_string();
        self.unit = unit.to_string();
        self
    }

    pub fn with_type(mut self, class: u16, size: u16) -> Self {
        self.class = class;
        self.size = size;
        self
    }

    /// Declare more samples than are stored
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

/// Assembles a complete file image
#[derive(Default)]
pub struct LdBuilder {
    pub short_comment: String,
    pub date: String,
    pub time: String,
    pub driver: String,
    pub vehicle_id: String,
    pub venue: String,
    pub device_type: String,
    pub event: Option<(String, String, String)>,
    pub channels: Vec<TestChannel>,
}

fn put_str(buf: &mut [u8], offset: usize, len: usize, text: &str) {
    let bytes = text.as_bytes();
    let n = bytes.len().min(len);
    buf[offset..offset + n].copy_from_slice(&bytes[..n]);
}

impl LdBuilder {
    pub fn new() -> Self {
        Self {
            date: "23/07/2023".to_string(),
            time: "14:05:09".to_string(),
            device_type: "ADL".to_string(),
            ..Default::default()
        }
    }

    pub fn short_comment(mut self, comment: &str) -> Self {
        self.short_comment = comment.to_string();
        self
    }

    pub fn driver(mut self, driver: &str) -> Self {
        self.driver = driver.to_string();
        self
    }

    pub fn venue(mut self, venue: &str) -> Self {
        self.venue = venue.to_string();
        self
    }

    pub fn event(mut self, name: &str, session: &str, venue: &str) -> Self {
        self.event = Some((name.to_string(), session.to_string(), venue.to_string()));
        self
    }

    pub fn channel(mut self, channel: TestChannel) -> Self {
        self.channels.push(channel);
        self
    }

    /// Layout: header, event/venue/vehicle, channel metadata, sample data
    pub fn build(&self) -> Vec<u8> {
        let event_ptr = if self.event.is_some() { HEADER_LEN } else { 0 };
        let venue_ptr = event_ptr + EVENT_LEN;
        let vehicle_ptr = venue_ptr + VENUE_LEN;
        let meta_start = if self.event.is_some() {
            vehicle_ptr + VEHICLE_LEN
        } else {
            HEADER_LEN
        };
        let data_start = meta_start + self.channels.len() * CHANNEL_META_LEN;
        let data_len: usize = self.channels.iter().map(|c| c.raw.len()).sum();

        let mut buf = vec![0u8; data_start + data_len];

        // Header
        LittleEndian::write_u32(&mut buf[0..], 0x40);
        if !self.channels.is_empty() {
            LittleEndian::write_u32(&mut buf[8..], meta_start as u32);
            LittleEndian::write_u32(&mut buf[12..], data_start as u32);
        }
        LittleEndian::write_u32(&mut buf[36..], event_ptr as u32);
        LittleEndian::write_u32(&mut buf[70..], 12345);
        put_str(&mut buf, 74, 8, &self.device_type);
        LittleEndian::write_u16(&mut buf[82..], 420);
        LittleEndian::write_u32(&mut buf[86..], self.channels.len() as u32);
        put_str(&mut buf, 94, 16, &self.date);
        put_str(&mut buf, 126, 16, &self.time);
        put_str(&mut buf, 158, 64, &self.driver);
        put_str(&mut buf, 222, 64, "FS-23");
        put_str(&mut buf, 350, 64, &self.venue);
        put_str(&mut buf, 1572, 64, &self.short_comment);

        if let Some((name, session, venue)) = &self.event {
            put_str(&mut buf, event_ptr, 64, name);
            put_str(&mut buf, event_ptr + 64, 64, session);
            put_str(&mut buf, event_ptr + 128, 1024, "dry track");
            LittleEndian::write_u16(&mut buf[event_ptr + 1152..], venue_ptr as u16);

            put_str(&mut buf, venue_ptr, 64, venue);
            LittleEndian::write_u16(&mut buf[venue_ptr + 1098..], vehicle_ptr as u16);

            put_str(&mut buf, vehicle_ptr, 64, "FS-23");
            LittleEndian::write_u32(&mut buf[vehicle_ptr + 192..], 230);
            put_str(&mut buf, vehicle_ptr + 196, 32, "Formula");
            put_str(&mut buf, vehicle_ptr + 228, 32, "rain tyres");
        }

        // Channel metadata and data
        let mut data_ptr = data_start;
        for (i, channel) in self.channels.iter().enumerate() {
            let meta = meta_start + i * CHANNEL_META_LEN;
            let prev = if i == 0 { 0 } else { meta - CHANNEL_META_LEN };
            let next = if i + 1 == self.channels.len() {
                0
            } else {
                meta + CHANNEL_META_LEN
            };

            LittleEndian::write_u32(&mut buf[meta..], prev as u32);
            LittleEndian::write_u32(&mut buf[meta + 4..], next as u32);
            LittleEndian::write_u32(&mut buf[meta + 8..], data_ptr as u32);
            LittleEndian::write_u32(&mut buf[meta + 12..], channel.count);
            LittleEndian::write_u16(&mut buf[meta + 16..], i as u16);
            LittleEndian::write_u16(&mut buf[meta + 18..], channel.class);
            LittleEndian::write_u16(&mut buf[meta + 20..], channel.size);
            LittleEndian::write_u16(&mut buf[meta + 22..], channel.frequency);
            LittleEndian::write_i16(&mut buf[meta + 24..], channel.shift);
            LittleEndian::write_i16(&mut buf[meta + 26..], channel.mul);
            LittleEndian::write_i16(&mut buf[meta + 28..], channel.scale);
            LittleEndian::write_i16(&mut buf[meta + 30..], channel.dec_places);
            put_str(&mut buf, meta + 32, 32, &channel.name);
            put_str(&mut buf, meta + 64, 8, &channel.short_name);
            put_str(&mut buf, meta + 72, 12, &channel.unit);

            buf[data_ptr..data_ptr + channel.raw.len()].copy_from_slice(&channel.raw);
            data_ptr += channel.raw.len();
        }

        buf
    }
}

//! Synthetic FIT file builder for integration tests.
#![allow(dead_code)]

pub const RECORD: u16 = 20;
pub const FILE_ID: u16 = 0;
pub const DEVICE_INFO: u16 = 23;
pub const LAP: u16 = 19;

const SINT32: u8 = 0x85;
const UINT32: u8 = 0x86;
const UINT16: u8 = 0x84;
const UINT8: u8 = 0x02;
const SINT8: u8 = 0x01;
const FLOAT64: u8 = 0x89;

/// Bitwise CRC-16/ARC, as used by FIT.
pub fn crc16(bytes: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &b in bytes {
        crc ^= b as u16;
        for _ in 0..8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ 0xA001 } else { crc >> 1 };
        }
    }
    crc
}

/// Seconds since the FIT epoch for 2024-05-01T08:00:00Z
pub const T0: u32 = 1_714_550_400 - 631_065_600;

#[derive(Default)]
pub struct FitFile {
    body: Vec<u8>,
}

impl FitFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(mut self, local: u8, global: u16, fields: &[(u8, u8, u8)]) -> Self {
        let g = global.to_le_bytes();
        self.body
            .extend_from_slice(&[0x40 | local, 0, 0, g[0], g[1], fields.len() as u8]);
        for &(num, size, base) in fields {
            self.body.extend_from_slice(&[num, size, base]);
        }
        self
    }

    pub fn data(mut self, local: u8, payload: &[u8]) -> Self {
        self.body.push(local);
        self.body.extend_from_slice(payload);
        self
    }

    /// Data message with a compressed-timestamp header (local type 0..3).
    pub fn compressed(mut self, local: u8, offset: u8, payload: &[u8]) -> Self {
        self.body.push(0x80 | ((local & 0x03) << 5) | (offset & 0x1F));
        self.body.extend_from_slice(payload);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = vec![14u8, 0x20];
        out.extend_from_slice(&2132u16.to_le_bytes());
        out.extend_from_slice(&(self.body.len() as u32).to_le_bytes());
        out.extend_from_slice(b".FIT");
        let header_crc = crc16(&out);
        out.extend_from_slice(&header_crc.to_le_bytes());
        out.extend_from_slice(&self.body);
        let crc = crc16(&out);
        out.extend_from_slice(&crc.to_le_bytes());
        out
    }
}

impl FitFile {
    /// Define `local` as a record with exactly the sample's fields, then
    /// write the sample.
    pub fn sample(self, local: u8, sample: &Sample) -> Self {
        self.define(local, RECORD, &sample.fields())
            .data(local, &sample.encode())
    }
}

/// One `record` sample. Only the fields that are set are defined and
/// written; positions are either semicircles or float64 degrees.
#[derive(Debug, Clone, Default)]
pub struct Sample {
    pub timestamp: Option<u32>,
    pub lat: Option<i32>,
    pub lon: Option<i32>,
    pub float_position: Option<(f64, f64)>,
    pub altitude_m: Option<f64>,
    pub heart_rate: Option<u8>,
    pub cadence: Option<u8>,
    pub temperature: Option<i8>,
}

impl Sample {
    /// Semicircle-encoded position given in degrees.
    pub fn degrees(timestamp: u32, lat: f64, lon: f64) -> Self {
        let to_semi = |d: f64| (d * 2_147_483_648.0 / 180.0).round() as i32;
        Self {
            timestamp: Some(timestamp),
            lat: Some(to_semi(lat)),
            lon: Some(to_semi(lon)),
            ..Self::default()
        }
    }

    /// Position stored as raw float64 values, unscaled.
    pub fn float(timestamp: Option<u32>, lat: f64, lon: f64) -> Self {
        Self {
            timestamp,
            float_position: Some((lat, lon)),
            ..Self::default()
        }
    }

    pub fn fields(&self) -> Vec<(u8, u8, u8)> {
        let mut fields = Vec::new();
        if self.timestamp.is_some() {
            fields.push((253, 4, UINT32));
        }
        if self.float_position.is_some() {
            fields.extend([(0, 8, FLOAT64), (1, 8, FLOAT64)]);
        }
        if self.lat.is_some() {
            fields.push((0, 4, SINT32));
        }
        if self.lon.is_some() {
            fields.push((1, 4, SINT32));
        }
        if self.altitude_m.is_some() {
            fields.push((2, 2, UINT16));
        }
        if self.heart_rate.is_some() {
            fields.push((3, 1, UINT8));
        }
        if self.cadence.is_some() {
            fields.push((4, 1, UINT8));
        }
        if self.temperature.is_some() {
            fields.push((13, 1, SINT8));
        }
        fields
    }

    /// Payload in the order given by [`Sample::fields`].
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if let Some(ts) = self.timestamp {
            out.extend_from_slice(&ts.to_le_bytes());
        }
        if let Some((lat, lon)) = self.float_position {
            out.extend_from_slice(&lat.to_le_bytes());
            out.extend_from_slice(&lon.to_le_bytes());
        }
        if let Some(lat) = self.lat {
            out.extend_from_slice(&lat.to_le_bytes());
        }
        if let Some(lon) = self.lon {
            out.extend_from_slice(&lon.to_le_bytes());
        }
        if let Some(m) = self.altitude_m {
            out.extend_from_slice(&(((m + 500.0) * 5.0).round() as u16).to_le_bytes());
        }
        if let Some(hr) = self.heart_rate {
            out.push(hr);
        }
        if let Some(cad) = self.cadence {
            out.push(cad);
        }
        if let Some(t) = self.temperature {
            out.push(t as u8);
        }
        out
    }
}

/// A small ride: file_id, device_info, three records (one without a fix)
/// and a lap.
pub fn sample_ride() -> Vec<u8> {
    let mut first = Sample::degrees(T0, 46.5, 6.6);
    first.altitude_m = Some(372.4);
    first.heart_rate = Some(128);
    first.cadence = Some(80);
    first.temperature = Some(18);
    let no_fix = Sample {
        timestamp: Some(T0 + 1),
        heart_rate: Some(129),
        ..Sample::default()
    };
    let mut third = Sample::degrees(T0 + 2, 46.5001, 6.6002);
    third.altitude_m = Some(373.0);

    let mut device = T0.to_le_bytes().to_vec();
    device.extend_from_slice(&1u16.to_le_bytes());

    FitFile::new()
        .define(0, FILE_ID, &[(4, 4, UINT32)])
        .data(0, &T0.to_le_bytes())
        .define(1, DEVICE_INFO, &[(253, 4, UINT32), (2, 2, UINT16)])
        .data(1, &device)
        .sample(2, &first)
        .sample(3, &no_fix)
        .sample(2, &third)
        .define(4, LAP, &[(253, 4, UINT32)])
        .data(4, &(T0 + 3).to_le_bytes())
        .build()
}

use chrono::{DateTime, Utc};
use fitparser::FitDataRecord;

use super::reader::{value_as_f64, value_as_time};

/// One `record` message. Every member is independently optional; which
/// ones are present depends on the device and the sample.
///
/// Positions are kept exactly as stored in the file (usually semicircles).
/// Altitude is in metres with the profile scale and offset applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub position_lat: Option<f64>,
    pub position_long: Option<f64>,
    pub altitude: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub heart_rate: Option<u8>,
    pub cadence: Option<u8>,
    pub temperature: Option<f64>,
}

fn small(value: Option<f64>) -> Option<u8> {
    value
        .filter(|v| (0.0..=u8::MAX as f64).contains(v))
        .map(|v| v as u8)
}

impl RawRecord {
    pub fn from_fit(msg: &FitDataRecord) -> Self {
        let mut record = Self::default();
        let mut enhanced_altitude = None;

        for field in msg.fields() {
            let value = field.value();
            match field.name() {
                "position_lat" => record.position_lat = value_as_f64(value),
                "position_long" => record.position_long = value_as_f64(value),
                "altitude" => record.altitude = value_as_f64(value),
                "enhanced_altitude" => enhanced_altitude = value_as_f64(value),
                "timestamp" => record.timestamp = value_as_time(value),
                "heart_rate" => record.heart_rate = small(value_as_f64(value)),
                "cadence" => record.cadence = small(value_as_f64(value)),
                "temperature" => record.temperature = value_as_f64(value),
                _ => {}
            }
        }

        record.altitude = record.altitude.or(enhanced_altitude);
        record
    }
}

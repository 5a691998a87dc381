//! FIT `record` → GPX `trkpt`

use crate::fit::RawRecord;
use crate::track::{PointExtensions, TrackPoint};

/// Degrees per semicircle: 2^31 semicircles span 180 degrees.
pub const SEMICIRCLES_TO_DEGREES: f64 = 180.0 / 2_147_483_648.0;

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Values outside `±limit` cannot be degrees, so they are read as
/// semicircles. Values within range, boundary included, pass through.
pub fn normalize_coordinate(value: f64, limit: f64) -> f64 {
    if value.abs() > limit {
        value * SEMICIRCLES_TO_DEGREES
    } else {
        value
    }
}

pub fn normalize_latitude(value: f64) -> f64 {
    normalize_coordinate(value, MAX_LATITUDE)
}

pub fn normalize_longitude(value: f64) -> f64 {
    normalize_coordinate(value, MAX_LONGITUDE)
}

/// Map one record to a track point. Records without latitude, longitude
/// and time are dropped.
pub fn transform(record: &RawRecord) -> Option<TrackPoint> {
    let (Some(lat), Some(lon), Some(time)) =
        (record.position_lat, record.position_long, record.timestamp)
    else {
        return None;
    };

    Some(TrackPoint {
        latitude: normalize_latitude(lat),
        longitude: normalize_longitude(lon),
        elevation: record.altitude,
        time: Some(time),
        extensions: PointExtensions::from_parts(
            record.heart_rate,
            record.cadence,
            record.temperature,
        ),
    })
}

/// Whether either coordinate of the record needs semicircle conversion.
pub fn uses_semicircles(record: &RawRecord) -> bool {
    record.position_lat.is_some_and(|v| v.abs() > MAX_LATITUDE)
        || record.position_long.is_some_and(|v| v.abs() > MAX_LONGITUDE)
}

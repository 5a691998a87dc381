//! Output track model shared by the record mapping and the GPX writer.

use chrono::{DateTime, Utc};

/// Garmin TrackPointExtension sensor values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointExtensions {
    pub heart_rate: Option<u8>,
    pub cadence: Option<u8>,
    pub temperature: Option<f64>,
}

impl PointExtensions {
    /// `Some` only when at least one sensor value is present.
    pub fn from_parts(
        heart_rate: Option<u8>,
        cadence: Option<u8>,
        temperature: Option<f64>,
    ) -> Option<Self> {
        if heart_rate.is_none() && cadence.is_none() && temperature.is_none() {
            return None;
        }
        Some(Self {
            heart_rate,
            cadence,
            temperature,
        })
    }
}

/// One GPX `trkpt`, coordinates in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub time: Option<DateTime<Utc>>,
    pub extensions: Option<PointExtensions>,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
            time: None,
            extensions: None,
        }
    }
}

/// A single continuous recording segment, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub name: Option<String>,
    pub points: Vec<TrackPoint>,
}

impl Track {
    pub fn has_extensions(&self) -> bool {
        self.points.iter().any(|p| p.extensions.is_some())
    }
}

//! fit2gpx - Convert Garmin FIT activity files into GPX 1.1 tracks
//!
//! This library decodes the FIT binary message stream, keeps the `record`
//! samples that carry a position and a time, and writes them as a single
//! GPX track segment.
//!
//! # Features
//!
//! - **Decoder**: `fitparser` does the FIT framing and CRC checks; only
//!   `record` messages reach the track
//! - **Coordinates**: semicircle values are converted to degrees
//! - **Elevation**: `altitude`, falling back to `enhanced_altitude`
//! - **Sensors**: heart rate, cadence and temperature as Garmin
//!   TrackPointExtension (`gpxtpx`) elements
//! - **Output**: caller-owned stream, explicit path, path derived from the
//!   input, or returned text
//!
//! # Example
//!
//! ```rust,no_run
//! use fit2gpx::{convert, ConversionOutcome, ConvertOptions, Destination, InputSource};
//!
//! let bytes = std::fs::read("ride.fit")?;
//! let outcome = convert(
//!     &InputSource::Bytes(bytes),
//!     Destination::Text,
//!     &ConvertOptions::default(),
//! )?;
//! if let ConversionOutcome::Text { xml, points } = outcome {
//!     println!("{points} points, {} bytes of GPX", xml.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod convert;
pub mod fit;
pub mod fit_io;
pub mod gpx_writer;
pub mod mappings;
pub mod track;

// Re-export main types for convenience
pub use convert::{
    ConversionOutcome, ConvertError, ConvertOptions, Destination, InputSource, convert,
    derive_output_path,
};
pub use fit::{FitError, FitReader, RawRecord};
pub use fit_io::inspect_fit;
pub use mappings::record::{normalize_coordinate, transform};
pub use track::{PointExtensions, Track, TrackPoint};

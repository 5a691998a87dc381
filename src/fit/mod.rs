//! FIT activity decoding.
//!
//! Message framing, CRC checks, compressed timestamps and profile scaling
//! are handled by `fitparser`. This module reads the file header for
//! reporting and narrows the decoded messages to the `record` samples
//! that carry track data.

pub mod header;
pub mod reader;
pub mod record;


use std::io;
use thiserror::Error;

pub use header::FitHeader;
pub use reader::{FitReader, Records};
pub use record::RawRecord;

/// A FIT byte stream that could not be read or decoded. Any of these
/// aborts a conversion.
#[derive(Error, Debug)]
pub enum FitError {
    #[error("I/O error while reading FIT data: {0}")]
    Io(#[from] io::Error),

    #[error("malformed FIT header: {0}")]
    Header(&'static str),

    #[error("failed to decode FIT data: {0}")]
    Parse(#[from] fitparser::Error),
}

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::fit::{FitError, FitReader};
use crate::gpx_writer::{self, GpxError};
use crate::mappings::record::{transform, uses_semicircles};
use crate::track::Track;

/// Extension of derived output files
pub const GPX_EXTENSION: &str = "gpx";

/// Options for converting a FIT file to GPX
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Name written into the `<trk>` element
    pub track_name: Option<String>,
    /// Show a spinner while decoding
    pub show_progress: bool,
}

/// Where the FIT bytes come from
#[derive(Debug, Clone)]
pub enum InputSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl InputSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSource::Path(p) => Some(p),
            InputSource::Bytes(_) => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            InputSource::Path(p) => p.display().to_string(),
            InputSource::Bytes(b) => format!("<{} bytes in memory>", b.len()),
        }
    }
}

/// Where the GPX document goes. Chosen by the caller before converting.
pub enum Destination<'a> {
    /// Write into a caller-owned stream
    Sink(&'a mut dyn Write),
    /// Write to this path
    File(PathBuf),
    /// Write next to the input file with a `.gpx` extension
    Derived,
    /// Hand the document back
    Text,
}

impl Destination<'_> {
    /// The destination used when the caller gives none: derived from the
    /// input path if there is one, returned as text otherwise.
    pub fn unset_for(input: &InputSource) -> Self {
        match input {
            InputSource::Path(_) => Destination::Derived,
            InputSource::Bytes(_) => Destination::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    /// Document written to a file (`path`) or a sink (`None`)
    Written { path: Option<PathBuf>, points: usize },
    Text { xml: String, points: usize },
}

impl ConversionOutcome {
    pub fn points(&self) -> usize {
        match self {
            ConversionOutcome::Written { points, .. } | ConversionOutcome::Text { points, .. } => {
                *points
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("invalid FIT data: {0}")]
    Format(#[from] FitError),

    #[error("failed to encode GPX document: {0}")]
    Encode(#[from] GpxError),

    #[error("failed to write GPX to {target}: {source}")]
    Write { target: String, source: io::Error },

    #[error("cannot derive an output path: input was not read from a file")]
    NoDerivablePath,
}

/// Per-conversion counters, logged at debug level
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConversionStats {
    pub records: u64,
    pub skipped_incomplete: u64,
    pub with_extensions: u64,
    pub semicircle_points: u64,
}

/// Replace the input's extension with `.gpx`, keeping its directory.
pub fn derive_output_path(input: &Path) -> PathBuf {
    input.with_extension(GPX_EXTENSION)
}

/// Convert a FIT input to GPX and deliver it to `destination`.
///
/// The input is decoded completely before any output is opened, so a
/// malformed file never leaves a partial document behind.
///
/// # Example
///
/// ```rust,no_run
/// use fit2gpx::{convert, ConvertOptions, Destination, InputSource};
///
/// let input = InputSource::Path("ride.fit".into());
/// let outcome = convert(&input, Destination::unset_for(&input), &ConvertOptions::default())?;
/// println!("{} points", outcome.points());
/// # Ok::<(), fit2gpx::ConvertError>(())
/// ```
pub fn convert(
    input: &InputSource,
    destination: Destination<'_>,
    options: &ConvertOptions,
) -> Result<ConversionOutcome, ConvertError> {
    // resolve before decoding so a bad destination choice fails fast
    let target_path = match &destination {
        Destination::File(path) => Some(path.clone()),
        Destination::Derived => {
            let input_path = input.path().ok_or(ConvertError::NoDerivablePath)?;
            Some(derive_output_path(input_path))
        }
        Destination::Sink(_) | Destination::Text => None,
    };

    tracing::info!("Parsing: {}", input.describe());
    let (track, stats) = decode_track(input, options)?;
    tracing::debug!(
        records = stats.records,
        skipped_incomplete = stats.skipped_incomplete,
        with_extensions = stats.with_extensions,
        semicircle_points = stats.semicircle_points,
        "decoded track"
    );

    let xml = gpx_writer::encode(&track)?;
    let points = track.points.len();

    match destination {
        Destination::Text => Ok(ConversionOutcome::Text { xml, points }),
        Destination::Sink(sink) => {
            sink.write_all(xml.as_bytes())
                .and_then(|_| sink.flush())
                .map_err(|source| ConvertError::Write {
                    target: "output stream".to_string(),
                    source,
                })?;
            tracing::info!("Written {} points to output stream", points);
            Ok(ConversionOutcome::Written { path: None, points })
        }
        Destination::File(_) | Destination::Derived => {
            let path = target_path.ok_or(ConvertError::NoDerivablePath)?;
            tracing::info!("Writing {} points to {}", points, path.display());
            write_file_atomic(&path, xml.as_bytes())?;
            Ok(ConversionOutcome::Written {
                path: Some(path),
                points,
            })
        }
    }
}

/// Decode an input into a track without writing anything.
pub fn decode_track(
    input: &InputSource,
    options: &ConvertOptions,
) -> Result<(Track, ConversionStats), ConvertError> {
    match input {
        InputSource::Path(path) => {
            let file = File::open(path).map_err(|source| ConvertError::Open {
                path: path.clone(),
                source,
            })?;
            collect_track(BufReader::new(file), options)
        }
        InputSource::Bytes(bytes) => collect_track(bytes.as_slice(), options),
    }
}

fn collect_track<R: Read>(
    reader: R,
    options: &ConvertOptions,
) -> Result<(Track, ConversionStats), ConvertError> {
    let records = FitReader::from_reader(reader)?.records();

    let pb = if options.show_progress {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {pos} records") {
            pb.set_style(style);
        }
        Some(pb)
    } else {
        None
    };

    let mut stats = ConversionStats::default();
    let mut track = Track {
        name: options.track_name.clone(),
        points: Vec::new(),
    };
    for record in records {
        stats.records += 1;
        if let Some(pb) = &pb {
            pb.inc(1);
        }
        match transform(&record) {
            Some(point) => {
                if point.extensions.is_some() {
                    stats.with_extensions += 1;
                }
                if uses_semicircles(&record) {
                    stats.semicircle_points += 1;
                }
                track.points.push(point);
            }
            None => stats.skipped_incomplete += 1,
        }
    }

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }
    Ok((track, stats))
}

/// An existing target keeps its permissions; a new file gets `0644` on Unix
/// instead of the private mode temporary files are created with.
fn output_permissions(path: &Path) -> Option<fs::Permissions> {
    if let Ok(meta) = fs::metadata(path) {
        return Some(meta.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(fs::Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

/// Write through a temporary file in the target directory and rename it
/// into place once complete.
fn write_file_atomic(path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let write_err = |source: io::Error| ConvertError::Write {
        target: path.display().to_string(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    if let Some(perms) = output_permissions(path) {
        tmp.as_file().set_permissions(perms).map_err(write_err)?;
    }
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

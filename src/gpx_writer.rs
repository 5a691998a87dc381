//! GPX 1.1 document writer with Garmin TrackPointExtension support

use chrono::SecondsFormat;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;
use thiserror::Error;

use crate::track::{PointExtensions, Track, TrackPoint};

pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
pub const GPX_SCHEMA_LOCATION: &str =
    "http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const TRACKPOINT_EXTENSION_PREFIX: &str = "gpxtpx";
pub const TRACKPOINT_EXTENSION_NAMESPACE: &str =
    "http://www.garmin.com/xmlschemas/TrackPointExtension/v1";
pub const CREATOR: &str = "fit2gpx";

#[derive(Error, Debug)]
pub enum GpxError {
    #[error("failed to write GPX document: {0}")]
    Io(#[from] std::io::Error),

    #[error("GPX document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize a track to a GPX document.
pub fn encode(track: &Track) -> Result<String, GpxError> {
    let mut buf = Vec::new();
    write_gpx(track, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Write a track as a GPX document. The gpxtpx namespace is declared only
/// if some point carries extension data.
pub fn write_gpx<W: Write>(track: &Track, sink: W) -> Result<(), GpxError> {
    let with_extensions = track.has_extensions();
    let mut writer = Writer::new_with_indent(sink, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("gpx");
    root.push_attribute(("xmlns", GPX_NAMESPACE));
    root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
    root.push_attribute(("xsi:schemaLocation", GPX_SCHEMA_LOCATION));
    if with_extensions {
        root.push_attribute(("xmlns:gpxtpx", TRACKPOINT_EXTENSION_NAMESPACE));
    }
    root.push_attribute(("version", "1.1"));
    root.push_attribute(("creator", CREATOR));
    writer.write_event(Event::Start(root))?;

    writer.write_event(Event::Start(BytesStart::new("trk")))?;
    if let Some(name) = &track.name {
        write_text_element(&mut writer, "name", name)?;
    }
    if track.points.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("trkseg")))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new("trkseg")))?;
        for point in &track.points {
            write_point(&mut writer, point)?;
        }
        writer.write_event(Event::End(BytesEnd::new("trkseg")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("trk")))?;
    writer.write_event(Event::End(BytesEnd::new("gpx")))?;

    let mut sink = writer.into_inner();
    sink.write_all(b"\n")?;
    Ok(())
}

fn write_point<W: Write>(writer: &mut Writer<W>, point: &TrackPoint) -> Result<(), GpxError> {
    let lat = format_decimal(point.latitude);
    let lon = format_decimal(point.longitude);
    let mut start = BytesStart::new("trkpt");
    start.push_attribute(("lat", lat.as_str()));
    start.push_attribute(("lon", lon.as_str()));
    writer.write_event(Event::Start(start))?;

    if let Some(ele) = point.elevation {
        write_text_element(writer, "ele", &format_decimal(ele))?;
    }
    if let Some(time) = point.time {
        write_text_element(writer, "time", &time.to_rfc3339_opts(SecondsFormat::AutoSi, true))?;
    }
    if let Some(ext) = &point.extensions {
        write_extensions(writer, ext)?;
    }

    writer.write_event(Event::End(BytesEnd::new("trkpt")))?;
    Ok(())
}

fn write_extensions<W: Write>(
    writer: &mut Writer<W>,
    ext: &PointExtensions,
) -> Result<(), GpxError> {
    let block = format!("{TRACKPOINT_EXTENSION_PREFIX}:TrackPointExtension");
    writer.write_event(Event::Start(BytesStart::new("extensions")))?;
    writer.write_event(Event::Start(BytesStart::new(block.as_str())))?;
    if let Some(hr) = ext.heart_rate {
        write_text_element(writer, "gpxtpx:hr", &hr.to_string())?;
    }
    if let Some(cad) = ext.cadence {
        write_text_element(writer, "gpxtpx:cad", &cad.to_string())?;
    }
    if let Some(temp) = ext.temperature {
        write_text_element(writer, "gpxtpx:atemp", &format_decimal(temp))?;
    }
    writer.write_event(Event::End(BytesEnd::new(block.as_str())))?;
    writer.write_event(Event::End(BytesEnd::new("extensions")))?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), GpxError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Shortest round-trip decimal text, never in exponent form, always with a
/// fractional part.
pub fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

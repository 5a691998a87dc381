use chrono::{DateTime, Utc};
use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};
use std::io::Read;
use std::vec;

use super::FitError;
use super::header::FitHeader;
use super::record::RawRecord;

/// A decoded FIT file: the header plus every data message in file order.
///
/// Decoding happens up front, so a structurally broken file is rejected
/// before any message is handed out.
pub struct FitReader {
    header: FitHeader,
    messages: Vec<FitDataRecord>,
}

impl FitReader {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FitError> {
        let header = FitHeader::parse(bytes)?;
        let messages = fitparser::de::from_bytes(bytes)?;
        tracing::debug!(
            protocol = header.protocol_version,
            profile = header.profile_version,
            data_size = header.data_size,
            messages = messages.len(),
            "decoded FIT file"
        );
        Ok(Self { header, messages })
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, FitError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn header(&self) -> &FitHeader {
        &self.header
    }

    pub fn messages(&self) -> &[FitDataRecord] {
        &self.messages
    }

    /// Narrow the messages to `record` samples.
    pub fn records(self) -> Records {
        Records {
            inner: self.messages.into_iter(),
        }
    }
}

/// `record` messages of a decoded file, in file order.
pub struct Records {
    inner: vec::IntoIter<FitDataRecord>,
}

impl Iterator for Records {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        self.inner
            .by_ref()
            .find(is_record)
            .map(|msg| RawRecord::from_fit(&msg))
    }
}

pub fn is_record(msg: &FitDataRecord) -> bool {
    msg.kind() == MesgNum::Record
}

/// Profile name of a message kind, e.g. `record` or `file_id`.
pub fn message_name(msg: &FitDataRecord) -> String {
    msg.kind().to_string().trim().to_string()
}

/// The message's `timestamp` field in UTC.
pub fn message_timestamp(msg: &FitDataRecord) -> Option<DateTime<Utc>> {
    msg.fields()
        .iter()
        .filter(|f| f.name() == "timestamp")
        .find_map(|f| value_as_time(f.value()))
}

pub(crate) fn value_as_time(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Timestamp(ts) => Some(ts.with_timezone(&Utc)),
        _ => None,
    }
}

/// Numeric view of a field value; arrays use their first numeric element.
pub(crate) fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Float32(v) => Some(*v as f64),
        Value::Float64(v) => Some(*v),
        Value::SInt8(v) => Some(*v as f64),
        Value::UInt8(v) => Some(*v as f64),
        Value::UInt8z(v) => Some(*v as f64),
        Value::Byte(v) => Some(*v as f64),
        Value::SInt16(v) => Some(*v as f64),
        Value::UInt16(v) => Some(*v as f64),
        Value::UInt16z(v) => Some(*v as f64),
        Value::SInt32(v) => Some(*v as f64),
        Value::UInt32(v) => Some(*v as f64),
        Value::UInt32z(v) => Some(*v as f64),
        Value::SInt64(v) => Some(*v as f64),
        Value::UInt64(v) => Some(*v as f64),
        Value::UInt64z(v) => Some(*v as f64),
        Value::Array(values) => values.iter().find_map(value_as_f64),
        _ => None,
    }
}

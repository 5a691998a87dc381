use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::fit::reader::{is_record, message_name, message_timestamp};
use crate::fit::{FitHeader, FitReader, RawRecord};
use crate::mappings::record::transform;

#[derive(Debug, Clone, Serialize)]
pub struct MessageStat {
    pub name: String,
    pub count: u64,
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FitSummary {
    pub path: String,
    pub header: FitHeader,
    pub total_messages: u64,
    /// Records that would become track points
    pub track_points: u64,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub messages: Vec<MessageStat>,
}

pub fn inspect_fit(path: &str) -> Result<FitSummary> {
    // 1) read and decode the whole file
    let bytes = std::fs::read(path).with_context(|| format!("failed to open FIT file: {}", path))?;
    let reader =
        FitReader::from_bytes(&bytes).with_context(|| format!("failed to decode FIT file: {}", path))?;

    // 2) gather stats per message kind
    let mut stats: BTreeMap<String, MessageStat> = BTreeMap::new();
    let mut total: u64 = 0;
    let mut track_points: u64 = 0;
    let mut start: Option<DateTime<Utc>> = None;
    let mut end: Option<DateTime<Utc>> = None;

    for msg in reader.messages() {
        total += 1;
        if is_record(msg) && transform(&RawRecord::from_fit(msg)).is_some() {
            track_points += 1;
        }
        let name = message_name(msg);
        let entry = stats.entry(name.clone()).or_insert_with(|| MessageStat {
            name,
            count: 0,
            first: None,
            last: None,
        });
        entry.count += 1;
        if let Some(ts) = message_timestamp(msg) {
            entry.first = Some(entry.first.map_or(ts, |f| f.min(ts)));
            entry.last = Some(entry.last.map_or(ts, |l| l.max(ts)));
            start = Some(start.map_or(ts, |s| s.min(ts)));
            end = Some(end.map_or(ts, |e| e.max(ts)));
        }
    }

    Ok(FitSummary {
        path: path.to_string(),
        header: *reader.header(),
        total_messages: total,
        track_points,
        start,
        end,
        messages: stats.into_values().collect(),
    })
}

fn fmt_time(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".to_string())
}

pub fn print_summary(summary: &FitSummary) {
    let duration = match (summary.start, summary.end) {
        (Some(s), Some(e)) => (e - s).num_seconds(),
        _ => 0,
    };

    println!("FIT: {}", summary.path);
    println!(
        "Protocol: {}.{}, Profile: {}, Data size: {} bytes",
        summary.header.protocol_major(),
        summary.header.protocol_minor(),
        summary.header.profile_version,
        summary.header.data_size
    );
    println!(
        "Start: {}, End: {}, Duration (s): {}, Total messages: {}, Track points: {}\n",
        fmt_time(summary.start),
        fmt_time(summary.end),
        duration,
        summary.total_messages,
        summary.track_points
    );

    println!("{:<22} {:>8} {:>22} {:>22}", "Message", "Count", "First", "Last");
    println!("{}", "-".repeat(77));
    for st in &summary.messages {
        println!(
            "{:<22} {:>8} {:>22} {:>22}",
            st.name,
            st.count,
            fmt_time(st.first),
            fmt_time(st.last)
        );
    }
}

pub fn print_summary_json(summary: &FitSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

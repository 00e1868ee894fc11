use crate::error::invalid_input;
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use matchday_core::domain::RecordId;
use std::str::FromStr;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

pub fn parse_record_id(raw: &str) -> Result<RecordId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("record id cannot be empty"));
    }
    RecordId::from_str(trimmed)
        .map_err(|_| invalid_input(format!("invalid record id {trimmed:?}: expected row-<n>")))
}

pub fn flag_label(set: bool, label: &'static str) -> &'static str {
    if set {
        label
    } else {
        ""
    }
}

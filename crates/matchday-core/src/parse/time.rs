use crate::cell::CellValue;
use crate::parse::{Parsed, Unparseable};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

const CANONICAL_FORMAT: &str = "%H:%M";
const SECONDS_PER_DAY: f64 = 86_400.0;

static LEADING_CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?").expect("valid leading clock regex")
});
static MERIDIEM_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?::\d{2})?\s*(?i:[ap]\.?\s*m)\b").expect("valid meridiem suffix regex")
});
static MERIDIEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(\d{1,2})(?::(\d{2}))?(?::\d{2})?\s*([ap])\.?\s*m\.?$")
        .expect("valid meridiem time regex")
});
static HOUR_MARK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\s*[hH.]\s*(\d{2})(?:\s*(?i:hrs?|horas?))?$")
        .expect("valid hour mark regex")
});
static EMBEDDED_CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}:\d{2}").expect("valid embedded clock regex"));

pub fn format_time(time: NaiveTime) -> String {
    time.format(CANONICAL_FORMAT).to_string()
}

/// Reads back a canonical `HH:MM` time.
pub fn parse_canonical_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, CANONICAL_FORMAT).ok()
}

/// Resolves a match-time cell to 24-hour `HH:MM`.
///
/// Numbers are only accepted as a fraction of a day in `[0, 1)`. Text is tried
/// as a leading `H:MM[:SS]` clock, then as a 12-hour or `18h30` style time,
/// and finally any embedded `HH:MM` is returned as written.
pub fn parse_match_time(value: &CellValue) -> Result<Parsed, Unparseable> {
    match value {
        CellValue::Instant(instant) => Ok(Parsed::Canonical(format_time(instant.time()))),
        CellValue::Number(fraction) => fraction_of_day(*fraction)
            .map(Parsed::Canonical)
            .ok_or(Unparseable),
        CellValue::Text(text) => parse_time_text(text.trim()),
    }
}

fn fraction_of_day(value: f64) -> Option<String> {
    if !(0.0..1.0).contains(&value) {
        return None;
    }
    let total_seconds = (value * SECONDS_PER_DAY).round() as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    Some(format!("{hours:02}:{minutes:02}"))
}

fn parse_time_text(text: &str) -> Result<Parsed, Unparseable> {
    if text.is_empty() {
        return Err(Unparseable);
    }

    if let Some(caps) = LEADING_CLOCK.captures(text) {
        let rest = &text[caps.get(2).map_or(0, |m| m.end())..];
        if !MERIDIEM_SUFFIX.is_match(rest) {
            let hours = caps.get(1).map_or("", |m| m.as_str());
            let minutes = caps.get(2).map_or("", |m| m.as_str());
            return Ok(Parsed::Canonical(format!("{hours:0>2}:{minutes:0>2}")));
        }
    }

    if let Some(time) = parse_time_of_day(text) {
        return Ok(Parsed::Canonical(format_time(time)));
    }

    match EMBEDDED_CLOCK.find(text) {
        Some(found) => {
            debug!(value = text, "embedded clock time kept verbatim");
            Ok(Parsed::Verbatim(found.as_str().to_string()))
        }
        None => Err(Unparseable),
    }
}

/// Reads the text as a time of day on a fixed reference date.
fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    let reference = NaiveDate::from_ymd_opt(1970, 1, 1)?;

    if let Some(caps) = MERIDIEM.captures(text) {
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        let pm = caps.get(3)?.as_str().eq_ignore_ascii_case("p");
        let hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (hour, true) => hour + 12,
            (hour, false) => hour,
        };
        return reference
            .and_hms_opt(hour, minute, 0)
            .map(|dt| dt.time());
    }

    if let Some(caps) = HOUR_MARK.captures(text) {
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
        return reference.and_hms_opt(hour, minute, 0).map(|dt| dt.time());
    }

    None
}

use crate::cell::CellValue;
use crate::parse::serial::serial_to_datetime;
use crate::parse::{Parsed, Unparseable};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

const CANONICAL_FORMAT: &str = "%d/%m/%Y";
/// Numeric days at or below this are not treated as dates.
const MIN_DAY_SERIAL: f64 = 1.0;

static DAY_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})([/-])(\d{1,2})([/-])(\d{4})(?:$|[\sT])")
        .expect("valid day-first date regex")
});
static YEAR_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})([/-])(\d{1,2})([/-])(\d{1,2})(?:$|[\sT])")
        .expect("valid year-first date regex")
});
static SPANISH_LONG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\s+(?:de\s+)?(\p{L}+)\.?,?\s+(?:de\s+|del\s+)?(\d{4})$")
        .expect("valid long date regex")
});

const TEXT_FORMATS: [&str; 7] = [
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%A, %d %B %Y",
];

const SPANISH_MONTHS: [(&str, u32); 13] = [
    ("enero", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("septiembre", 9),
    ("setiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
];

pub fn format_day(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

/// Reads back a canonical `DD/MM/YYYY` day.
pub fn parse_canonical_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, CANONICAL_FORMAT).ok()
}

/// Resolves a match-day cell to `DD/MM/YYYY`.
///
/// Instants are formatted directly and numbers above one are read as
/// spreadsheet serials. Text is tried as day-first, then year-first, then as a handful of
/// written-out formats. A day-first value that names an impossible date is
/// returned verbatim.
pub fn parse_match_day(value: &CellValue) -> Result<Parsed, Unparseable> {
    match value {
        CellValue::Instant(instant) => Ok(Parsed::Canonical(format_day(instant.date()))),
        CellValue::Number(serial) if *serial > MIN_DAY_SERIAL => serial_to_datetime(*serial)
            .map(|dt| Parsed::Canonical(format_day(dt.date())))
            .ok_or(Unparseable),
        CellValue::Number(_) => Err(Unparseable),
        CellValue::Text(text) => parse_day_text(text.trim()),
    }
}

fn parse_day_text(text: &str) -> Result<Parsed, Unparseable> {
    if text.is_empty() {
        return Err(Unparseable);
    }

    if let Some(caps) = DAY_FIRST.captures(text) {
        if same_separator(&caps) {
            return match ymd_from(&caps, 5, 3, 1) {
                Some(date) => Ok(Parsed::Canonical(format_day(date))),
                None => {
                    debug!(value = text, "impossible day-first date kept verbatim");
                    Ok(Parsed::Verbatim(text.to_string()))
                }
            };
        }
    }

    if let Some(caps) = YEAR_FIRST.captures(text) {
        if same_separator(&caps) {
            if let Some(date) = ymd_from(&caps, 1, 3, 5) {
                return Ok(Parsed::Canonical(format_day(date)));
            }
        }
    }

    parse_written_day(text)
        .map(|date| Parsed::Canonical(format_day(date)))
        .ok_or(Unparseable)
}

fn same_separator(caps: &Captures<'_>) -> bool {
    caps.get(2).map(|m| m.as_str()) == caps.get(4).map(|m| m.as_str())
}

fn ymd_from(caps: &Captures<'_>, year: usize, month: usize, day: usize) -> Option<NaiveDate> {
    let field = |index: usize| caps.get(index)?.as_str().parse::<u32>().ok();
    let year = i32::try_from(field(year)?).ok()?;
    NaiveDate::from_ymd_opt(year, field(month)?, field(day)?)
}

fn parse_written_day(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%d.%m.%Y %H:%M") {
        return Some(dt.date());
    }
    for fmt in TEXT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }
    parse_spanish_day(text)
}

fn parse_spanish_day(text: &str) -> Option<NaiveDate> {
    let caps = SPANISH_LONG.captures(text)?;
    let day = caps.get(1)?.as_str().parse().ok()?;
    let name = caps.get(2)?.as_str().to_lowercase();
    let year = caps.get(3)?.as_str().parse().ok()?;
    let month = SPANISH_MONTHS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, number)| *number)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

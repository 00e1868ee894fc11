pub mod date;
pub mod serial;
pub mod time;

pub use date::{format_day, parse_canonical_day, parse_match_day};
pub use serial::{serial_to_datetime, SERIAL_EPOCH};
pub use time::{format_time, parse_canonical_time, parse_match_time};

use thiserror::Error;

/// Outcome of a successful date or time parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Re-emitted in the canonical `DD/MM/YYYY` or `HH:MM` form.
    Canonical(String),
    /// Looked plausible but failed strict parsing; kept as written so it can
    /// be reviewed by hand.
    Verbatim(String),
}

impl Parsed {
    pub fn as_str(&self) -> &str {
        match self {
            Parsed::Canonical(value) | Parsed::Verbatim(value) => value,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Parsed::Canonical(value) | Parsed::Verbatim(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value cannot be read as a date or time")]
pub struct Unparseable;

use crate::cell::{CellValue, RawRow};
use crate::domain::{extract_phone_digits, MatchRecord, MessageFlags, RecordId, NOT_AVAILABLE};
use crate::normalize::{
    normalize_row, NormalizedRow, KEY_FIELD_NAME, KEY_MATCH_DAY, KEY_MATCH_TIME, KEY_PHONE,
    KEY_TEAM_NAME,
};
use crate::parse::{parse_match_day, parse_match_time};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const MIN_STRICT_PHONE_DIGITS: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhonePolicy {
    /// Any phone with at least one digit.
    #[default]
    Lenient,
    /// At least [`MIN_STRICT_PHONE_DIGITS`] digits.
    Strict,
}

impl PhonePolicy {
    pub fn min_digits(self) -> usize {
        match self {
            PhonePolicy::Lenient => 1,
            PhonePolicy::Strict => MIN_STRICT_PHONE_DIGITS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("phone has no digits")]
    MissingPhone,
    #[error("team name is missing")]
    MissingTeamName,
    #[error("match day is missing or unparseable")]
    UnparseableDay,
    #[error("match time is missing or unparseable")]
    UnparseableTime,
    #[error("field name is missing")]
    MissingFieldName,
    #[error("phone has {digits} digits, at least {min} required")]
    PhoneTooShort { digits: usize, min: usize },
}

/// A data row that did not become a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSkip {
    pub index: usize,
    #[serde(flatten)]
    pub reason: SkipReason,
}

pub fn validate(row: &RawRow, index: usize) -> Result<MatchRecord, SkipReason> {
    validate_with(row, index, PhonePolicy::Lenient)
}

/// Turns one raw row into a record, or names the first check it failed.
///
/// Checks run in a fixed order: phone, team name, day, time, field name,
/// then phone length under [`PhonePolicy::Strict`].
pub fn validate_with(
    row: &RawRow,
    index: usize,
    policy: PhonePolicy,
) -> Result<MatchRecord, SkipReason> {
    let normalized = normalize_row(row);
    build_record(&normalized, index, policy).inspect_err(|reason| {
        debug!(row = index, %reason, "skipping row");
    })
}

fn build_record(
    row: &NormalizedRow,
    index: usize,
    policy: PhonePolicy,
) -> Result<MatchRecord, SkipReason> {
    let team_name = text_or_sentinel(row, KEY_TEAM_NAME);
    let field_name = text_or_sentinel(row, KEY_FIELD_NAME);
    let phone = row
        .get(KEY_PHONE)
        .map(|cell| extract_phone_digits(&cell.render()))
        .unwrap_or_default();

    if phone.is_empty() {
        return Err(SkipReason::MissingPhone);
    }
    if team_name == NOT_AVAILABLE {
        return Err(SkipReason::MissingTeamName);
    }
    let match_day = row
        .get(KEY_MATCH_DAY)
        .and_then(|cell| parse_match_day(cell).ok())
        .ok_or(SkipReason::UnparseableDay)?;
    let match_time = row
        .get(KEY_MATCH_TIME)
        .and_then(|cell| parse_match_time(cell).ok())
        .ok_or(SkipReason::UnparseableTime)?;
    if field_name == NOT_AVAILABLE {
        return Err(SkipReason::MissingFieldName);
    }
    let min = policy.min_digits();
    if phone.len() < min {
        return Err(SkipReason::PhoneTooShort {
            digits: phone.len(),
            min,
        });
    }

    Ok(MatchRecord {
        id: RecordId::from_row(index),
        team_name,
        phone,
        match_day: match_day.into_string(),
        match_time: match_time.into_string(),
        field_name,
        confirmed: false,
        messages: MessageFlags::default(),
    })
}

fn text_or_sentinel(row: &NormalizedRow, key: &str) -> String {
    row.get(key)
        .map(CellValue::render)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

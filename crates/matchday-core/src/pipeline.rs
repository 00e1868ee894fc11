use crate::cell::RawRow;
use crate::domain::{MatchRecord, ScheduledMatch};
use crate::dto::{OutcomeStatus, EMPTY_MESSAGE, NO_VALID_ROWS_MESSAGE};
use crate::parse::{parse_canonical_day, parse_canonical_time};
use crate::rules::{group, validate_with, PhonePolicy, RowSkip};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Plain string order on `DD/MM/YYYY` then `HH:MM`. Groups by day of the
    /// month first, so it is not calendar order across months.
    #[default]
    Lexical,
    /// Calendar order. Values kept verbatim sort after every parsed value.
    Chronological,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub phone_policy: PhonePolicy,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestReport {
    pub records: Vec<MatchRecord>,
    pub matches: Vec<ScheduledMatch>,
    pub skipped: Vec<RowSkip>,
}

/// Result of one ingestion pass. "No data" and "nothing valid" are kept apart
/// because callers report them differently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestOutcome {
    Empty,
    NoValidRows { skipped: Vec<RowSkip> },
    Success(IngestReport),
}

impl IngestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, IngestOutcome::Success(_))
    }

    pub fn status(&self) -> OutcomeStatus {
        match self {
            IngestOutcome::Empty => OutcomeStatus::Empty,
            IngestOutcome::NoValidRows { .. } => OutcomeStatus::NoValidRows,
            IngestOutcome::Success(_) => OutcomeStatus::Success,
        }
    }

    /// One-line summary shown to the user after a pass.
    pub fn message(&self) -> String {
        match self {
            IngestOutcome::Empty => EMPTY_MESSAGE.to_string(),
            IngestOutcome::NoValidRows { .. } => NO_VALID_ROWS_MESSAGE.to_string(),
            IngestOutcome::Success(report) => format!(
                "{} registros, {} partidos, {} filas omitidas",
                report.records.len(),
                report.matches.len(),
                report.skipped.len()
            ),
        }
    }

    pub fn records(&self) -> &[MatchRecord] {
        match self {
            IngestOutcome::Success(report) => &report.records,
            _ => &[],
        }
    }

    pub fn matches(&self) -> &[ScheduledMatch] {
        match self {
            IngestOutcome::Success(report) => &report.matches,
            _ => &[],
        }
    }

    pub fn skipped(&self) -> &[RowSkip] {
        match self {
            IngestOutcome::Empty => &[],
            IngestOutcome::NoValidRows { skipped } => skipped,
            IngestOutcome::Success(report) => &report.skipped,
        }
    }
}

pub fn run(rows: &[RawRow]) -> IngestOutcome {
    run_with(rows, PipelineOptions::default())
}

/// Validates every row in input order, sorts the survivors and pairs them.
pub fn run_with(rows: &[RawRow], options: PipelineOptions) -> IngestOutcome {
    if rows.is_empty() {
        return IngestOutcome::Empty;
    }

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        match validate_with(row, index, options.phone_policy) {
            Ok(record) => records.push(record),
            Err(reason) => skipped.push(RowSkip { index, reason }),
        }
    }

    info!(
        rows = rows.len(),
        valid = records.len(),
        skipped = skipped.len(),
        "rows validated"
    );

    if records.is_empty() {
        return IngestOutcome::NoValidRows { skipped };
    }

    sort_records(&mut records, options.sort);
    let matches = group(&records);
    IngestOutcome::Success(IngestReport {
        records,
        matches,
        skipped,
    })
}

/// Stable sort by day, then time.
pub fn sort_records(records: &mut [MatchRecord], order: SortOrder) {
    match order {
        SortOrder::Lexical => records.sort_by(|a, b| {
            a.match_day
                .cmp(&b.match_day)
                .then_with(|| a.match_time.cmp(&b.match_time))
        }),
        SortOrder::Chronological => records.sort_by(|a, b| {
            chronological(&a.match_day, &b.match_day, parse_canonical_day)
                .then_with(|| chronological(&a.match_time, &b.match_time, parse_canonical_time))
        }),
    }
}

fn chronological<T: Ord>(a: &str, b: &str, parse: fn(&str) -> Option<T>) -> Ordering {
    match (parse(a), parse(b)) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

use crate::domain::{ImportRun, MatchRecord, RecordId, ScheduledMatch, SlotIssue};
use crate::messaging::MessageLink;
use crate::pipeline::IngestOutcome;
use crate::rules::RowSkip;
use serde::{Deserialize, Serialize};

pub const EMPTY_MESSAGE: &str = "El archivo está vacío o no contiene datos reconocibles.";
pub const NO_VALID_ROWS_MESSAGE: &str =
    "No se encontraron filas con datos válidos completos (Equipo, Celular, Día, Hora, Cancha).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Empty,
    NoValidRows,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordListItemDto {
    pub id: RecordId,
    pub team_name: String,
    pub phone: String,
    pub match_day: String,
    pub match_time: String,
    pub field_name: String,
    pub confirmed: bool,
    pub confirmation_sent: bool,
    pub reminder_sent: bool,
}

impl From<&MatchRecord> for RecordListItemDto {
    fn from(record: &MatchRecord) -> Self {
        Self {
            id: record.id.clone(),
            team_name: record.team_name.clone(),
            phone: record.phone.clone(),
            match_day: record.match_day.clone(),
            match_time: record.match_time.clone(),
            field_name: record.field_name.clone(),
            confirmed: record.confirmed,
            confirmation_sent: record.messages.confirmation_sent,
            reminder_sent: record.messages.reminder_sent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDto {
    pub matches: Vec<ScheduledMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<SlotIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLinksDto {
    pub id: RecordId,
    pub team_name: String,
    pub links: Vec<MessageLink>,
}

/// What `import` reports back, persisted or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummaryDto {
    pub status: OutcomeStatus,
    pub message: String,
    pub rows: usize,
    pub records: usize,
    pub matches: Vec<ScheduledMatch>,
    pub skipped: Vec<RowSkip>,
    pub import: Option<ImportRun>,
}

impl ImportSummaryDto {
    pub fn from_outcome(outcome: &IngestOutcome, rows: usize, import: Option<ImportRun>) -> Self {
        Self {
            status: outcome.status(),
            message: outcome.message(),
            rows,
            records: outcome.records().len(),
            matches: outcome.matches().to_vec(),
            skipped: outcome.skipped().to_vec(),
            import,
        }
    }
}

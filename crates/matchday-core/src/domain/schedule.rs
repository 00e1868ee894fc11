use crate::domain::ids::RecordId;
use crate::domain::record::MatchRecord;
use serde::{Deserialize, Serialize};

/// Day, time and field shared by the records of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub match_day: String,
    pub match_time: String,
    pub field_name: String,
}

impl SlotKey {
    pub fn of(record: &MatchRecord) -> Self {
        Self {
            match_day: record.match_day.clone(),
            match_time: record.match_time.clone(),
            field_name: record.field_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub record_id: RecordId,
    pub name: String,
    pub confirmed: bool,
}

impl TeamRef {
    pub fn snapshot(record: &MatchRecord) -> Self {
        Self {
            record_id: record.id.clone(),
            name: record.team_name.clone(),
            confirmed: record.confirmed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    pub match_day: String,
    pub match_time: String,
    pub field_name: String,
    pub team_a: TeamRef,
    pub team_b: TeamRef,
}

impl ScheduledMatch {
    pub fn both_confirmed(&self) -> bool {
        self.team_a.confirmed && self.team_b.confirmed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotIssueKind {
    Unmatched,
    Overbooked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotIssue {
    #[serde(flatten)]
    pub slot: SlotKey,
    pub kind: SlotIssueKind,
    pub teams: Vec<String>,
}

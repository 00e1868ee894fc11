use crate::domain::ids::RecordId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sentinel carried by a text field the source left blank.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Confirmation,
    Reminder,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Confirmation => "confirmation",
            MessageKind::Reminder => "reminder",
        }
    }
}

impl FromStr for MessageKind {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "confirmation" | "confirm" => Ok(MessageKind::Confirmation),
            "reminder" | "remind" => Ok(MessageKind::Reminder),
            _ => Err(CoreError::InvalidMessageKind(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFlags {
    pub confirmation_sent: bool,
    pub reminder_sent: bool,
}

impl MessageFlags {
    pub fn is_sent(&self, kind: MessageKind) -> bool {
        match kind {
            MessageKind::Confirmation => self.confirmation_sent,
            MessageKind::Reminder => self.reminder_sent,
        }
    }

    pub fn mark_sent(&mut self, kind: MessageKind) {
        match kind {
            MessageKind::Confirmation => self.confirmation_sent = true,
            MessageKind::Reminder => self.reminder_sent = true,
        }
    }
}

/// A validated team booking. Only the record validator creates these from
/// raw rows; the store rebuilds them from persisted columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: RecordId,
    pub team_name: String,
    pub phone: String,
    pub match_day: String,
    pub match_time: String,
    pub field_name: String,
    pub confirmed: bool,
    pub messages: MessageFlags,
}

impl MatchRecord {
    pub fn toggle_confirmed(&mut self) -> bool {
        self.confirmed = !self.confirmed;
        self.confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageFlags, MessageKind};
    use std::str::FromStr;

    #[test]
    fn message_kind_parses_aliases() {
        assert_eq!(
            MessageKind::from_str("Confirm").unwrap(),
            MessageKind::Confirmation
        );
        assert_eq!(
            MessageKind::from_str("reminder").unwrap(),
            MessageKind::Reminder
        );
        assert!(MessageKind::from_str("sms").is_err());
    }

    #[test]
    fn mark_sent_sets_only_the_requested_flag() {
        let mut flags = MessageFlags::default();
        flags.mark_sent(MessageKind::Reminder);
        assert!(flags.is_sent(MessageKind::Reminder));
        assert!(!flags.is_sent(MessageKind::Confirmation));
    }
}

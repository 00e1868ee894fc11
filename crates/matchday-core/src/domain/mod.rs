pub mod ids;
pub mod import;
pub mod phone;
pub mod record;
pub mod schedule;

pub use ids::{ImportId, RecordId};
pub use import::ImportRun;
pub use phone::{extract_phone_digits, with_country_prefix};
pub use record::{MatchRecord, MessageFlags, MessageKind, NOT_AVAILABLE};
pub use schedule::{ScheduledMatch, SlotIssue, SlotIssueKind, SlotKey, TeamRef};

pub mod cell;
pub mod domain;
pub mod dto;
pub mod error;
pub mod messaging;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod rules;

pub use cell::{CellValue, RawRow};
pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use messaging::{
    message_link, message_links, render_message, whatsapp_link, LinkOptions, MessageLink,
    MessageTemplates,
};
pub use normalize::{normalize_row, NormalizedRow};
pub use parse::{parse_match_day, parse_match_time, Parsed, Unparseable};
pub use pipeline::{run, run_with, IngestOutcome, IngestReport, PipelineOptions, SortOrder};
pub use rules::*;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("row {index} is not a mapping of column labels to cells: {found}")]
    MalformedRow { index: usize, found: String },
    #[error("invalid record id: {0}")]
    InvalidRecordId(String),
    #[error("invalid message kind: {0}")]
    InvalidMessageKind(String),
    #[error("invalid message link: {0}")]
    InvalidLink(String),
}

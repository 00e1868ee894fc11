use crate::domain::ids::ImportId;
use serde::{Deserialize, Serialize};

/// One persisted ingestion pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRun {
    pub id: ImportId,
    /// Provider that produced the rows, e.g. `file` or `drive`.
    pub source: String,
    /// Path, URL or file id the rows came from.
    pub label: String,
    pub row_count: usize,
    pub record_count: usize,
    pub created_at: i64,
}

impl ImportRun {
    pub fn new(
        source: impl Into<String>,
        label: impl Into<String>,
        row_count: usize,
        record_count: usize,
        created_at: i64,
    ) -> Self {
        Self {
            id: ImportId::new(),
            source: source.into(),
            label: label.into(),
            row_count,
            record_count,
            created_at,
        }
    }
}

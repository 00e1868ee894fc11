use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const ROW_PREFIX: &str = "row-";

/// Identifier of a record within one ingestion pass, derived from the
/// zero-based position of its data row in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn from_row(index: usize) -> Self {
        Self(format!("{ROW_PREFIX}{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix(ROW_PREFIX)
            .ok_or_else(|| CoreError::InvalidRecordId(raw.to_string()))?;
        if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(CoreError::InvalidRecordId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Identifier of one persisted ingestion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportId(pub Uuid);

impl Default for ImportId {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ImportId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::RecordId;
    use std::str::FromStr;

    #[test]
    fn record_id_roundtrips_row_index() {
        let id = RecordId::from_row(7);
        assert_eq!(id.as_str(), "row-7");
        assert_eq!(RecordId::from_str(" row-7 ").unwrap(), id);
    }

    #[test]
    fn record_id_rejects_foreign_shapes() {
        assert!(RecordId::from_str("7").is_err());
        assert!(RecordId::from_str("row-").is_err());
        assert!(RecordId::from_str("row-7a").is_err());
    }
}

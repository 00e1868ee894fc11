use crate::{IngestError, Result};
use matchday_core::{CellValue, CoreError, RawRow};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub fn read_path(path: &Path) -> Result<Vec<RawRow>> {
    let contents = fs::read_to_string(path)?;
    rows_from_str(&contents)
}

/// Parses a JSON array of row objects. A non-object element fails the whole
/// read with its position.
pub fn rows_from_str(contents: &str) -> Result<Vec<RawRow>> {
    let value: Value = serde_json::from_str(contents)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(IngestError::Parse(format!(
                "expected an array of row objects, found {}",
                kind_of(&other)
            )))
        }
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let fields = match item {
            Value::Object(fields) => fields,
            other => {
                return Err(CoreError::MalformedRow {
                    index,
                    found: kind_of(&other).to_string(),
                }
                .into())
            }
        };
        let row: RawRow = fields
            .into_iter()
            .filter_map(|(label, value)| cell_value(value).map(|cell| (label, cell)))
            .collect();
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn cell_value(value: Value) -> Option<CellValue> {
    match value {
        Value::Null => None,
        Value::Number(number) => number.as_f64().map(CellValue::Number),
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(CellValue::Text(text)),
        Value::Bool(flag) => Some(CellValue::text(flag.to_string())),
        other => Some(CellValue::text(other.to_string())),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::rows_from_str;
    use crate::IngestError;
    use matchday_core::{CellValue, CoreError};

    #[test]
    fn objects_become_rows() {
        let rows = rows_from_str(
            r#"[
                {"Nombre Equipo": "Lions", "Celular": 3001234567, "Hora Partido": 0.75, "Notas": null},
                {"Nombre Equipo": "", "Celular": null},
                {"Nombre Equipo": "Tigers"}
            ]"#,
        )
        .expect("parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Celular"), Some(&CellValue::Number(3001234567.0)));
        assert_eq!(rows[0].get("Hora Partido"), Some(&CellValue::Number(0.75)));
        assert!(rows[0].get("Notas").is_none());
        assert_eq!(rows[1].get("Nombre Equipo"), Some(&CellValue::text("Tigers")));
    }

    #[test]
    fn non_object_element_is_malformed() {
        let err = rows_from_str(r#"[{"Nombre Equipo": "Lions"}, ["Tigers"]]"#).unwrap_err();
        match err {
            IngestError::Core(CoreError::MalformedRow { index, found }) => {
                assert_eq!(index, 1);
                assert_eq!(found, "array");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn top_level_must_be_an_array() {
        let err = rows_from_str(r#"{"Nombre Equipo": "Lions"}"#).unwrap_err();
        assert!(matches!(err, IngestError::Parse(_)));
        let err = rows_from_str("not json").unwrap_err();
        assert!(matches!(err, IngestError::Json(_)));
    }
}

use crate::cell::{CellValue, RawRow};
use std::collections::HashMap;

pub const KEY_TEAM_NAME: &str = "nombreequipo";
pub const KEY_PHONE: &str = "celular";
pub const KEY_MATCH_TIME: &str = "horapartido";
pub const KEY_MATCH_DAY: &str = "diapartido";
pub const KEY_FIELD_NAME: &str = "nombrecancha";

/// A raw row re-keyed by canonical column names. Keys that are not part of
/// the recognized set are kept but nothing reads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
    cells: HashMap<String, CellValue>,
}

impl NormalizedRow {
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

}

/// Lowercases a header and removes all whitespace from it, so
/// `" Nombre  Equipo "` becomes `"nombreequipo"`.
pub fn normalize_key(label: &str) -> String {
    label
        .trim()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Re-keys every cell of `row`. When two labels collapse to the same key the
/// later column wins.
pub fn normalize_row(row: &RawRow) -> NormalizedRow {
    let mut cells = HashMap::with_capacity(row.len());
    for (label, value) in row.iter() {
        cells.insert(normalize_key(label), value.clone());
    }
    NormalizedRow { cells }
}

#[cfg(test)]
mod tests {
    use super::{normalize_key, normalize_row, NormalizedRow, KEY_FIELD_NAME, KEY_TEAM_NAME};
    use crate::cell::{CellValue, RawRow};

    #[test]
    fn normalize_key_strips_case_and_whitespace() {
        assert_eq!(normalize_key(" Nombre  Equipo "), "nombreequipo");
        assert_eq!(normalize_key("NOMBRE\tCANCHA"), "nombrecancha");
        assert_eq!(normalize_key("Día Partido"), "díapartido");
    }

    #[test]
    fn normalize_row_keeps_values_and_unknown_keys() {
        let row = RawRow::new()
            .with("Nombre Equipo", "Lions")
            .with("Nombre Cancha", "Cancha 1")
            .with("Observaciones", "trae balón");
        let normalized = normalize_row(&row);
        assert_eq!(
            normalized.get(KEY_TEAM_NAME),
            Some(&CellValue::text("Lions"))
        );
        assert_eq!(
            normalized.get(KEY_FIELD_NAME),
            Some(&CellValue::text("Cancha 1"))
        );
        assert_eq!(
            normalized.get("observaciones"),
            Some(&CellValue::text("trae balón"))
        );
    }

    #[test]
    fn later_column_wins_on_key_collision() {
        let row = RawRow::new()
            .with("nombre equipo", "First")
            .with("NombreEquipo", "Second");
        let normalized = normalize_row(&row);
        assert_eq!(
            normalized.get(KEY_TEAM_NAME),
            Some(&CellValue::text("Second"))
        );
    }

    #[test]
    fn empty_row_normalizes_to_empty() {
        assert_eq!(normalize_row(&RawRow::new()), NormalizedRow::default());
    }
}

use matchday_core::{CellValue, RawRow};

/// Pairs each data row with the header labels. Blank headers become
/// `column<N>` (1-based), absent cells are left out and rows with no cells
/// are dropped.
pub(crate) fn rows_from_table<I>(headers: &[String], rows: I) -> Vec<RawRow>
where
    I: IntoIterator<Item = Vec<Option<CellValue>>>,
{
    let labels: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| column_label(header, index))
        .collect();

    rows.into_iter()
        .filter_map(|cells| {
            let mut row = RawRow::new();
            for (index, cell) in cells.into_iter().enumerate() {
                let Some(value) = cell else { continue };
                match labels.get(index) {
                    Some(label) => row.insert(label.as_str(), value),
                    None => row.insert(column_label("", index), value),
                }
            }
            (!row.is_empty()).then_some(row)
        })
        .collect()
}

/// Text cell, or nothing for blank text.
pub(crate) fn text_cell(raw: &str) -> Option<CellValue> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(CellValue::text(raw))
    }
}

fn column_label(header: &str, index: usize) -> String {
    let trimmed = header.trim_start_matches('\u{feff}');
    if trimmed.trim().is_empty() {
        format!("column{}", index + 1)
    } else {
        trimmed.to_string()
    }
}

use crate::table::{rows_from_table, text_cell};
use crate::{IngestError, Result};
use calamine::{open_workbook_auto, DataType, Reader, Xlsx};
use matchday_core::parse::serial_to_datetime;
use matchday_core::{CellValue, RawRow};
use std::fmt::Display;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, warn};

/// Reads the first worksheet of any workbook calamine understands.
pub fn read_path(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|err| IngestError::Spreadsheet(format!("unable to open workbook: {err}")))?;
    first_sheet_rows(&mut workbook)
}

/// Reads the first worksheet of an xlsx document held in memory.
pub fn rows_from_xlsx_bytes(bytes: Vec<u8>) -> Result<Vec<RawRow>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|err| IngestError::Spreadsheet(format!("unable to open workbook: {err}")))?;
    first_sheet_rows(&mut workbook)
}

fn first_sheet_rows<RS, R>(workbook: &mut R) -> Result<Vec<RawRow>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: Display,
{
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::Spreadsheet("workbook has no worksheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| IngestError::Spreadsheet(format!("worksheet {sheet_name} is missing")))?
        .map_err(|err| IngestError::Spreadsheet(format!("unable to read {sheet_name}: {err}")))?;
    debug!(sheet = %sheet_name, rows = range.height(), "reading worksheet");

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(header_label).collect();
    Ok(rows_from_table(
        &headers,
        rows.map(|row| row.iter().map(cell_value).collect()),
    ))
}

fn header_label(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Date-typed cells become instants, numbers stay numbers and empty or
/// error cells are dropped. OpenDocument dates and times arrive as ISO
/// text; a bare time is pinned to the serial epoch like an xlsx time cell.
fn cell_value(cell: &DataType) -> Option<CellValue> {
    match cell {
        DataType::Empty => None,
        DataType::String(text) => text_cell(text),
        DataType::Float(value) => Some(CellValue::Number(*value)),
        DataType::Int(value) => Some(CellValue::Number(*value as f64)),
        DataType::DateTime(serial) => Some(
            serial_to_datetime(*serial)
                .map(CellValue::Instant)
                .unwrap_or(CellValue::Number(*serial)),
        ),
        DataType::Duration(days) => Some(CellValue::Number(*days)),
        DataType::DateTimeIso(text) => cell
            .as_datetime()
            .or_else(|| cell.as_date().and_then(|day| day.and_hms_opt(0, 0, 0)))
            .map(CellValue::Instant)
            .or_else(|| text_cell(text)),
        DataType::DurationIso(text) => cell
            .as_time()
            .zip(serial_to_datetime(0.0))
            .map(|(time, epoch)| CellValue::Instant(epoch.date().and_time(time)))
            .or_else(|| text_cell(text)),
        DataType::Error(err) => {
            warn!(error = ?err, "ignoring spreadsheet error cell");
            None
        }
        other => text_cell(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{cell_value, header_label, read_path};
    use calamine::DataType;
    use chrono::NaiveDate;
    use matchday_core::{parse_match_day, parse_match_time, CellValue, Parsed};
    use tempfile::TempDir;

    #[test]
    fn date_cells_become_instants() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        assert_eq!(
            cell_value(&DataType::DateTime(45458.75)),
            Some(CellValue::Instant(expected))
        );
    }

    #[test]
    fn opendocument_dates_become_instants() {
        let day = cell_value(&DataType::DateTimeIso("2024-06-15".to_string())).expect("cell");
        assert_eq!(
            day,
            CellValue::Instant(
                NaiveDate::from_ymd_opt(2024, 6, 15)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            )
        );
        assert_eq!(
            parse_match_day(&day),
            Ok(Parsed::Canonical("15/06/2024".to_string()))
        );

        let stamped = cell_value(&DataType::DateTimeIso("2024-06-15T18:30:00".to_string()));
        assert_eq!(
            stamped,
            Some(CellValue::Instant(
                NaiveDate::from_ymd_opt(2024, 6, 15)
                    .unwrap()
                    .and_hms_opt(18, 30, 0)
                    .unwrap()
            ))
        );
    }

    #[test]
    fn opendocument_times_become_times_of_day() {
        let time = cell_value(&DataType::DurationIso("PT18H00M00S".to_string())).expect("cell");
        assert_eq!(
            time,
            CellValue::Instant(
                NaiveDate::from_ymd_opt(1899, 12, 30)
                    .unwrap()
                    .and_hms_opt(18, 0, 0)
                    .unwrap()
            )
        );
        assert_eq!(
            parse_match_time(&time),
            Ok(Parsed::Canonical("18:00".to_string()))
        );
    }

    #[test]
    fn unreadable_iso_values_stay_text() {
        assert_eq!(
            cell_value(&DataType::DateTimeIso("mañana".to_string())),
            Some(CellValue::text("mañana"))
        );
        assert_eq!(
            cell_value(&DataType::DurationIso("PT30H00M00S".to_string())),
            Some(CellValue::text("PT30H00M00S"))
        );
    }

    #[test]
    fn durations_stay_numbers() {
        assert_eq!(
            cell_value(&DataType::Duration(0.75)),
            Some(CellValue::Number(0.75))
        );
    }

    #[test]
    fn numbers_and_text_keep_their_kind() {
        assert_eq!(
            cell_value(&DataType::Float(3001234567.0)),
            Some(CellValue::Number(3001234567.0))
        );
        assert_eq!(cell_value(&DataType::Int(7)), Some(CellValue::Number(7.0)));
        assert_eq!(
            cell_value(&DataType::String("Lions".to_string())),
            Some(CellValue::text("Lions"))
        );
        assert_eq!(cell_value(&DataType::String("  ".to_string())), None);
        assert_eq!(cell_value(&DataType::Empty), None);
        assert_eq!(
            cell_value(&DataType::Bool(true)),
            Some(CellValue::text("true"))
        );
    }

    #[test]
    fn headers_are_trimmed() {
        assert_eq!(
            header_label(&DataType::String(" Celular ".to_string())),
            "Celular"
        );
        assert_eq!(header_label(&DataType::Empty), "");
    }

    #[test]
    fn unreadable_workbook_is_a_spreadsheet_error() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").expect("write");
        let err = read_path(&path).unwrap_err();
        assert!(err.to_string().contains("spreadsheet error"));
    }
}

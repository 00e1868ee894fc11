use matchday_core::{run, CellValue, IngestOutcome};
use matchday_ingest::{DriveExportSource, FileSource, IngestError, PublishedSheetSource, RowSource};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const AGENDA_CSV: &str = "Nombre Equipo,Celular,Hora Partido,Dia Partido,Nombre Cancha
Lions,+57 300-123-4567,18:00,15/06/2024,Cancha 1
Tigers,310 987 6543,6:00 PM,15/06/2024,Cancha 1
,,,,
Solo,3200000000,09:00,2024-06-16,Cancha 2
Sin fecha,3000000000,10:00,pronto,Cancha 3
";

#[test]
fn csv_file_feeds_the_pipeline() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("agenda.csv");
    fs::write(&path, AGENDA_CSV).expect("write csv");

    let source = FileSource::new(&path).expect("source");
    assert_eq!(source.source_name(), "file");
    assert_eq!(source.label(), path.display().to_string());

    let rows = source.fetch_rows().expect("rows");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].get("Celular"), Some(&CellValue::text("+57 300-123-4567")));

    let IngestOutcome::Success(report) = run(&rows) else {
        panic!("expected success");
    };
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 3);
    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.matches[0].team_a.name, "Lions");
    assert_eq!(report.matches[0].team_b.name, "Tigers");
    assert_eq!(report.records[2].match_day, "16/06/2024");
}

fn write_archive(path: &Path, entries: &[(&str, &str)]) {
    let mut zip = ZipWriter::new(File::create(path).expect("create archive"));
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, body) in entries {
        zip.start_file(*name, options).expect("start entry");
        zip.write_all(body.as_bytes()).expect("write entry");
    }
    zip.finish().expect("finish archive");
}

fn inline_cell(reference: &str, text: &str) -> String {
    format!(r#"<c r="{reference}" t="inlineStr"><is><t>{text}</t></is></c>"#)
}

/// Day and hour are typed cells: style 1 is a date format, style 2 a time.
fn write_xlsx(path: &Path) {
    let header = ["Nombre Equipo", "Celular", "Dia Partido", "Hora Partido", "Nombre Cancha"]
        .iter()
        .zip(["A1", "B1", "C1", "D1", "E1"])
        .map(|(text, reference)| inline_cell(reference, text))
        .collect::<String>();
    let team_row = |row: u32, team: &str, phone: &str| {
        format!(
            r#"<row r="{row}">{}{}<c r="C{row}" s="1"><v>45458</v></c><c r="D{row}" s="2"><v>0.75</v></c>{}</row>"#,
            inline_cell(&format!("A{row}"), team),
            inline_cell(&format!("B{row}"), phone),
            inline_cell(&format!("E{row}"), "Cancha 1"),
        )
    };
    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1">{header}</row>{}{}</sheetData></worksheet>"#,
        team_row(2, "Lions", "3001234567"),
        team_row(3, "Tigers", "3109876543"),
    );
    write_archive(
        path,
        &[
            (
                "xl/workbook.xml",
                r#"<?xml version="1.0" encoding="UTF-8"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Agenda" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
            ),
            (
                "xl/_rels/workbook.xml.rels",
                r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#,
            ),
            (
                "xl/styles.xml",
                r#"<?xml version="1.0" encoding="UTF-8"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><cellXfs count="3"><xf numFmtId="0"/><xf numFmtId="14"/><xf numFmtId="20"/></cellXfs></styleSheet>"#,
            ),
            ("xl/worksheets/sheet1.xml", sheet.as_str()),
        ],
    );
}

fn ods_text(text: &str) -> String {
    format!(r#"<table:table-cell office:value-type="string"><text:p>{text}</text:p></table:table-cell>"#)
}

/// Cells of a row must be adjacent: the reader rejects text between them.
fn write_ods(path: &Path) {
    let header = ["Nombre Equipo", "Celular", "Dia Partido", "Hora Partido", "Nombre Cancha"]
        .iter()
        .map(|text| ods_text(text))
        .collect::<String>();
    let team_row = |team: &str, phone: &str| {
        format!(
            r#"<table:table-row>{}{}<table:table-cell office:value-type="date" office:date-value="2024-06-15"><text:p>15/06/24</text:p></table:table-cell><table:table-cell office:value-type="time" office:time-value="PT18H00M00S"><text:p>18:00</text:p></table:table-cell>{}</table:table-row>"#,
            ods_text(team),
            ods_text(phone),
            ods_text("Cancha 1"),
        )
    };
    let content = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><office:body><office:spreadsheet><table:table table:name="Agenda">
<table:table-row>{header}</table:table-row>
{}
{}
</table:table></office:spreadsheet></office:body></office:document-content>"#,
        team_row("Lions", "3001234567"),
        team_row("Tigers", "3109876543"),
    );
    write_archive(
        path,
        &[
            ("mimetype", "application/vnd.oasis.opendocument.spreadsheet"),
            ("content.xml", content.as_str()),
        ],
    );
}

fn assert_typed_agenda(rows: &[matchday_core::RawRow]) {
    assert_eq!(rows.len(), 2);
    let IngestOutcome::Success(report) = run(rows) else {
        panic!("expected success");
    };
    assert!(report.skipped.is_empty());
    assert_eq!(report.records.len(), 2);
    for record in &report.records {
        assert_eq!(record.match_day, "15/06/2024");
        assert_eq!(record.match_time, "18:00");
        assert_eq!(record.field_name, "Cancha 1");
    }
    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.matches[0].team_a.name, "Lions");
    assert_eq!(report.matches[0].team_b.name, "Tigers");
}

#[test]
fn xlsx_workbook_feeds_the_pipeline() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("agenda.xlsx");
    write_xlsx(&path);

    let rows = FileSource::new(&path).expect("source").fetch_rows().expect("rows");
    assert_typed_agenda(&rows);
}

#[test]
fn ods_workbook_feeds_the_pipeline() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("agenda.ods");
    write_ods(&path);

    let rows = FileSource::new(&path).expect("source").fetch_rows().expect("rows");
    assert_typed_agenda(&rows);
}

#[test]
fn windows_1252_csv_file_is_decoded() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("agenda.csv");
    let mut body = b"Nombre Equipo,Celular,Hora Partido,Dia Partido,Nombre Cancha\n".to_vec();
    body.extend_from_slice(b"Le\xF3n,3001234567,18:00,15/06/2024,Sint\xE9tica\n");
    fs::write(&path, body).expect("write csv");

    let rows = FileSource::new(&path).expect("source").fetch_rows().expect("rows");
    assert_eq!(rows[0].get("Nombre Equipo"), Some(&CellValue::text("León")));
    assert_eq!(rows[0].get("Nombre Cancha"), Some(&CellValue::text("Sintética")));
}

#[test]
fn tsv_and_semicolon_files_are_detected() {
    let temp = TempDir::new().expect("tempdir");
    let tsv = temp.path().join("agenda.tsv");
    fs::write(&tsv, "Nombre Equipo\tCelular\nLions, FC\t300\n").expect("write tsv");
    let rows = FileSource::new(&tsv).expect("source").fetch_rows().expect("rows");
    assert_eq!(rows[0].get("Nombre Equipo"), Some(&CellValue::text("Lions, FC")));

    let semicolon = temp.path().join("agenda.txt");
    fs::write(&semicolon, "Nombre Equipo;Celular\nLions;300\n").expect("write txt");
    let rows = FileSource::new(&semicolon)
        .expect("source")
        .fetch_rows()
        .expect("rows");
    assert_eq!(rows[0].get("Celular"), Some(&CellValue::text("300")));
}

#[test]
fn header_only_file_is_empty_outcome() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("agenda.csv");
    fs::write(&path, "Nombre Equipo,Celular\n\n").expect("write csv");
    let rows = FileSource::new(&path).expect("source").fetch_rows().expect("rows");
    assert_eq!(run(&rows), IngestOutcome::Empty);
}

#[test]
fn json_file_reports_malformed_rows() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("agenda.json");
    fs::write(&path, r#"[{"Nombre Equipo": "Lions"}, 42]"#).expect("write json");
    let err = FileSource::new(&path)
        .expect("source")
        .fetch_rows()
        .unwrap_err();
    assert!(matches!(err, IngestError::Core(_)));
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn missing_file_is_an_io_error() {
    let temp = TempDir::new().expect("tempdir");
    let err = FileSource::new(temp.path().join("missing.csv"))
        .expect("source")
        .fetch_rows()
        .unwrap_err();
    assert!(matches!(err, IngestError::Io(_)));
}

#[cfg(not(feature = "http-fetch"))]
#[test]
fn network_sources_need_the_http_feature() {
    let err = PublishedSheetSource::new("https://example.com/pub?output=csv".to_string())
        .fetch_rows()
        .unwrap_err();
    assert!(matches!(err, IngestError::Unavailable(_)));

    let err = DriveExportSource::new("1AbC".to_string(), "token".to_string())
        .fetch_rows()
        .unwrap_err();
    assert!(matches!(err, IngestError::Unavailable(_)));

    let err = DriveExportSource::new("../1AbC".to_string(), "token".to_string())
        .fetch_rows()
        .unwrap_err();
    assert!(matches!(err, IngestError::Parse(_)));

    let err = DriveExportSource::new("1AbC".to_string(), "  ".to_string())
        .fetch_rows()
        .unwrap_err();
    assert!(matches!(err, IngestError::Parse(_)));
}

#[cfg(feature = "http-fetch")]
#[test]
fn published_sheet_requires_https() {
    let err = PublishedSheetSource::new("http://example.com/pub?output=csv".to_string())
        .fetch_rows()
        .unwrap_err();
    assert!(matches!(err, IngestError::Parse(_)));

    let err = DriveExportSource::new("1AbC".to_string(), " ".to_string())
        .fetch_rows()
        .unwrap_err();
    assert!(matches!(err, IngestError::Parse(_)));
}

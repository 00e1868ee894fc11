use crate::table::{rows_from_table, text_cell};
use crate::Result;
use encoding_rs::{Encoding, WINDOWS_1252};
use matchday_core::RawRow;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

const SAMPLE_LINES: usize = 5;
const CANDIDATES: [u8; 3] = [b'\t', b',', b';'];

/// Reads a delimited text file. Every cell is kept as text.
pub fn read_path(path: &Path, delimiter: Option<u8>) -> Result<Vec<RawRow>> {
    let bytes = fs::read(path)?;
    rows_from_bytes(&bytes, delimiter)
}

/// Like [`rows_from_str`] for undecoded input. See [`decode_text`].
pub fn rows_from_bytes(bytes: &[u8], delimiter: Option<u8>) -> Result<Vec<RawRow>> {
    rows_from_str(&decode_text(bytes), delimiter)
}

/// Decodes exported text: a byte order mark wins, then UTF-8, and anything
/// else is read as Windows-1252, the usual encoding of spreadsheet CSV
/// exports on Spanish-locale Windows.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return encoding.decode_without_bom_handling(&bytes[bom_len..]).0;
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            debug!("input is not utf-8, decoding as windows-1252");
            WINDOWS_1252.decode_without_bom_handling(bytes).0
        }
    }
}

/// Parses delimited text with a header line. Without an explicit delimiter
/// the one most frequent on the first non-blank lines is used.
pub fn rows_from_str(contents: &str, delimiter: Option<u8>) -> Result<Vec<RawRow>> {
    let contents = contents.trim_start_matches('\u{feff}');
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(contents));
    debug!(delimiter = %char::from(delimiter).escape_default(), "reading delimited rows");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(text_cell).collect());
    }
    Ok(rows_from_table(&headers, rows))
}

pub fn detect_delimiter(contents: &str) -> u8 {
    for line in contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SAMPLE_LINES)
    {
        let best = CANDIDATES
            .iter()
            .map(|&candidate| (candidate, line.bytes().filter(|&b| b == candidate).count()))
            .max_by_key(|&(_, count)| count);
        if let Some((delimiter, count)) = best {
            if count > 0 {
                return delimiter;
            }
        }
    }
    b','
}

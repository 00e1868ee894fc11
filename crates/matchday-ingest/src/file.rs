use crate::source::RowSource;
use crate::{delimited, json, spreadsheet, IngestError, Result};
use matchday_core::RawRow;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Workbook,
    Delimited { delimiter: Option<u8> },
    Json,
}

impl FileFormat {
    /// Picks a reader from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(FileFormat::Workbook),
            "csv" => Ok(FileFormat::Delimited { delimiter: None }),
            "tsv" => Ok(FileFormat::Delimited {
                delimiter: Some(b'\t'),
            }),
            "txt" => Ok(FileFormat::Delimited { delimiter: None }),
            "json" => Ok(FileFormat::Json),
            _ => Err(IngestError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: FileFormat,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = FileFormat::from_path(&path)?;
        Ok(Self { path, format })
    }
}

impl RowSource for FileSource {
    fn source_name(&self) -> &'static str {
        "file"
    }

    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_rows(&self) -> Result<Vec<RawRow>> {
        if !self.path.is_file() {
            return Err(IngestError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not a readable file", self.path.display()),
            )));
        }
        let rows = match self.format {
            FileFormat::Workbook => spreadsheet::read_path(&self.path)?,
            FileFormat::Delimited { delimiter } => delimited::read_path(&self.path, delimiter)?,
            FileFormat::Json => json::read_path(&self.path)?,
        };
        info!(path = %self.path.display(), rows = rows.len(), "rows read");
        Ok(rows)
    }
}

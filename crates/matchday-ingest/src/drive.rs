use crate::source::RowSource;
use crate::{IngestError, Result};

pub const EXPORT_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn validate_file_id(file_id: &str) -> Result<()> {
    if file_id.is_empty()
        || !file_id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Err(IngestError::Parse(format!("invalid drive file id: {file_id}")));
    }
    Ok(())
}

fn validate_token(token: &str) -> Result<&str> {
    let token = token.trim();
    if token.is_empty() {
        return Err(IngestError::Parse("drive access token is empty".to_string()));
    }
    Ok(token)
}

#[cfg(feature = "http-fetch")]
mod imp {
    use super::{validate_file_id, validate_token, Result, RowSource, EXPORT_MIME_TYPE};
    use crate::source::USER_AGENT;
    use crate::spreadsheet;
    use matchday_core::RawRow;
    use reqwest::blocking::Client;
    use std::time::Duration;
    use tracing::info;
    use url::Url;

    const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files/";

    /// A Google Sheets document exported as xlsx through the Drive API.
    #[derive(Debug, Clone)]
    pub struct DriveExportSource {
        file_id: String,
        token: String,
    }

    impl DriveExportSource {
        pub fn new(file_id: String, token: String) -> Self {
            Self { file_id, token }
        }
    }

    impl RowSource for DriveExportSource {
        fn source_name(&self) -> &'static str {
            "drive"
        }

        fn label(&self) -> String {
            self.file_id.clone()
        }

        fn fetch_rows(&self) -> Result<Vec<RawRow>> {
            let bytes = fetch_export(&self.file_id, &self.token)?;
            let rows = spreadsheet::rows_from_xlsx_bytes(bytes)?;
            info!(file_id = %self.file_id, rows = rows.len(), "rows exported");
            Ok(rows)
        }
    }

    pub fn export_url(file_id: &str) -> Result<Url> {
        validate_file_id(file_id)?;
        let mut url = Url::parse(DRIVE_FILES_URL)?.join(&format!("{file_id}/export"))?;
        url.query_pairs_mut().append_pair("mimeType", EXPORT_MIME_TYPE);
        Ok(url)
    }

    pub fn fetch_export(file_id: &str, token: &str) -> Result<Vec<u8>> {
        let token = validate_token(token)?;
        let url = export_url(file_id)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let response = client
            .get(url)
            .bearer_auth(token)
            .send()?
            .error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }

}

#[cfg(not(feature = "http-fetch"))]
mod imp {
    use super::{validate_file_id, validate_token, IngestError, Result, RowSource};
    use matchday_core::RawRow;

    #[derive(Debug, Clone)]
    pub struct DriveExportSource {
        file_id: String,
        token: String,
    }

    impl DriveExportSource {
        pub fn new(file_id: String, token: String) -> Self {
            Self { file_id, token }
        }
    }

    impl RowSource for DriveExportSource {
        fn source_name(&self) -> &'static str {
            "drive"
        }

        fn label(&self) -> String {
            self.file_id.clone()
        }

        fn fetch_rows(&self) -> Result<Vec<RawRow>> {
            validate_file_id(&self.file_id)?;
            validate_token(&self.token)?;
            Err(IngestError::Unavailable(
                "drive export requires the http-fetch feature".to_string(),
            ))
        }
    }
}

pub use imp::DriveExportSource;
#[cfg(feature = "http-fetch")]
pub use imp::{export_url, fetch_export};

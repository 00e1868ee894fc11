use crate::source::RowSource;
use crate::{IngestError, Result};

#[cfg(feature = "http-fetch")]
mod imp {
    use super::{IngestError, Result, RowSource};
    use crate::delimited;
    use crate::source::USER_AGENT;
    use matchday_core::RawRow;
    use reqwest::blocking::Client;
    use std::time::Duration;
    use tracing::info;
    use url::Url;

    /// A sheet published to the web as CSV.
    #[derive(Debug, Clone)]
    pub struct PublishedSheetSource {
        url: String,
    }

    impl PublishedSheetSource {
        pub fn new(url: String) -> Self {
            Self { url }
        }
    }

    impl RowSource for PublishedSheetSource {
        fn source_name(&self) -> &'static str {
            "url"
        }

        fn label(&self) -> String {
            self.url.clone()
        }

        fn fetch_rows(&self) -> Result<Vec<RawRow>> {
            let body = fetch_published_csv(&self.url)?;
            let rows = delimited::rows_from_bytes(&body, None)?;
            info!(url = %self.url, rows = rows.len(), "rows fetched");
            Ok(rows)
        }
    }

    pub fn fetch_published_csv(sheet_url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(sheet_url)?;
        if url.scheme() != "https" {
            return Err(IngestError::Parse(
                "published sheet url must use https".to_string(),
            ));
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let response = client
            .get(url)
            .header("Accept", "text/csv")
            .send()?
            .error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

#[cfg(not(feature = "http-fetch"))]
mod imp {
    use super::{IngestError, Result, RowSource};
    use matchday_core::RawRow;

    #[derive(Debug, Clone)]
    pub struct PublishedSheetSource {
        url: String,
    }

    impl PublishedSheetSource {
        pub fn new(url: String) -> Self {
            Self { url }
        }
    }

    impl RowSource for PublishedSheetSource {
        fn source_name(&self) -> &'static str {
            "url"
        }

        fn label(&self) -> String {
            self.url.clone()
        }

        fn fetch_rows(&self) -> Result<Vec<RawRow>> {
            fetch_published_csv(&self.url).map(|_| Vec::new())
        }
    }

    pub fn fetch_published_csv(_sheet_url: &str) -> Result<Vec<u8>> {
        Err(IngestError::Unavailable(
            "importing from a url requires the http-fetch feature".to_string(),
        ))
    }
}

pub use imp::{fetch_published_csv, PublishedSheetSource};

use crate::Result;
use matchday_core::RawRow;

#[cfg(feature = "http-fetch")]
pub(crate) const USER_AGENT: &str = concat!("matchday/", env!("CARGO_PKG_VERSION"));

/// Anything that can hand the pipeline a header-keyed list of rows.
pub trait RowSource {
    fn source_name(&self) -> &'static str;
    /// Path, URL or id shown in the import history.
    fn label(&self) -> String;
    fn fetch_rows(&self) -> Result<Vec<RawRow>>;
}

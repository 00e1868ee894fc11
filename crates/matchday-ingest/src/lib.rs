pub mod delimited;
pub mod drive;
pub mod error;
pub mod file;
pub mod json;
pub mod published;
pub mod source;
pub mod spreadsheet;
mod table;

pub use drive::DriveExportSource;
pub use error::{IngestError, Result};
pub use file::{FileFormat, FileSource};
pub use published::PublishedSheetSource;
pub use source::RowSource;

pub mod imports;
pub mod records;

pub use imports::ImportsRepo;
pub use records::RecordsRepo;

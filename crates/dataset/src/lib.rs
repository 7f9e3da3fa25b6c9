#![forbid(unsafe_code)]

pub mod bundled;
pub mod csv_table;
pub mod sheet;
pub mod source;

pub use bundled::BundledSource;
pub use csv_table::parse_csv;
pub use sheet::{SheetConfig, SheetSource};
pub use source::{DatasetSource, FailingSource, InMemorySource, SourceError};

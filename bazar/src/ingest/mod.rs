//! CSV ingestion pipeline for daily batch files.
//!
//! One batch file holds one trading day for the whole market, named after
//! that date (`YYYY_MM_DD.csv`). The pipeline derives each batch's date from
//! its filename, normalizes the sheet's human-formatted numbers, and writes
//! the rows into the archive store.

mod batch_date;
mod importer;
mod normalize;

pub use batch_date::parse_batch_date;
pub use importer::{BatchOutcome, BatchReport, CsvImporter, ImportSummary, IngestMode};
pub use normalize::clean_number;

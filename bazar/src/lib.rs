//! Bazar reconciles daily stock price data from two storage planes.
//!
//! Overview
//! - The archive store holds the long historical dataset, filled batch by
//!   batch from daily CSV sheets by the ingestion pipeline in [`ingest`].
//! - The live store holds a short rolling window of recent sessions,
//!   refreshed out of band by a scraper.
//! - The [`Bazar`] engine reads both concurrently and merges them per symbol
//!   into one ascending, date-deduplicated series where the live record wins
//!   on shared dates.
//!
//! Key behaviors
//! - A symbol missing from both stores is an error; a symbol present in only
//!   one store yields that store's series as-is.
//! - Catalog listing unions the distinct symbols of both stores; comparison
//!   and search read the archive only, since the live window is too short to
//!   anchor either.
//! - Ingestion derives each batch's trading date from its filename and
//!   imports batches sequentially: a bad filename skips that batch, a storage
//!   failure aborts the run.
//!
//! Building an engine over concrete stores:
//! ```rust,ignore
//! use std::sync::Arc;
//! use bazar::Bazar;
//!
//! let bazar = Bazar::builder()
//!     .with_archive(Arc::new(archive))
//!     .with_live(Arc::new(live))
//!     .build()?;
//!
//! let last_year = bazar.history_last_days("ADBL", 365).await?;
//! ```
//!
//! Importing a directory of daily sheets:
//! ```rust,ignore
//! use bazar::ingest::{CsvImporter, IngestMode};
//!
//! let importer = CsvImporter::new(archive, IngestMode::Upsert);
//! let summary = importer.run_dir("data/daily").await?;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
/// CSV ingestion pipeline for daily batch files.
pub mod ingest;
mod router;

pub use crate::core::{Bazar, BazarBuilder};

// Re-export core types for convenience
pub use bazar_core::{
    ArchiveStore, BazarError, DailyBar, LiveStore, SymbolSnapshot, UpsertOutcome,
    clip_trailing_days, merge_daily_series,
};

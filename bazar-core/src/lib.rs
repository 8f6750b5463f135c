//! bazar-core
//!
//! Core types, traits, and utilities shared across the bazar ecosystem.
//!
//! - `types`: common data structures (daily bars, upsert outcomes, snapshots).
//! - `store`: the `ArchiveStore` and `LiveStore` contracts the reconciliation
//!   engine reads from and the ingestion pipeline writes to.
//! - `timeseries`: helpers to merge the archive and live series of one symbol
//!   into a single ordered, date-deduplicated view.
//!
//! The archive store is the long-horizon, slowly updated historical dataset;
//! the live store is a short rolling window refreshed by an external scraper.
//! Both are keyed unique on `(symbol, calendar date)`. This crate never talks
//! to a concrete storage engine; backends implement the traits in `store`
//! (see `bazar-postgres` for the sqlx implementation and `bazar-mock` for the
//! in-memory one used in tests).
#![warn(missing_docs)]

/// Unified error taxonomy for the bazar workspace.
pub mod error;
/// Store contracts implemented by storage backends.
pub mod store;
/// Time-series utilities for merging and windowing daily series.
pub mod timeseries;
/// Common data structures.
pub mod types;

pub use error::BazarError;
pub use store::{ArchiveStore, LiveStore};
pub use timeseries::merge::{clip_trailing_days, merge_daily_series};
pub use types::{DailyBar, SymbolSnapshot, UpsertOutcome};

//! Store contracts separating the reconciliation engine from storage engines.
//!
//! Two stores exist with deliberately different shapes. The archive store is
//! the writable long-horizon dataset the ingestion pipeline fills; the live
//! store is read-only from this workspace's point of view, refreshed out of
//! band by a scraper. Both are keyed unique on `(symbol, calendar date)`.

use async_trait::async_trait;

use crate::error::BazarError;
use crate::types::{DailyBar, UpsertOutcome};

/// The long-horizon historical dataset.
///
/// Implementations must treat `(symbol, date)` as the unique key, where the
/// date is the calendar date of the bar's timestamp ([`DailyBar::date`]).
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    /// All archived bars for `symbol`, in no guaranteed order.
    async fn bars_for_symbol(&self, symbol: &str) -> Result<Vec<DailyBar>, BazarError>;

    /// Every distinct symbol present in the archive.
    async fn distinct_symbols(&self) -> Result<Vec<String>, BazarError>;

    /// Write `bars`, overwriting any row whose `(symbol, date)` key already
    /// exists and inserting the rest. Returns how many rows took each path.
    async fn bulk_upsert(&self, bars: &[DailyBar]) -> Result<UpsertOutcome, BazarError>;

    /// Write `bars` without overwriting: a `(symbol, date)` collision fails
    /// with [`BazarError::DuplicateKey`] instead of replacing the row.
    ///
    /// Whether rows before the collision are kept is backend-defined; callers
    /// that treat duplicates as a skip must not assume partial application.
    async fn insert_new(&self, bars: &[DailyBar]) -> Result<(), BazarError>;
}

/// The short rolling window of recent bars maintained by an external scraper.
#[async_trait]
pub trait LiveStore: Send + Sync {
    /// All live bars for `symbol`, in no guaranteed order.
    async fn bars_for_symbol(&self, symbol: &str) -> Result<Vec<DailyBar>, BazarError>;

    /// Every distinct symbol present in the live window.
    async fn distinct_symbols(&self) -> Result<Vec<String>, BazarError>;
}

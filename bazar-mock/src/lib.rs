//! In-memory implementations of the bazar store traits.
//!
//! `MemoryArchive` and `MemoryLive` hold bars in a `BTreeMap` keyed on
//! `(symbol, calendar date)`, mirroring the uniqueness contract of the real
//! backends. They are deterministic and CI-safe, and power the workspace's
//! tests and examples.
//!
//! The reserved symbol `"FAIL"` forces a storage error from every read, for
//! exercising error propagation paths.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bazar_core::{ArchiveStore, BazarError, DailyBar, LiveStore, UpsertOutcome};
use chrono::NaiveDate;

pub mod fixtures;

type BarMap = BTreeMap<(String, NaiveDate), DailyBar>;

fn forced_failure(store: &'static str, symbol: &str) -> Result<(), BazarError> {
    if symbol == "FAIL" {
        return Err(BazarError::store(store, "forced failure"));
    }
    Ok(())
}

fn read_symbol(map: &BarMap, symbol: &str) -> Vec<DailyBar> {
    map.range((symbol.to_string(), NaiveDate::MIN)..=(symbol.to_string(), NaiveDate::MAX))
        .map(|(_, bar)| bar.clone())
        .collect()
}

fn read_symbols(map: &BarMap) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for (symbol, _) in map.keys() {
        if out.last().map(String::as_str) != Some(symbol) {
            out.push(symbol.clone());
        }
    }
    out
}

/// Deterministic in-memory archive store.
#[derive(Debug, Default)]
pub struct MemoryArchive {
    inner: Mutex<BarMap>,
}

impl MemoryArchive {
    /// An empty archive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An archive pre-seeded with `bars`; later bars win on key collisions.
    #[must_use]
    pub fn with_bars(bars: Vec<DailyBar>) -> Self {
        let store = Self::new();
        {
            let mut map = store.locked();
            for bar in bars {
                map.insert((bar.symbol.clone(), bar.date()), bar);
            }
        }
        store
    }

    /// An archive seeded with the deterministic fixture symbols.
    #[must_use]
    pub fn with_fixtures() -> Self {
        let bars = ["ADBL", "NABIL"]
            .into_iter()
            .filter_map(fixtures::daily::archive_by_symbol)
            .flatten()
            .collect();
        Self::with_bars(bars)
    }

    /// The number of bars currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locked().len()
    }

    /// Whether the archive holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locked().is_empty()
    }

    fn locked(&self) -> MutexGuard<'_, BarMap> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ArchiveStore for MemoryArchive {
    async fn bars_for_symbol(&self, symbol: &str) -> Result<Vec<DailyBar>, BazarError> {
        forced_failure("archive", symbol)?;
        Ok(read_symbol(&self.locked(), symbol))
    }

    async fn distinct_symbols(&self) -> Result<Vec<String>, BazarError> {
        Ok(read_symbols(&self.locked()))
    }

    async fn bulk_upsert(&self, bars: &[DailyBar]) -> Result<UpsertOutcome, BazarError> {
        let mut map = self.locked();
        let mut outcome = UpsertOutcome::default();
        for bar in bars {
            forced_failure("archive", &bar.symbol)?;
            match map.insert((bar.symbol.clone(), bar.date()), bar.clone()) {
                Some(_) => outcome.modified += 1,
                None => outcome.inserted += 1,
            }
        }
        Ok(outcome)
    }

    async fn insert_new(&self, bars: &[DailyBar]) -> Result<(), BazarError> {
        let mut map = self.locked();
        // Collision check first so a duplicate leaves the map untouched.
        for bar in bars {
            forced_failure("archive", &bar.symbol)?;
            let key = (bar.symbol.clone(), bar.date());
            if map.contains_key(&key) {
                return Err(BazarError::duplicate_key(format!(
                    "{}/{}",
                    key.0, key.1
                )));
            }
        }
        for bar in bars {
            map.insert((bar.symbol.clone(), bar.date()), bar.clone());
        }
        Ok(())
    }
}

/// Deterministic in-memory live store.
#[derive(Debug, Default)]
pub struct MemoryLive {
    inner: Mutex<BarMap>,
}

impl MemoryLive {
    /// An empty live window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A live window pre-seeded with `bars`; later bars win on key collisions.
    #[must_use]
    pub fn with_bars(bars: Vec<DailyBar>) -> Self {
        let store = Self::new();
        {
            let mut map = store.locked();
            for bar in bars {
                map.insert((bar.symbol.clone(), bar.date()), bar);
            }
        }
        store
    }

    /// A live window seeded with the deterministic fixture symbols.
    #[must_use]
    pub fn with_fixtures() -> Self {
        let bars = ["ADBL", "NABIL"]
            .into_iter()
            .filter_map(fixtures::daily::live_by_symbol)
            .flatten()
            .collect();
        Self::with_bars(bars)
    }

    fn locked(&self) -> MutexGuard<'_, BarMap> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl LiveStore for MemoryLive {
    async fn bars_for_symbol(&self, symbol: &str) -> Result<Vec<DailyBar>, BazarError> {
        forced_failure("live", symbol)?;
        Ok(read_symbol(&self.locked(), symbol))
    }

    async fn distinct_symbols(&self) -> Result<Vec<String>, BazarError> {
        Ok(read_symbols(&self.locked()))
    }
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bazar_core::{ArchiveStore, BazarError, DailyBar, UpsertOutcome};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use super::batch_date::parse_batch_date;
use super::normalize::clean_number;

/// How imported rows are written to the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestMode {
    /// Overwrite existing `(symbol, date)` rows. Idempotent; the mode for
    /// routine re-imports.
    Upsert,
    /// Plain inserts. A batch colliding with already-imported data is skipped
    /// as a whole, which makes re-running a bulk backfill cheap.
    InsertNew,
}

/// What became of one batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The batch was written; counts say how many rows took each path.
    Imported(UpsertOutcome),
    /// The filename did not encode a real calendar date.
    SkippedInvalidDate,
    /// An `InsertNew` batch collided with existing data and was skipped.
    SkippedDuplicate,
}

/// Per-batch report within an import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Batch filename.
    pub file: String,
    /// Rows parsed out of the sheet (blank-symbol rows excluded).
    pub rows: usize,
    /// What happened to the batch.
    pub outcome: BatchOutcome,
}

/// Aggregate result of an import run over a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// One report per batch file encountered, in processing order.
    pub batches: Vec<BatchReport>,
    /// Row counts summed over the imported batches.
    pub totals: UpsertOutcome,
}

impl ImportSummary {
    /// Batches that were actually written.
    #[must_use]
    pub fn imported(&self) -> usize {
        self.batches
            .iter()
            .filter(|b| matches!(b.outcome, BatchOutcome::Imported(_)))
            .count()
    }

    /// Batches skipped for either reason.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.batches.len() - self.imported()
    }
}

/// One row of a daily sheet, as the exchange publishes it.
///
/// Every numeric column is read as raw text and pushed through
/// [`clean_number`]; a column missing from the header degrades that field to
/// null for the whole batch rather than failing the import. The `Conf.`
/// column is ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Symbol", default)]
    symbol: Option<String>,
    #[serde(rename = "Open", default)]
    open: Option<String>,
    #[serde(rename = "High", default)]
    high: Option<String>,
    #[serde(rename = "Low", default)]
    low: Option<String>,
    #[serde(rename = "Close", default)]
    close: Option<String>,
    #[serde(rename = "LTP", default)]
    ltp: Option<String>,
    #[serde(rename = "Close - LTP", default)]
    close_ltp_diff: Option<String>,
    #[serde(rename = "Close - LTP %", default)]
    close_ltp_diff_percent: Option<String>,
    #[serde(rename = "VWAP", default)]
    vwap: Option<String>,
    #[serde(rename = "Vol", default)]
    volume: Option<String>,
    #[serde(rename = "Prev. Close", default)]
    prev_close: Option<String>,
    #[serde(rename = "Turnover", default)]
    turnover: Option<String>,
    #[serde(rename = "Trans.", default)]
    transactions: Option<String>,
    #[serde(rename = "Diff", default)]
    diff: Option<String>,
    #[serde(rename = "Range", default)]
    range: Option<String>,
    #[serde(rename = "Diff %", default)]
    diff_percent: Option<String>,
    #[serde(rename = "Range %", default)]
    range_percent: Option<String>,
    #[serde(rename = "VWAP %", default)]
    vwap_percent: Option<String>,
    #[serde(rename = "120 Days", default)]
    ma_120: Option<String>,
    #[serde(rename = "180 Days", default)]
    ma_180: Option<String>,
    #[serde(rename = "52 Weeks High", default)]
    high_52w: Option<String>,
    #[serde(rename = "52 Weeks Low", default)]
    low_52w: Option<String>,
}

impl RawRow {
    fn into_bar(self, ts: DateTime<Utc>) -> Option<DailyBar> {
        let symbol = self.symbol.as_deref()?.trim();
        if symbol.is_empty() {
            return None;
        }
        let mut bar = DailyBar::empty(symbol, ts);
        bar.open = clean_number(self.open.as_deref());
        bar.high = clean_number(self.high.as_deref());
        bar.low = clean_number(self.low.as_deref());
        bar.close = clean_number(self.close.as_deref());
        bar.ltp = clean_number(self.ltp.as_deref());
        bar.close_ltp_diff = clean_number(self.close_ltp_diff.as_deref());
        bar.close_ltp_diff_percent = clean_number(self.close_ltp_diff_percent.as_deref());
        bar.vwap = clean_number(self.vwap.as_deref());
        bar.volume = clean_number(self.volume.as_deref());
        bar.prev_close = clean_number(self.prev_close.as_deref());
        bar.turnover = clean_number(self.turnover.as_deref());
        bar.transactions = clean_number(self.transactions.as_deref());
        bar.diff = clean_number(self.diff.as_deref());
        bar.range = clean_number(self.range.as_deref());
        bar.diff_percent = clean_number(self.diff_percent.as_deref());
        bar.range_percent = clean_number(self.range_percent.as_deref());
        bar.vwap_percent = clean_number(self.vwap_percent.as_deref());
        bar.ma_120 = clean_number(self.ma_120.as_deref());
        bar.ma_180 = clean_number(self.ma_180.as_deref());
        bar.high_52w = clean_number(self.high_52w.as_deref());
        bar.low_52w = clean_number(self.low_52w.as_deref());
        Some(bar)
    }
}

/// Imports daily sheet batches into the archive store.
///
/// Batches are processed strictly one at a time, in filename order: each
/// batch's write completes before the next file is touched, so progress
/// reporting stays accurate and memory is bounded by one batch's rows.
pub struct CsvImporter {
    archive: Arc<dyn ArchiveStore>,
    mode: IngestMode,
}

impl CsvImporter {
    /// An importer writing to `archive` in the given mode.
    #[must_use]
    pub fn new(archive: Arc<dyn ArchiveStore>, mode: IngestMode) -> Self {
        Self { archive, mode }
    }

    /// Import every `*.csv` file in `dir`, in filename order.
    ///
    /// A batch with an undecodable filename date is skipped with a warning
    /// and the run continues; a read or storage failure aborts the run where
    /// it stands, with the batches already written left in place.
    ///
    /// # Errors
    /// - `BatchRead` if the directory or a batch file cannot be read.
    /// - `Store` if the archive rejects a write.
    pub async fn run_dir(&self, dir: impl AsRef<Path>) -> Result<ImportSummary, BazarError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir)
            .map_err(|e| BazarError::batch_read(dir.display().to_string(), e.to_string()))?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")))
            .collect();
        files.sort();

        let mut summary = ImportSummary::default();
        for path in files {
            let report = self.run_file(&path).await?;
            if let BatchOutcome::Imported(outcome) = report.outcome {
                summary.totals.absorb(outcome);
            }
            summary.batches.push(report);
        }
        info!(
            batches = summary.batches.len(),
            imported = summary.imported(),
            skipped = summary.skipped(),
            inserted = summary.totals.inserted,
            modified = summary.totals.modified,
            "import run complete"
        );
        Ok(summary)
    }

    /// Import a single batch file.
    ///
    /// # Errors
    /// - `BatchRead` if the file cannot be read or is structurally broken CSV.
    /// - `Store` if the archive rejects the write.
    pub async fn run_file(&self, path: &Path) -> Result<BatchReport, BazarError> {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let stem = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let ts = match parse_batch_date(&stem) {
            Ok(ts) => ts,
            Err(err) => {
                warn!(%file, %err, "skipping batch");
                return Ok(BatchReport {
                    file,
                    rows: 0,
                    outcome: BatchOutcome::SkippedInvalidDate,
                });
            }
        };

        let bars = read_batch(path, &file, ts)?;
        let rows = bars.len();
        if bars.is_empty() {
            warn!(%file, "batch has no usable rows");
            return Ok(BatchReport {
                file,
                rows,
                outcome: BatchOutcome::Imported(UpsertOutcome::default()),
            });
        }

        let outcome = match self.mode {
            IngestMode::Upsert => {
                let outcome = self.archive.bulk_upsert(&bars).await?;
                info!(
                    %file,
                    rows,
                    inserted = outcome.inserted,
                    modified = outcome.modified,
                    "batch upserted"
                );
                BatchOutcome::Imported(outcome)
            }
            IngestMode::InsertNew => match self.archive.insert_new(&bars).await {
                Ok(()) => {
                    info!(%file, rows, "batch inserted");
                    BatchOutcome::Imported(UpsertOutcome {
                        inserted: rows as u64,
                        modified: 0,
                    })
                }
                Err(BazarError::DuplicateKey { key }) => {
                    warn!(%file, %key, "batch already imported; skipping");
                    BatchOutcome::SkippedDuplicate
                }
                Err(err) => return Err(err),
            },
        };

        Ok(BatchReport {
            file,
            rows,
            outcome,
        })
    }
}

fn read_batch(
    path: &Path,
    file: &str,
    ts: DateTime<Utc>,
) -> Result<Vec<DailyBar>, BazarError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| BazarError::batch_read(file, e.to_string()))?;

    // A sheet without a Symbol column cannot be attributed to anyone; fail
    // the batch instead of silently dropping every row.
    let headers = reader
        .headers()
        .map_err(|e| BazarError::batch_read(file, e.to_string()))?;
    if !headers.iter().any(|h| h == "Symbol") {
        return Err(BazarError::batch_read(file, "missing Symbol column"));
    }

    let mut bars = Vec::new();
    let mut blank = 0usize;
    for row in reader.deserialize::<RawRow>() {
        let row = row.map_err(|e| BazarError::batch_read(file, e.to_string()))?;
        match row.into_bar(ts) {
            Some(bar) => bars.push(bar),
            None => blank += 1,
        }
    }
    if blank > 0 {
        warn!(%file, blank, "dropped rows with a blank symbol");
    }
    Ok(bars)
}

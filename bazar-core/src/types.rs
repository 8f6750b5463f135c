use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Canonical daily record for one symbol on one trading date: OHLCV plus the
/// extended statistics columns carried by the exchange's daily sheet.
///
/// `ts` is the trading date anchored at UTC midnight. Stored rows may carry
/// time-of-day noise, so all date-keyed logic must collapse through
/// [`DailyBar::date`] rather than comparing timestamps directly.
///
/// All numeric fields are `Option<f64>`: `None` means "no data" (a dash or
/// blank cell in the source sheet), which is distinct from zero. Cells that
/// exist but fail to parse surface as `Some(f64::NAN)`; consumers should not
/// treat NaN as a valid price. OHLC fields are expected to be all-present or
/// all-absent, and `high >= low` when both are present, but neither is
/// enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBar {
    /// Ticker symbol, verbatim from the source.
    pub symbol: String,
    /// Trading date at UTC midnight.
    pub ts: DateTime<Utc>,
    /// Opening price.
    pub open: Option<f64>,
    /// Intraday high.
    pub high: Option<f64>,
    /// Intraday low.
    pub low: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
    /// Last traded price.
    pub ltp: Option<f64>,
    /// Close minus last traded price.
    pub close_ltp_diff: Option<f64>,
    /// Close minus last traded price, in percent.
    pub close_ltp_diff_percent: Option<f64>,
    /// Volume-weighted average price.
    pub vwap: Option<f64>,
    /// Traded volume (units).
    pub volume: Option<f64>,
    /// Previous session's close.
    pub prev_close: Option<f64>,
    /// Traded turnover (value).
    pub turnover: Option<f64>,
    /// Number of transactions.
    pub transactions: Option<f64>,
    /// Day-over-day price difference.
    pub diff: Option<f64>,
    /// Intraday range (high minus low).
    pub range: Option<f64>,
    /// Day-over-day difference, in percent.
    pub diff_percent: Option<f64>,
    /// Intraday range, in percent.
    pub range_percent: Option<f64>,
    /// VWAP deviation, in percent.
    pub vwap_percent: Option<f64>,
    /// 120-day moving average.
    pub ma_120: Option<f64>,
    /// 180-day moving average.
    pub ma_180: Option<f64>,
    /// 52-week high.
    pub high_52w: Option<f64>,
    /// 52-week low.
    pub low_52w: Option<f64>,
}

impl DailyBar {
    /// The calendar date this bar belongs to, with any time-of-day noise
    /// collapsed away. This is the key the merge and the stores are unique on.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.ts.date_naive()
    }

    /// An empty bar for `symbol` on `ts`, with every numeric field unset.
    #[must_use]
    pub fn empty(symbol: impl Into<String>, ts: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            ts,
            open: None,
            high: None,
            low: None,
            close: None,
            ltp: None,
            close_ltp_diff: None,
            close_ltp_diff_percent: None,
            vwap: None,
            volume: None,
            prev_close: None,
            turnover: None,
            transactions: None,
            diff: None,
            range: None,
            diff_percent: None,
            range_percent: None,
            vwap_percent: None,
            ma_120: None,
            ma_180: None,
            high_52w: None,
            low_52w: None,
        }
    }
}

/// Counts reported by a bulk upsert: rows newly created vs. rows overwritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertOutcome {
    /// Rows inserted because no `(symbol, date)` key existed.
    pub inserted: u64,
    /// Rows whose existing `(symbol, date)` key was overwritten.
    pub modified: u64,
}

impl UpsertOutcome {
    /// Accumulate another batch's counts into this one.
    pub fn absorb(&mut self, other: Self) {
        self.inserted += other.inserted;
        self.modified += other.modified;
    }
}

/// Lightweight most-recent-date projection of one symbol, used by the
/// comparison endpoint. Built from the archive store only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolSnapshot {
    /// Ticker symbol.
    pub symbol: String,
    /// Last traded price on the most recent archived date.
    pub price: Option<f64>,
    /// Day-over-day change, in percent.
    pub change_percent: Option<f64>,
    /// Traded volume on that date.
    pub volume: Option<f64>,
    /// 52-week high as of that date.
    pub high_52w: Option<f64>,
    /// 52-week low as of that date.
    pub low_52w: Option<f64>,
}

impl SymbolSnapshot {
    /// Project the snapshot fields out of a symbol's most recent bar.
    #[must_use]
    pub fn from_latest(bar: &DailyBar) -> Self {
        Self {
            symbol: bar.symbol.clone(),
            price: bar.ltp,
            change_percent: bar.diff_percent,
            volume: bar.volume,
            high_52w: bar.high_52w,
            low_52w: bar.low_52w,
        }
    }
}

use bazar_core::DailyBar;
use chrono::NaiveDate;
use sqlx::FromRow;

/// Column list shared by `archive_bars` and `live_bars`. `range` is quoted
/// because it doubles as a SQL keyword.
pub(crate) const COLUMNS: &str = "symbol, day, open, high, low, close, ltp, \
    close_ltp_diff, close_ltp_diff_percent, vwap, volume, prev_close, \
    turnover, transactions, diff, \"range\", diff_percent, range_percent, \
    vwap_percent, ma_120, ma_180, high_52w, low_52w";

/// One row of either bar table.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct BarRecord {
    pub symbol: String,
    pub day: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub ltp: Option<f64>,
    pub close_ltp_diff: Option<f64>,
    pub close_ltp_diff_percent: Option<f64>,
    pub vwap: Option<f64>,
    pub volume: Option<f64>,
    pub prev_close: Option<f64>,
    pub turnover: Option<f64>,
    pub transactions: Option<f64>,
    pub diff: Option<f64>,
    pub range: Option<f64>,
    pub diff_percent: Option<f64>,
    pub range_percent: Option<f64>,
    pub vwap_percent: Option<f64>,
    pub ma_120: Option<f64>,
    pub ma_180: Option<f64>,
    pub high_52w: Option<f64>,
    pub low_52w: Option<f64>,
}

impl BarRecord {
    pub(crate) fn into_bar(self) -> DailyBar {
        // The schema stores a plain date; time-of-day never survives a round
        // trip, which is exactly the uniqueness contract.
        let ts = self
            .day
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();
        let mut bar = DailyBar::empty(self.symbol, ts);
        bar.open = self.open;
        bar.high = self.high;
        bar.low = self.low;
        bar.close = self.close;
        bar.ltp = self.ltp;
        bar.close_ltp_diff = self.close_ltp_diff;
        bar.close_ltp_diff_percent = self.close_ltp_diff_percent;
        bar.vwap = self.vwap;
        bar.volume = self.volume;
        bar.prev_close = self.prev_close;
        bar.turnover = self.turnover;
        bar.transactions = self.transactions;
        bar.diff = self.diff;
        bar.range = self.range;
        bar.diff_percent = self.diff_percent;
        bar.range_percent = self.range_percent;
        bar.vwap_percent = self.vwap_percent;
        bar.ma_120 = self.ma_120;
        bar.ma_180 = self.ma_180;
        bar.high_52w = self.high_52w;
        bar.low_52w = self.low_52w;
        bar
    }
}

/// Per-column arrays for an UNNEST bulk write.
pub(crate) struct BarArrays {
    pub symbols: Vec<String>,
    pub days: Vec<NaiveDate>,
    pub opens: Vec<Option<f64>>,
    pub highs: Vec<Option<f64>>,
    pub lows: Vec<Option<f64>>,
    pub closes: Vec<Option<f64>>,
    pub ltps: Vec<Option<f64>>,
    pub close_ltp_diffs: Vec<Option<f64>>,
    pub close_ltp_diff_percents: Vec<Option<f64>>,
    pub vwaps: Vec<Option<f64>>,
    pub volumes: Vec<Option<f64>>,
    pub prev_closes: Vec<Option<f64>>,
    pub turnovers: Vec<Option<f64>>,
    pub transactions: Vec<Option<f64>>,
    pub diffs: Vec<Option<f64>>,
    pub ranges: Vec<Option<f64>>,
    pub diff_percents: Vec<Option<f64>>,
    pub range_percents: Vec<Option<f64>>,
    pub vwap_percents: Vec<Option<f64>>,
    pub ma_120s: Vec<Option<f64>>,
    pub ma_180s: Vec<Option<f64>>,
    pub high_52ws: Vec<Option<f64>>,
    pub low_52ws: Vec<Option<f64>>,
}

impl BarArrays {
    pub(crate) fn from_bars(bars: &[DailyBar]) -> Self {
        let mut arrays = Self {
            symbols: Vec::with_capacity(bars.len()),
            days: Vec::with_capacity(bars.len()),
            opens: Vec::with_capacity(bars.len()),
            highs: Vec::with_capacity(bars.len()),
            lows: Vec::with_capacity(bars.len()),
            closes: Vec::with_capacity(bars.len()),
            ltps: Vec::with_capacity(bars.len()),
            close_ltp_diffs: Vec::with_capacity(bars.len()),
            close_ltp_diff_percents: Vec::with_capacity(bars.len()),
            vwaps: Vec::with_capacity(bars.len()),
            volumes: Vec::with_capacity(bars.len()),
            prev_closes: Vec::with_capacity(bars.len()),
            turnovers: Vec::with_capacity(bars.len()),
            transactions: Vec::with_capacity(bars.len()),
            diffs: Vec::with_capacity(bars.len()),
            ranges: Vec::with_capacity(bars.len()),
            diff_percents: Vec::with_capacity(bars.len()),
            range_percents: Vec::with_capacity(bars.len()),
            vwap_percents: Vec::with_capacity(bars.len()),
            ma_120s: Vec::with_capacity(bars.len()),
            ma_180s: Vec::with_capacity(bars.len()),
            high_52ws: Vec::with_capacity(bars.len()),
            low_52ws: Vec::with_capacity(bars.len()),
        };
        for bar in bars {
            arrays.symbols.push(bar.symbol.clone());
            arrays.days.push(bar.date());
            arrays.opens.push(bar.open);
            arrays.highs.push(bar.high);
            arrays.lows.push(bar.low);
            arrays.closes.push(bar.close);
            arrays.ltps.push(bar.ltp);
            arrays.close_ltp_diffs.push(bar.close_ltp_diff);
            arrays.close_ltp_diff_percents.push(bar.close_ltp_diff_percent);
            arrays.vwaps.push(bar.vwap);
            arrays.volumes.push(bar.volume);
            arrays.prev_closes.push(bar.prev_close);
            arrays.turnovers.push(bar.turnover);
            arrays.transactions.push(bar.transactions);
            arrays.diffs.push(bar.diff);
            arrays.ranges.push(bar.range);
            arrays.diff_percents.push(bar.diff_percent);
            arrays.range_percents.push(bar.range_percent);
            arrays.vwap_percents.push(bar.vwap_percent);
            arrays.ma_120s.push(bar.ma_120);
            arrays.ma_180s.push(bar.ma_180);
            arrays.high_52ws.push(bar.high_52w);
            arrays.low_52ws.push(bar.low_52w);
        }
        arrays
    }
}

//! PostgreSQL-backed implementations of the bazar store traits.
//!
//! Two tables with identical shape back the two stores:
//!
//! ```sql
//! CREATE TABLE archive_bars (
//!     symbol                 TEXT NOT NULL,
//!     day                    DATE NOT NULL,
//!     open                   DOUBLE PRECISION,
//!     high                   DOUBLE PRECISION,
//!     low                    DOUBLE PRECISION,
//!     close                  DOUBLE PRECISION,
//!     ltp                    DOUBLE PRECISION,
//!     close_ltp_diff         DOUBLE PRECISION,
//!     close_ltp_diff_percent DOUBLE PRECISION,
//!     vwap                   DOUBLE PRECISION,
//!     volume                 DOUBLE PRECISION,
//!     prev_close             DOUBLE PRECISION,
//!     turnover               DOUBLE PRECISION,
//!     transactions           DOUBLE PRECISION,
//!     diff                   DOUBLE PRECISION,
//!     "range"                DOUBLE PRECISION,
//!     diff_percent           DOUBLE PRECISION,
//!     range_percent          DOUBLE PRECISION,
//!     vwap_percent           DOUBLE PRECISION,
//!     ma_120                 DOUBLE PRECISION,
//!     ma_180                 DOUBLE PRECISION,
//!     high_52w               DOUBLE PRECISION,
//!     low_52w                DOUBLE PRECISION,
//!     PRIMARY KEY (symbol, day)
//! );
//! -- live_bars: same columns, same primary key.
//! ```
//!
//! Storing the calendar date directly (rather than a timestamp) makes the
//! `(symbol, day)` uniqueness the engine relies on a database constraint, not
//! a convention. Timestamps are reconstructed as UTC midnight on read.
#![warn(missing_docs)]

mod archive;
mod live;
mod record;

pub use archive::PgArchiveStore;
pub use live::PgLiveStore;

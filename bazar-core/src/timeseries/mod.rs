//! Time-series utilities for daily bar series.

/// Merging and windowing of per-symbol daily series.
pub mod merge;

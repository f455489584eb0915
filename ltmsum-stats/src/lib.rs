#![warn(missing_docs)]
//! ltmsum Statistics
//!
//! Reduces raw performance-counter sample sequences to statistic sets:
//! - Gauge reduction (CPU load, active connections) after dropping the pre-roll sample
//! - Memory reduction in binary megabytes
//! - Throughput reduction from byte accumulators to Mb/s
//! - Count-rate reduction from connection accumulators to counts/s
//!
//! All reductions are pure functions of their inputs.

mod reduction;
mod summary;

pub use reduction::{
    BYTES_PER_MEGABIT, MEBIBYTE, MIN_GAUGE_SAMPLES, MIN_RATE_SAMPLES, SummarizeError,
    drop_pre_roll, interval_rates, summarize_counts, summarize_memory, summarize_raw,
    summarize_throughput,
};
pub use summary::StatisticSet;

// crates/qualreg-scenarios/src/metrics.rs
// ============================================================================
// Module: Latency Metrics
// Description: Percentile and histogram aggregation over request samples.
// Purpose: Turn captured samples into the figures the thresholds gate on.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Aggregation is deterministic: samples are sorted and percentiles use
//! the nearest-rank method, so the same samples always produce the same
//! figures. The histogram buckets mirror the suite's latency expectations
//! up to the 5s overflow bound.

use serde::Serialize;

use crate::client::RequestSample;

/// Histogram bucket upper bounds in milliseconds.
pub const LATENCY_BUCKETS_MS: [u64; 11] = [1, 5, 10, 25, 50, 100, 250, 500, 1000, 2500, 5000];

/// One histogram bucket.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBucket {
    /// Inclusive upper bound in milliseconds.
    pub upper_bound_ms: u64,
    /// Samples at or under the bound (and over the previous bound).
    pub count: usize,
}

/// Bucketed latency distribution.
#[derive(Debug, Clone, Serialize)]
pub struct LatencyHistogram {
    /// Buckets in ascending bound order.
    pub buckets: Vec<HistogramBucket>,
    /// Samples above the last bound.
    pub overflow_count: usize,
}

/// Aggregated latency figures for a set of samples.
#[derive(Debug, Clone, Serialize)]
pub struct LatencyStats {
    /// Number of samples aggregated.
    pub total_requests: usize,
    /// Minimum duration in milliseconds.
    pub min_ms: u64,
    /// Maximum duration in milliseconds.
    pub max_ms: u64,
    /// Mean duration in milliseconds.
    pub avg_ms: u64,
    /// Median duration in milliseconds.
    pub p50_ms: u64,
    /// 95th-percentile duration in milliseconds.
    pub p95_ms: u64,
    /// 99th-percentile duration in milliseconds.
    pub p99_ms: u64,
    /// Bucketed distribution.
    pub histogram: LatencyHistogram,
}

impl LatencyStats {
    /// Aggregates captured samples; an empty slice yields all-zero figures.
    #[must_use]
    pub fn from_samples(samples: &[RequestSample]) -> Self {
        let mut durations: Vec<u64> = samples.iter().map(|sample| sample.duration_ms).collect();
        durations.sort_unstable();
        let total_requests = durations.len();
        let histogram = build_histogram(&durations);
        if durations.is_empty() {
            return Self {
                total_requests,
                min_ms: 0,
                max_ms: 0,
                avg_ms: 0,
                p50_ms: 0,
                p95_ms: 0,
                p99_ms: 0,
                histogram,
            };
        }
        let sum: u64 = durations.iter().sum();
        let count = u64::try_from(total_requests).unwrap_or(u64::MAX);
        Self {
            total_requests,
            min_ms: durations[0],
            max_ms: durations[durations.len() - 1],
            avg_ms: sum / count,
            p50_ms: percentile(&durations, 50),
            p95_ms: percentile(&durations, 95),
            p99_ms: percentile(&durations, 99),
            histogram,
        }
    }
}

/// Nearest-rank percentile over sorted durations.
fn percentile(sorted: &[u64], pct: usize) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let rank = (sorted.len() * pct).div_ceil(100).max(1);
    sorted[rank - 1]
}

/// Buckets sorted durations into the fixed bounds.
fn build_histogram(sorted: &[u64]) -> LatencyHistogram {
    let mut buckets: Vec<HistogramBucket> = LATENCY_BUCKETS_MS
        .iter()
        .map(|bound| HistogramBucket {
            upper_bound_ms: *bound,
            count: 0,
        })
        .collect();
    let mut overflow_count = 0usize;
    for duration in sorted {
        let mut placed = false;
        for bucket in &mut buckets {
            if *duration <= bucket.upper_bound_ms {
                bucket.count = bucket.count.saturating_add(1);
                placed = true;
                break;
            }
        }
        if !placed {
            overflow_count = overflow_count.saturating_add(1);
        }
    }
    LatencyHistogram {
        buckets,
        overflow_count,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

//! Fetch metrics for the GitHub client.
//!
//! Counts upstream calls, cache hits and misses, rate-limit responses and
//! failures. Reported through the health endpoint.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for upstream fetch activity.
///
/// Each `GithubClient` owns one instance, shared behind an `Arc` by every
/// clone of the client.
#[derive(Debug, Default)]
pub struct FetchMetrics {
    /// Number of requests answered from the response cache
    cache_hits: AtomicUsize,

    /// Number of requests that had to go upstream
    cache_misses: AtomicUsize,

    /// Number of requests sent to GitHub
    upstream_calls: AtomicUsize,

    /// Number of 403 rate-limit responses
    rate_limited: AtomicUsize,

    /// Number of calls that ended in a `FetchError`
    failures: AtomicUsize,
}

impl FetchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_call(&self) {
        self.upstream_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rate_limited(&self) {
        self.rate_limited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn upstream_calls(&self) -> usize {
        self.upstream_calls.load(Ordering::Relaxed)
    }

    pub fn rate_limited(&self) -> usize {
        self.rate_limited.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Snapshot the counters with derived rates.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let lookups = hits + misses;
        let cache_hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        let calls = self.upstream_calls();
        let failures = self.failures();
        let rate_limited = self.rate_limited();
        let upstream_success_rate = if calls > 0 {
            (calls.saturating_sub(failures + rate_limited) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            upstream_calls: calls,
            rate_limited,
            failures,
            upstream_success_rate,
        }
    }
}

/// Point-in-time view of [`FetchMetrics`].
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub upstream_calls: usize,
    pub rate_limited: usize,
    pub failures: usize,

    /// Share of upstream calls that returned data, as a percentage (0-100)
    pub upstream_success_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_cache_hit() {
        let metrics = FetchMetrics::new();

        assert_eq!(metrics.cache_hits(), 0);
        metrics.record_cache_hit();
        assert_eq!(metrics.cache_hits(), 1);
        metrics.record_cache_hit();
        assert_eq!(metrics.cache_hits(), 2);
    }

    #[test]
    fn test_record_upstream_outcomes() {
        let metrics = FetchMetrics::new();

        metrics.record_upstream_call();
        metrics.record_rate_limited();
        metrics.record_failure();

        assert_eq!(metrics.upstream_calls(), 1);
        assert_eq!(metrics.rate_limited(), 1);
        assert_eq!(metrics.failures(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = FetchMetrics::new().report();

        assert_eq!(report.cache_hits, 0);
        assert_eq!(report.cache_hit_rate, 0.0);
        assert_eq!(report.upstream_calls, 0);
        assert_eq!(report.upstream_success_rate, 0.0);
    }

    #[test]
    fn test_report_cache_hit_rate() {
        let metrics = FetchMetrics::new();

        // 3 hits, 1 miss = 75% hit rate
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_miss();

        let report = metrics.report();
        assert_eq!(report.cache_hits, 3);
        assert_eq!(report.cache_misses, 1);
        assert_eq!(report.cache_hit_rate, 75.0);
    }

    #[test]
    fn test_report_upstream_success_rate() {
        let metrics = FetchMetrics::new();

        // 4 calls, 1 failure, 1 rate limited = 50% success rate
        for _ in 0..4 {
            metrics.record_upstream_call();
        }
        metrics.record_failure();
        metrics.record_rate_limited();

        let report = metrics.report();
        assert_eq!(report.upstream_calls, 4);
        assert_eq!(report.upstream_success_rate, 50.0);
    }

    #[test]
    fn test_failures_without_upstream_call_do_not_underflow() {
        let metrics = FetchMetrics::new();

        // Invalid usernames fail before any request is sent
        metrics.record_upstream_call();
        metrics.record_failure();
        metrics.record_failure();

        assert_eq!(metrics.report().upstream_success_rate, 0.0);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(FetchMetrics::new().report()).unwrap();
        assert_eq!(json["upstream_calls"], 0);
        assert!(json.get("cache_hit_rate").is_some());
    }
}

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use crate::endpoint::Endpoint;

#[derive(Debug, Default, Clone)]
struct EndpointStats {
    // milliseconds, only for requests that got a response
    samples_ms: Vec<f64>,
    requests: u64,
    errors: u64,
}

/// Point-in-time copy of one endpoint's counters.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointSummary {
    pub endpoint: Endpoint,
    pub requests: u64,
    pub errors: u64,
    pub p50_ms: f64,
    pub p95_ms: f64,
}

impl EndpointSummary {
    pub fn error_rate(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.errors as f64 / self.requests as f64
        }
    }
}

/// Concurrent per-endpoint metrics sink shared by all virtual users.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    stats: Arc<DashMap<Endpoint, EndpointStats>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A request that produced a response; `ok` says whether the status matched.
    pub fn record(&self, endpoint: Endpoint, elapsed: Duration, ok: bool) {
        let mut entry = self.stats.entry(endpoint).or_default();
        entry.samples_ms.push(elapsed.as_secs_f64() * 1000.0);
        entry.requests += 1;
        if !ok {
            entry.errors += 1;
        }
    }

    /// A request that never got a response (connect failure, timeout).
    pub fn record_failure(&self, endpoint: Endpoint) {
        let mut entry = self.stats.entry(endpoint).or_default();
        entry.requests += 1;
        entry.errors += 1;
    }

    pub fn total_requests(&self) -> u64 {
        self.stats.iter().map(|e| e.requests).sum()
    }

    pub fn summary(&self, endpoint: Endpoint) -> EndpointSummary {
        let (mut samples, requests, errors) = match self.stats.get(&endpoint) {
            Some(s) => (s.samples_ms.clone(), s.requests, s.errors),
            None => (Vec::new(), 0, 0),
        };
        samples.sort_by(f64::total_cmp);
        EndpointSummary {
            endpoint,
            requests,
            errors,
            p50_ms: percentile(&samples, 50.0),
            p95_ms: percentile(&samples, 95.0),
        }
    }
}

/// Nearest-rank percentile over an ascending slice; 0 when empty.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = ((pct / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_nearest_rank() {
        let data: Vec<f64> = (1..=100).map(f64::from).collect();
        assert_eq!(percentile(&data, 50.0), 50.0);
        assert_eq!(percentile(&data, 95.0), 95.0);
        assert_eq!(percentile(&data, 100.0), 100.0);
        assert_eq!(percentile(&data, 0.0), 1.0);
        assert_eq!(percentile(&[7.0], 95.0), 7.0);
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn summary_counts_errors_and_latency() {
        let rec = Recorder::new();
        for ms in [4, 1, 3, 2] {
            rec.record(Endpoint::Detail, Duration::from_millis(ms), true);
        }
        rec.record(Endpoint::Detail, Duration::from_millis(10), false);
        rec.record_failure(Endpoint::Detail);

        let s = rec.summary(Endpoint::Detail);
        assert_eq!(s.requests, 6);
        assert_eq!(s.errors, 2);
        assert!((s.error_rate() - 2.0 / 6.0).abs() < 1e-9);
        assert!((s.p50_ms - 3.0).abs() < 1e-9);
        assert!((s.p95_ms - 10.0).abs() < 1e-9);
        assert_eq!(rec.total_requests(), 6);
    }

    #[test]
    fn untouched_endpoint_is_zeroed() {
        let s = Recorder::new().summary(Endpoint::Delete);
        assert_eq!(s.requests, 0);
        assert_eq!(s.error_rate(), 0.0);
        assert_eq!(s.p95_ms, 0.0);
    }

    #[test]
    fn clones_share_state() {
        let rec = Recorder::new();
        let other = rec.clone();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let r = other.clone();
                scope.spawn(move || {
                    for _ in 0..250 {
                        r.record(Endpoint::List, Duration::from_micros(500), true);
                    }
                });
            }
        });
        assert_eq!(rec.summary(Endpoint::List).requests, 1000);
    }
}

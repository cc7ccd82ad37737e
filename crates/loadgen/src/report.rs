use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::error::LoadgenError;
use crate::recorder::Recorder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Latency {
    pub labels: Vec<String>,
    pub p50: Vec<f64>,
    pub p95: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Throughput {
    pub labels: Vec<String>,
    pub rps: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRate {
    pub labels: Vec<String>,
    pub rate: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub vus: usize,
    pub duration: String,
    pub endpoints: Vec<String>,
}

/// Summary file consumed by the results site; field names are part of its format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResults {
    pub latency: Latency,
    pub throughput: Throughput,
    pub error_rate: ErrorRate,
    pub environment: Environment,
}

/// `90s` → `1m30s`, whole minutes print as `9m`.
pub fn duration_label(secs: u64) -> String {
    match (secs / 60, secs % 60) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}m"),
        (m, s) => format!("{m}m{s}s"),
    }
}

impl BenchmarkResults {
    /// Build the summary; `elapsed_secs` is the wall-clock run time used for rps.
    pub fn from_recorder(recorder: &Recorder, elapsed_secs: f64, vus: usize, duration_secs: u64) -> Self {
        let labels: Vec<String> = Endpoint::ALL.iter().map(|e| e.label().to_string()).collect();
        let summaries: Vec<_> = Endpoint::ALL.iter().map(|e| recorder.summary(*e)).collect();
        let rps = |count: u64| if elapsed_secs > 0.0 { count as f64 / elapsed_secs } else { 0.0 };

        Self {
            latency: Latency {
                labels: labels.clone(),
                p50: summaries.iter().map(|s| s.p50_ms).collect(),
                p95: summaries.iter().map(|s| s.p95_ms).collect(),
            },
            throughput: Throughput {
                labels: labels.clone(),
                rps: summaries.iter().map(|s| rps(s.requests)).collect(),
            },
            error_rate: ErrorRate {
                labels: labels.clone(),
                rate: summaries.iter().map(|s| s.error_rate()).collect(),
            },
            environment: Environment { vus, duration: duration_label(duration_secs), endpoints: labels },
        }
    }

    pub async fn write_to(&self, path: &str) -> Result<(), LoadgenError> {
        let data = serde_json::to_vec_pretty(self)
            .map_err(|e| LoadgenError::Report { path: path.to_string(), source: e.into() })?;
        tokio::fs::write(path, data)
            .await
            .map_err(|source| LoadgenError::Report { path: path.to_string(), source })
    }
}

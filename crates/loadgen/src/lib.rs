//! Load driver for the item service.
//!
//! Reproduces the reference benchmark scenario: every virtual user loops over
//! create → detail → update → delete on a fresh item followed by a list call,
//! while the recorder collects per-endpoint latency, throughput and error rate.
//! The summary is written as `benchmark_results.json`.

pub mod endpoint;
pub mod error;
pub mod recorder;
pub mod report;
pub mod runner;
pub mod scenario;

pub use endpoint::Endpoint;
pub use error::LoadgenError;
pub use recorder::Recorder;
pub use report::BenchmarkResults;
pub use runner::run;

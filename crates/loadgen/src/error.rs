use thiserror::Error;

use crate::endpoint::Endpoint;

#[derive(Debug, Error)]
pub enum LoadgenError {
    #[error("cannot build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("{endpoint}: request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint}: unexpected status {status}, expected {expected}")]
    UnexpectedStatus {
        endpoint: Endpoint,
        status: u16,
        expected: u16,
    },
    #[error("create: response carried no item id")]
    MissingId,
    #[error("cannot write report to {path}: {source}")]
    Report {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

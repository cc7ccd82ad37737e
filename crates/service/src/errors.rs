use thiserror::Error;

/// Failures raised by the item store.
///
/// Malformed ids and bodies are rejected by the transport layer before a call
/// ever reaches the store, so a missing record is the only condition left.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("item {0} not found")]
    NotFound(i64),
}

impl ServiceError {
    pub fn not_found(id: i64) -> Self { Self::NotFound(id) }

    /// Identifier the failing operation referenced.
    pub fn id(&self) -> i64 {
        match self {
            Self::NotFound(id) => *id,
        }
    }
}

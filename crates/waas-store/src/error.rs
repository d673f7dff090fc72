//! Storage Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage errors
///
/// Callers on the subscribe path treat `Unavailable` as degraded-but-
/// non-fatal: the payment flow continues without a persisted record.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store is unreachable or misconfigured
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

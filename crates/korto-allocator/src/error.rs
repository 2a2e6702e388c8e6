use korto_core::StorageError;
use thiserror::Error;

/// Result type for allocation operations.
pub type Result<T> = std::result::Result<T, AllocError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AllocError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    /// No free or matching code within the probe bound; the store is close
    /// to saturation for this URL's sequence.
    #[error("no free short code after {probes} probes")]
    ProbeExhausted { probes: usize },
    #[error("commit failed after {attempts} attempts: {source}")]
    CommitFailed {
        attempts: usize,
        #[source]
        source: StorageError,
    },
}

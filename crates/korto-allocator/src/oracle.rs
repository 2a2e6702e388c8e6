use korto_core::repository::Result;
use korto_core::{ReadRepository, ShortCode, ShortUrlRecord, StorageError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// What the durable store holds under a candidate code.
#[derive(Debug, Clone, PartialEq)]
pub enum Existence {
    /// No record uses the code.
    Absent,
    /// The code already maps to the URL being allocated.
    SameUrl(ShortUrlRecord),
    /// The code maps to a different URL.
    Collision(ShortUrlRecord),
}

/// Classifies candidate codes against the durable store.
#[derive(Debug)]
pub struct ExistenceOracle<R> {
    repository: Arc<R>,
    timeout: Option<Duration>,
}

impl<R> Clone for ExistenceOracle<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            timeout: self.timeout,
        }
    }
}

impl<R: ReadRepository> ExistenceOracle<R> {
    pub fn new(repository: Arc<R>, timeout: Option<Duration>) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    /// Looks `code` up and compares the stored URL with `long_url`.
    ///
    /// A missing record is [`Existence::Absent`]; store failures are returned
    /// as-is and never retried here.
    pub async fn check(&self, code: &ShortCode, long_url: &str) -> Result<Existence> {
        let found = with_timeout(self.timeout, "get", self.repository.get(code)).await?;

        let existence = match found {
            None => Existence::Absent,
            Some(record) if record.long_url == long_url => Existence::SameUrl(record),
            Some(record) => Existence::Collision(record),
        };

        trace!(code = %code, existence = ?existence, "checked candidate");
        Ok(existence)
    }
}

/// Bounds a store call by `timeout`, mapping an elapsed deadline to
/// [`StorageError::Timeout`].
pub(crate) async fn with_timeout<T, F>(
    timeout: Option<Duration>,
    operation: &str,
    fut: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout {
        None => fut.await,
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
            StorageError::Timeout(format!("{operation} exceeded {}ms", limit.as_millis()))
        })?,
    }
}

use crate::error::StorageError;
use crate::record::ShortUrlRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Type alias for repository results.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of the durable store.
///
/// This trait provides only the read operations from [`Repository`],
/// allowing the redirector to have read-only access.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record for a given short code.
    ///
    /// Returns `Ok(None)` if the code does not exist. Every other failure is
    /// reported as a [`StorageError`].
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortUrlRecord>>;
}

/// The durable store the allocator commits into.
///
/// `insert` must be create-only: it is the sole arbiter between concurrent
/// allocations, so an implementation that silently overwrites breaks the
/// commit protocol.
#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new record. Returns `Err(Conflict)` if the code already exists.
    async fn insert(&self, record: &ShortUrlRecord) -> Result<()>;
}

#[async_trait]
impl<T: ReadRepository + ?Sized> ReadRepository for std::sync::Arc<T> {
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortUrlRecord>> {
        (**self).get(code).await
    }
}

#[async_trait]
impl<T: Repository + ?Sized> Repository for std::sync::Arc<T> {
    async fn insert(&self, record: &ShortUrlRecord) -> Result<()> {
        (**self).insert(record).await
    }
}

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use korto_core::repository::{ReadRepository, Repository, Result};
use korto_core::{ShortCode, ShortUrlRecord, StorageError};
use tracing::trace;

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Inserts go through the entry API so the
/// existence check and the write happen under the same shard lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<ShortCode, ShortUrlRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortUrlRecord>> {
        Ok(self.storage.get(code).map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, record: &ShortUrlRecord) -> Result<()> {
        match self.storage.entry(record.id.clone()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(record.id.to_string())),
            Entry::Vacant(slot) => {
                trace!(code = %record.id, "inserting record");
                slot.insert(record.clone());
                Ok(())
            }
        }
    }
}

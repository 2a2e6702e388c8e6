use crate::config::AllocatorConfig;
use crate::error::{AllocError, Result};
use crate::oracle::with_timeout;
use crate::resolver::{CollisionResolver, Resolution};
use korto_core::{Repository, ShortCode, ShortUrlRecord, StorageError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of a successful commit.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    /// The URL was already stored; nothing was written.
    Existing(ShortUrlRecord),
    /// A new record was written under this code.
    Committed(ShortCode),
}

impl Commit {
    /// The short code the URL is reachable under.
    pub fn code(&self) -> &ShortCode {
        match self {
            Commit::Existing(record) => &record.id,
            Commit::Committed(code) => code,
        }
    }
}

/// Allocates short codes and records them in the durable store.
///
/// Each attempt resolves a code and then tries a create-only insert. When
/// the insert fails (typically because a concurrent writer claimed the same
/// code) the attempt is spent and the next one resolves again, which moves
/// past the now occupied slot. No in-process lock is taken; the store's
/// create-only insert decides every race.
#[derive(Debug)]
pub struct Committer<R> {
    repository: Arc<R>,
    resolver: CollisionResolver<R>,
    attempts: usize,
    store_timeout: Option<Duration>,
}

impl<R> Clone for Committer<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            resolver: self.resolver.clone(),
            attempts: self.attempts,
            store_timeout: self.store_timeout,
        }
    }
}

impl<R: Repository> Committer<R> {
    pub fn new(repository: R, config: AllocatorConfig) -> Self {
        Self::from_shared(Arc::new(repository), config)
    }

    /// Creates a committer over a repository that is shared with other
    /// components.
    pub fn from_shared(repository: Arc<R>, config: AllocatorConfig) -> Self {
        Self {
            resolver: CollisionResolver::new(Arc::clone(&repository), &config),
            repository,
            attempts: config.commit_attempts.max(1),
            store_timeout: config.store_timeout,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns the short code for `long_url`, committing a new record if the
    /// URL has none yet.
    ///
    /// # Errors
    ///
    /// * [`AllocError::InvalidUrl`] if `long_url` is empty
    /// * [`AllocError::Storage`] if looking up a candidate fails
    /// * [`AllocError::ProbeExhausted`] if no free code is within the probe bound
    /// * [`AllocError::CommitFailed`] once every attempt's write has failed,
    ///   carrying the last write error
    pub async fn commit(&self, long_url: &str) -> Result<Commit> {
        if long_url.is_empty() {
            return Err(AllocError::InvalidUrl("url cannot be empty".to_string()));
        }

        let mut last_error = None;

        for attempt in 1..=self.attempts {
            let code = match self.resolver.resolve(long_url).await? {
                Resolution::Existing(record) => {
                    debug!(code = %record.id, attempt, "reusing existing short code");
                    return Ok(Commit::Existing(record));
                }
                Resolution::Free(code) => code,
            };

            let record = ShortUrlRecord::new(code.clone(), long_url);
            let written =
                with_timeout(self.store_timeout, "insert", self.repository.insert(&record)).await;
            match written {
                Ok(()) => {
                    info!(code = %code, attempt, "committed short code");
                    return Ok(Commit::Committed(code));
                }
                Err(e) => {
                    warn!(code = %code, attempt, error = %e, "failed to commit short code");
                    last_error = Some(e);
                }
            }
        }

        Err(AllocError::CommitFailed {
            attempts: self.attempts,
            source: last_error.unwrap_or_else(|| {
                StorageError::Operation("no commit attempt was made".to_string())
            }),
        })
    }
}

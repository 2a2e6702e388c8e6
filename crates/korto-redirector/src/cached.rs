use korto_core::cache::Result as CacheResult;
use korto_core::repository::Result;
use korto_core::{ReadRepository, ShortCode, UrlCache};
use tracing::{debug, trace, warn};

/// A read-only repository decorator that adds cache-aside lookups.
///
/// Lookups check the cache first and fall back to the inner repository.
/// Successful reads from the inner repository are written back to the
/// cache. The inner repository stays authoritative: cache failures only
/// cost latency and are never reported to the caller of
/// [`get_long_url`](Self::get_long_url).
#[derive(Debug, Clone)]
pub struct CachedRepository<R, C> {
    inner: R,
    cache: C,
}

impl<R: ReadRepository, C: UrlCache> CachedRepository<R, C> {
    pub fn new(inner: R, cache: C) -> Self {
        Self { inner, cache }
    }

    /// Returns a reference to the inner repository.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Returns a reference to the cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Resolves `code` to its long URL.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(url))` - from the cache, or from the repository on a miss
    /// * `Ok(None)` - if neither the cache nor the repository knows the code
    /// * `Err(e)` - if the repository lookup fails
    pub async fn get_long_url(&self, code: &ShortCode) -> Result<Option<String>> {
        match self.cache.get_url(code).await {
            Ok(Some(long_url)) if !long_url.is_empty() => {
                trace!(code = %code, "Serving url from cache");
                return Ok(Some(long_url));
            }
            Ok(Some(_)) => {
                warn!(code = %code, "Ignoring empty cached url");
            }
            Ok(None) => {
                trace!(code = %code, "Cache miss, fetching from inner repository");
            }
            Err(e) => {
                warn!(
                    code = %code,
                    error = %e,
                    "Cache error on get, falling back to inner repository"
                );
            }
        }

        let Some(record) = self.inner.get(code).await? else {
            debug!(code = %code, "Short code not found");
            return Ok(None);
        };

        if let Err(e) = self.cache.set_url(code, &record.long_url).await {
            warn!(code = %code, error = %e, "Failed to backfill cache");
        }

        Ok(Some(record.long_url))
    }

    /// Caches `long_url` under `code` unless a non-empty value is already
    /// cached. Returns `true` if the cache was written.
    pub async fn put_cached(&self, code: &ShortCode, long_url: &str) -> CacheResult<bool> {
        self.cache.set_url_if_absent(code, long_url).await
    }

    /// Caches `long_url` under `code`, replacing any cached value.
    pub async fn force_put_cached(&self, code: &ShortCode, long_url: &str) -> CacheResult<()> {
        self.cache.set_url(code, long_url).await
    }
}

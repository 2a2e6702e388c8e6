use crate::error::CacheError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Type alias for cache results.
pub type Result<T> = std::result::Result<T, CacheError>;

/// A cache mapping short codes to long URLs.
///
/// The cache is a disposable projection of the durable store: it may be
/// flushed at any time without affecting correctness.
#[async_trait]
pub trait UrlCache: Send + Sync + 'static {
    /// Get the long URL cached for `code`.
    ///
    /// Returns `Ok(None)` if the key is absent. A present key is returned as
    /// stored, even when the stored value is empty.
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Store `long_url` under `code`, overwriting any existing value.
    async fn set_url(&self, code: &ShortCode, long_url: &str) -> Result<()>;

    /// Store `long_url` under `code` unless the key already holds a
    /// non-empty value.
    ///
    /// Returns `true` if a write happened.
    async fn set_url_if_absent(&self, code: &ShortCode, long_url: &str) -> Result<bool> {
        match self.get_url(code).await? {
            Some(existing) if !existing.is_empty() => Ok(false),
            _ => {
                self.set_url(code, long_url).await?;
                Ok(true)
            }
        }
    }
}

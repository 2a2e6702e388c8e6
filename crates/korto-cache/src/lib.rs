//! [`UrlCache`] implementations for korto.
//!
//! Both caches store the long URL as a plain string keyed by short code.

pub mod moka;
pub mod redis;

pub use self::moka::{CacheConfig, MokaUrlCache};
pub use self::redis::RedisUrlCache;
pub use korto_core::{CacheError, UrlCache};

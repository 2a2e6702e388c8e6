//! Short code resolution with a cache in front of the durable store.
//!
//! ```rust
//! use korto_cache::MokaUrlCache;
//! use korto_core::ShortCode;
//! use korto_redirector::CachedRepository;
//! use korto_storage::InMemoryRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cached = CachedRepository::new(InMemoryRepository::new(), MokaUrlCache::new());
//!
//! let code = ShortCode::new("vNnegmwpMBk")?;
//! if let Some(url) = cached.get_long_url(&code).await? {
//!     println!("Redirect to: {url}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cached;

pub use cached::CachedRepository;

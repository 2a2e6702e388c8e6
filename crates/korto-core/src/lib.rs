//! Core types and traits for the korto URL shortener.
//!
//! This crate provides the types shared by the allocator, the storage and
//! cache adapters, and the redirector.

pub mod cache;
pub mod error;
pub mod record;
pub mod repository;
pub mod shortcode;

pub use cache::UrlCache;
pub use error::{CacheError, CoreError, StorageError};
pub use record::ShortUrlRecord;
pub use repository::{ReadRepository, Repository};
pub use shortcode::{ShortCode, SHORT_CODE_LEN};

//! Short code allocation for korto.
//!
//! A long URL seeds a deterministic [`ProbeSequence`]. Each candidate is
//! encoded into a [`ShortCode`](korto_core::ShortCode) and checked against the
//! durable store by the [`ExistenceOracle`]. The [`CollisionResolver`] walks
//! the sequence until it finds the URL's existing record or a free slot, and
//! the [`Committer`] writes new records with a bounded number of retries.
//!
//! ```rust,no_run
//! use korto_allocator::{AllocatorConfig, Commit, Committer};
//! use korto_storage::InMemoryRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let committer = Committer::new(InMemoryRepository::new(), AllocatorConfig::default());
//!
//! match committer.commit("www.google.com").await? {
//!     Commit::Committed(code) => println!("new code: {code}"),
//!     Commit::Existing(record) => println!("already known: {}", record.id),
//! }
//! # Ok(())
//! # }
//! ```

pub mod commit;
pub mod config;
pub mod encode;
pub mod error;
pub mod oracle;
pub mod probe;
pub mod resolver;

pub use commit::{Commit, Committer};
pub use config::AllocatorConfig;
pub use encode::{encode, encode_candidate};
pub use error::{AllocError, Result};
pub use oracle::{Existence, ExistenceOracle};
pub use probe::{checksum64, ProbeCandidate, ProbeSequence};
pub use resolver::{CollisionResolver, Resolution};

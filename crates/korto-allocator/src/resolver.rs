use crate::config::AllocatorConfig;
use crate::encode::encode_candidate;
use crate::error::{AllocError, Result};
use crate::oracle::{Existence, ExistenceOracle};
use crate::probe::ProbeSequence;
use korto_core::{ReadRepository, ShortCode, ShortUrlRecord};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of walking a URL's probe sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The URL is already stored under this record.
    Existing(ShortUrlRecord),
    /// The first unused code in the sequence.
    Free(ShortCode),
}

/// Walks the probe sequence of a URL through the [`ExistenceOracle`].
///
/// Probes are checked strictly in order and the walk stops at the first
/// candidate that is either free or already holds the URL. A free slot wins
/// even if a matching record sits further down the sequence.
#[derive(Debug)]
pub struct CollisionResolver<R> {
    oracle: ExistenceOracle<R>,
    max_probes: usize,
}

impl<R> Clone for CollisionResolver<R> {
    fn clone(&self) -> Self {
        Self {
            oracle: self.oracle.clone(),
            max_probes: self.max_probes,
        }
    }
}

impl<R: ReadRepository> CollisionResolver<R> {
    pub fn new(repository: Arc<R>, config: &AllocatorConfig) -> Self {
        Self {
            oracle: ExistenceOracle::new(repository, config.store_timeout),
            max_probes: config.max_probes.max(1),
        }
    }

    pub async fn resolve(&self, long_url: &str) -> Result<Resolution> {
        let probes = ProbeSequence::new(long_url).take(self.max_probes);

        for (probe, candidate) in probes.enumerate() {
            let code = encode_candidate(&candidate);

            match self.oracle.check(&code, long_url).await? {
                Existence::Absent => {
                    debug!(code = %code, probe, "found free short code");
                    return Ok(Resolution::Free(code));
                }
                Existence::SameUrl(record) => {
                    debug!(code = %code, probe, "url already has a short code");
                    return Ok(Resolution::Existing(record));
                }
                Existence::Collision(record) => {
                    debug!(
                        code = %code,
                        probe,
                        occupied_by = %record.long_url,
                        "short code collision, trying next candidate"
                    );
                }
            }
        }

        warn!(probes = self.max_probes, "probe sequence exhausted");
        Err(AllocError::ProbeExhausted {
            probes: self.max_probes,
        })
    }
}

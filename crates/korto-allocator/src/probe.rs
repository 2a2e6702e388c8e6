//! Deterministic probe sequence seeded by a long URL.
//!
//! The sequence is defined as
//!
//! ```text
//! s_0 = crc64(long_url)
//! s_i = (s_{i-1} + 1) mod 2^64
//! ```
//!
//! `s_0` is the CRC-64/GO-ISO checksum laid out as 8 little-endian bytes.
//! The increment reads those 8 bytes as a big-endian integer and writes the
//! result back big-endian, which reproduces the codes earlier deployments
//! issued for most URLs. Candidates always keep all 8 bytes, leading zeros
//! included, so every code is 11 characters. This deliberately differs from
//! those deployments when the checksum's low bytes are zero: they trimmed
//! the leading zero bytes and issued a shorter code (`"u0"` hashes to
//! `0x42b9e00000000000` and came out as `4LlC`).

use crc::{Crc, CRC_64_GO_ISO};

/// Width of a probe candidate in bytes.
pub const CANDIDATE_WIDTH: usize = 8;

const CRC64: Crc<u64> = Crc::<u64>::new(&CRC_64_GO_ISO);

/// 64-bit checksum of `bytes` (CRC-64 with the ISO polynomial).
pub fn checksum64(bytes: &[u8]) -> u64 {
    CRC64.checksum(bytes)
}

/// One candidate of a [`ProbeSequence`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProbeCandidate([u8; CANDIDATE_WIDTH]);

impl ProbeCandidate {
    fn from_value(value: u64) -> Self {
        Self(value.to_be_bytes())
    }

    /// The candidate read as a big-endian integer.
    pub fn value(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; CANDIDATE_WIDTH] {
        self.0
    }
}

impl std::fmt::Debug for ProbeCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProbeCandidate({:#018x})", self.value())
    }
}

/// An infinite, restartable sequence of probe candidates.
///
/// The sequence never ends: [`Iterator::next`] always returns `Some`, so
/// consumers bound the number of pulls themselves.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    seed: u64,
    offset: u64,
}

impl ProbeSequence {
    /// Creates the sequence seeded by `long_url`.
    pub fn new(long_url: impl AsRef<[u8]>) -> Self {
        let checksum = checksum64(long_url.as_ref());
        Self::from_seed(u64::from_be_bytes(checksum.to_le_bytes()))
    }

    /// Creates a sequence whose first candidate is `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self { seed, offset: 0 }
    }

    /// Number of candidates produced since the start.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the next candidate and advances the sequence.
    pub fn next_candidate(&mut self) -> ProbeCandidate {
        let candidate = ProbeCandidate::from_value(self.seed.wrapping_add(self.offset));
        self.offset = self.offset.wrapping_add(1);
        candidate
    }

    /// Rewinds the sequence to `s_0`.
    pub fn restart(&mut self) {
        self.offset = 0;
    }
}

impl Iterator for ProbeSequence {
    type Item = ProbeCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_candidate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn checksum_matches_catalog_check_value() {
        assert_eq!(checksum64(b"123456789"), 0xB909_56C7_75A4_1001);
    }

    #[test]
    fn first_candidate_is_little_endian_checksum() {
        let mut seq = ProbeSequence::new("www.google.com");
        let first = seq.next_candidate();

        assert_eq!(checksum64(b"www.google.com"), 0x1930_296C_82DE_D9BC);
        assert_eq!(
            first.into_bytes(),
            checksum64(b"www.google.com").to_le_bytes()
        );
    }

    #[test]
    fn successors_increment_big_endian() {
        let mut seq = ProbeSequence::new("www.google.com");

        assert_eq!(seq.next_candidate().value(), 0xBCD9_DE82_6C29_3019);
        assert_eq!(seq.next_candidate().value(), 0xBCD9_DE82_6C29_301A);
        assert_eq!(seq.next_candidate().value(), 0xBCD9_DE82_6C29_301B);
        assert_eq!(seq.offset(), 3);
    }

    #[test]
    fn wraps_around_modulo_2_pow_64() {
        let mut seq = ProbeSequence::from_seed(u64::MAX);

        assert_eq!(seq.next_candidate().into_bytes(), [0xFF; CANDIDATE_WIDTH]);
        let wrapped = seq.next_candidate();
        assert_eq!(wrapped.into_bytes(), [0; CANDIDATE_WIDTH]);
        assert_eq!(wrapped.as_bytes().len(), CANDIDATE_WIDTH);
    }

    #[test]
    fn restart_rewinds_to_first_candidate() {
        let mut seq = ProbeSequence::new("www.google.com");
        let first: Vec<_> = seq.by_ref().take(4).collect();

        seq.restart();
        let again: Vec<_> = seq.take(4).collect();

        assert_eq!(first, again);
    }

    #[test]
    fn first_five_candidates_are_distinct() {
        let keys: Vec<_> = ProbeSequence::new("1234567890789456123").take(5).collect();

        for (i, key) in keys.iter().enumerate() {
            for previous in &keys[..i] {
                assert_ne!(previous, key);
            }
        }
    }

    proptest! {
        #[test]
        fn same_url_yields_same_sequence(url in ".+") {
            let a: Vec<_> = ProbeSequence::new(&url).take(16).collect();
            let b: Vec<_> = ProbeSequence::new(&url).take(16).collect();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn consecutive_candidates_differ(url in ".+") {
            let window: Vec<_> = ProbeSequence::new(&url).take(32).collect();

            for pair in window.windows(2) {
                prop_assert_ne!(pair[0], pair[1]);
            }

            let distinct: HashSet<_> = window.iter().collect();
            prop_assert_eq!(distinct.len(), window.len());
        }
    }
}

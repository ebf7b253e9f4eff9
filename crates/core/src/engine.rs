//! Nonce search and verification over prefix + hex-nonce challenges.

use std::time::{Duration, Instant};

use num_bigint::BigUint;

use crate::difficulty::meets_difficulty;
use crate::digest::challenge_digest;
use crate::error::Error;
use crate::params::DIGEST_BITS;

/// A solved challenge, with the diagnostics gathered during the search.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Winning nonce: lowercase hex, no prefix, no padding.
    pub nonce: String,
    /// Hex digest of `prefix + nonce`.
    pub digest: String,
    /// Digests computed before the match.
    pub attempts: u64,
    /// Wall-clock search time.
    pub elapsed: Duration,
}

/// One entry of the candidate stream.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Nonce as lowercase hex.
    pub nonce: String,
    /// Digest of `prefix + nonce`.
    pub digest: String,
}

/// Lazy, infinite stream of (nonce, digest) candidates for a prefix.
///
/// Restartable from any offset with any stride, so the same stream drives
/// both the sequential search and each worker of a partitioned one. The
/// counter is arbitrary precision: the stream never wraps, whatever the
/// difficulty asks of it.
pub struct Candidates<'a> {
    prefix: &'a str,
    next: BigUint,
    stride: BigUint,
}

impl<'a> Candidates<'a> {
    /// Stream starting at nonce 0 with stride 1.
    pub fn new(prefix: &'a str) -> Self {
        Self::with_offset(prefix, 0, 1)
    }

    /// Stream starting at `start`, stepping by `stride`.
    ///
    /// # Panics
    ///
    /// Panics if `stride` is zero.
    pub fn with_offset(prefix: &'a str, start: u64, stride: u64) -> Self {
        assert!(stride > 0, "stride must be positive");
        Self {
            prefix,
            next: BigUint::from(start),
            stride: BigUint::from(stride),
        }
    }
}

impl Iterator for Candidates<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        let nonce = self.next.to_str_radix(16);
        let digest = challenge_digest(self.prefix, &nonce);
        self.next += &self.stride;
        Some(Candidate { nonce, digest })
    }
}

/// Verify that `nonce_hex` solves the challenge.
///
/// The nonce must be the literal hex text that gets hashed after the
/// prefix. Non-hexadecimal input is rejected with [`Error::InvalidNonce`].
pub fn verify(prefix: &str, difficulty: u32, nonce_hex: &str) -> Result<bool, Error> {
    if nonce_hex.is_empty() || !nonce_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidNonce(nonce_hex.to_string()));
    }
    meets_difficulty(&challenge_digest(prefix, nonce_hex), difficulty)
}

/// Search for the smallest nonce whose digest has `difficulty` leading
/// zero bits.
///
/// Runs on the calling thread and does not return until a match is found;
/// expected work is `2^difficulty` digests. The search is deterministic:
/// it counts up from zero, so equal inputs always yield the same nonce.
pub fn prove(prefix: &str, difficulty: u32) -> Result<Solution, Error> {
    if difficulty > DIGEST_BITS {
        return Err(Error::DifficultyOutOfRange {
            difficulty,
            limit: DIGEST_BITS,
        });
    }

    let start = Instant::now();
    let mut attempts: u64 = 0;
    for candidate in Candidates::new(prefix) {
        attempts += 1;
        if meets_difficulty(&candidate.digest, difficulty)? {
            return Ok(Solution {
                nonce: candidate.nonce,
                digest: candidate.digest,
                attempts,
                elapsed: start.elapsed(),
            });
        }
    }
    unreachable!("candidate stream is infinite")
}

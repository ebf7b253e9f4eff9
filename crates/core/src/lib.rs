//! # HashCash Proof-of-Work Core
//!
//! A HashCash-style partial-preimage puzzle over SHA-1: find a nonce such
//! that the digest of `prefix + nonce` starts with a required number of
//! zero bits.
//!
//! The challenge text is plain string concatenation — the service prefix
//! followed by the nonce's lowercase hex encoding — so proofs interoperate
//! with any implementation that hashes the same bytes.
//!
//! ## Example
//!
//! ```rust
//! use hashcash_core::{prove, verify};
//!
//! // Expected work doubles with every difficulty bit
//! let solution = prove("test", 8).unwrap();
//!
//! assert!(verify("test", 8, &solution.nonce).unwrap());
//! ```
//!
//! For long searches, [`Search`] partitions the nonce space across worker
//! threads and supports cooperative cancellation via [`CancelToken`].

mod difficulty;
mod digest;
mod engine;
mod error;
mod params;
mod search;

pub use difficulty::meets_difficulty;
pub use digest::{challenge_digest, sha1_hex};
pub use engine::{prove, verify, Candidate, Candidates, Solution};
pub use error::Error;
pub use params::*;
pub use search::{CancelToken, Progress, Search};

#[cfg(test)]
mod tests;

//! The fixed digest primitive.
//!
//! SHA-1 is the one hash algorithm of this system. Its output is always
//! rendered as 40 lowercase hex characters, so a conforming verifier in
//! any language sees the same digest text for the same input bytes.

use sha1::{Digest, Sha1};

/// Hex-encoded SHA-1 of `input`.
#[inline]
pub fn sha1_hex(input: &[u8]) -> String {
    hex::encode(Sha1::digest(input))
}

/// Digest of a challenge: the service prefix immediately followed by the
/// nonce's hex text.
pub fn challenge_digest(prefix: &str, nonce_hex: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(prefix.as_bytes());
    hasher.update(nonce_hex.as_bytes());
    hex::encode(hasher.finalize())
}

//! SHA-1 digest geometry.

/// Digest size in bytes
pub const DIGEST_SIZE: usize = 20;

/// Length of a hex-encoded digest
pub const DIGEST_HEX_LEN: usize = 2 * DIGEST_SIZE;

/// Digest width in bits, the upper bound on difficulty
pub const DIGEST_BITS: u32 = 8 * DIGEST_SIZE as u32;

//! Leading-zero-bits difficulty test.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::Error;

/// Check whether a hex-encoded digest has at least `difficulty` leading
/// zero bits.
///
/// The digest is read as an unsigned integer left-padded to its nominal
/// width of four bits per hex character; it matches when the top
/// `difficulty` bits of that fixed-width value are all zero. Leading zero
/// nibbles in the hex text therefore count toward the zero bits.
///
/// Difficulty 0 always matches, and a difficulty equal to the full width
/// matches only the all-zero digest. A difficulty beyond the digest width
/// is rejected.
///
/// # Example
///
/// ```rust
/// use hashcash_core::meets_difficulty;
///
/// let digest = "00f8c216e1d0cc71bae33e04138cb95a5c4eeb14";
/// assert!(meets_difficulty(digest, 8).unwrap());
/// assert!(!meets_difficulty(digest, 9).unwrap());
/// ```
pub fn meets_difficulty(digest_hex: &str, difficulty: u32) -> Result<bool, Error> {
    let total_bits = 4 * digest_hex.len() as u32;
    if difficulty > total_bits {
        return Err(Error::DifficultyOutOfRange {
            difficulty,
            limit: total_bits,
        });
    }

    let value = BigUint::parse_bytes(digest_hex.as_bytes(), 16)
        .ok_or_else(|| Error::InvalidDigest(digest_hex.to_string()))?;

    // Everything below the top `difficulty` bits is shifted out; the
    // digest matches iff nothing remains.
    Ok((value >> (total_bits - difficulty) as usize).is_zero())
}

use thiserror::Error;

/// Errors produced by the prover and verifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A nonce handed to `verify` contained non-hexadecimal characters.
    #[error("nonce is not a hexadecimal string: {0:?}")]
    InvalidNonce(String),

    /// A digest string contained non-hexadecimal characters.
    #[error("digest is not a hexadecimal string: {0:?}")]
    InvalidDigest(String),

    /// The requested difficulty exceeds the digest's bit width.
    #[error("difficulty {difficulty} exceeds the {limit}-bit digest width")]
    DifficultyOutOfRange { difficulty: u32, limit: u32 },

    /// The search was aborted through its `CancelToken`.
    #[error("search cancelled")]
    Cancelled,
}

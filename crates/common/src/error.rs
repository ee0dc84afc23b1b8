//! Stable error taxonomy returned by the AEAD boundary.

use thiserror::Error;

/// Return code for a successful seal or open.
pub const SUCCESS: i32 = 0;

/// Terminal outcome of a failed seal or open.
///
/// Each variant carries a fixed integer via [`AeadError::code`]. Callers on the
/// far side of the C ABI branch on those integers, so they are never renumbered:
///
/// | variant | code |
/// |---|---|
/// | [`AeadError::InvalidKey`] | -1 |
/// | [`AeadError::InvalidNonce`] | -2 |
/// | [`AeadError::InvalidInput`] | -3 |
/// | [`AeadError::InvalidTag`] | -4 |
/// | [`AeadError::DecryptFailed`] | -5 |
/// | [`AeadError::Internal`] | -6 |
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AeadError {
    /// Key is absent or not exactly 32 bytes.
    #[error("invalid key: expected 32 bytes")]
    InvalidKey,

    /// Nonce is absent or not exactly 12 bytes.
    #[error("invalid nonce: expected 12 bytes")]
    InvalidNonce,

    /// A required input or output buffer is absent or too small.
    #[error("invalid input: missing or undersized buffer")]
    InvalidInput,

    /// The engine refused to register the supplied tag.
    #[error("invalid tag")]
    InvalidTag,

    /// Authentication failed or the decrypt transform failed.
    ///
    /// A wrong tag and a corrupted ciphertext both land here.
    #[error("decryption failed")]
    DecryptFailed,

    /// The cipher engine could not be initialised or failed internally.
    #[error("internal cipher engine error")]
    Internal,
}

impl AeadError {
    /// Every variant, in code order.
    pub const ALL: [AeadError; 6] = [
        AeadError::InvalidKey,
        AeadError::InvalidNonce,
        AeadError::InvalidInput,
        AeadError::InvalidTag,
        AeadError::DecryptFailed,
        AeadError::Internal,
    ];

    /// Returns the stable integer code for this error.
    pub fn code(&self) -> i32 {
        match self {
            AeadError::InvalidKey => -1,
            AeadError::InvalidNonce => -2,
            AeadError::InvalidInput => -3,
            AeadError::InvalidTag => -4,
            AeadError::DecryptFailed => -5,
            AeadError::Internal => -6,
        }
    }

    /// Maps a stable integer code back to its variant.
    ///
    /// Returns `None` for [`SUCCESS`] and for any unknown value.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }

    /// Whether a caller may reasonably retry the same call.
    ///
    /// Only [`AeadError::Internal`] is potentially transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, AeadError::Internal)
    }
}

/// Collapses a boundary result into the integer returned across the C ABI.
pub fn to_code(result: Result<(), AeadError>) -> i32 {
    match result {
        Ok(()) => SUCCESS,
        Err(e) => e.code(),
    }
}

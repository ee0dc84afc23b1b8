//! [`CipherEngine`]: the seal/open capability the boundary drives.

use thiserror::Error;

use common::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};

/// Stage at which an engine call failed.
///
/// The boundary maps these onto [`common::AeadError`]; they never reach a caller
/// directly.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The algorithm is not available in the underlying library.
    #[error("algorithm unavailable")]
    Unavailable,

    /// Key schedule or context initialisation failed.
    #[error("engine initialisation failed")]
    Init,

    /// The expected tag could not be registered for verification.
    #[error("tag setup rejected")]
    TagSetup,

    /// The encrypt or decrypt transform itself failed.
    #[error("cipher transform failed")]
    Transform,

    /// Tag verification failed at finalisation.
    #[error("tag verification failed")]
    Verify,
}

/// One AEAD algorithm behind the boundary.
///
/// Implementations receive inputs whose sizes the boundary has already checked:
/// `ciphertext_out` is exactly `plaintext.len()` bytes on seal and
/// `plaintext_out` exactly `ciphertext.len()` bytes on open. The tag passed to
/// [`CipherEngine::open`] is forwarded untouched so the engine decides whether
/// it can be registered.
///
/// Engines hold no per-call state; every key schedule they build is dropped
/// before the call returns, on success and failure alike.
#[cfg_attr(test, mockall::automock)]
pub trait CipherEngine: Send + Sync {
    /// Short identifier used in log fields.
    fn name(&self) -> &'static str;

    /// Encrypt `plaintext` into `ciphertext_out` and write the tag.
    fn seal(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        plaintext: &[u8],
        ciphertext_out: &mut [u8],
        tag_out: &mut [u8; TAG_SIZE],
    ) -> Result<(), EngineError>;

    /// Verify `tag` and decrypt `ciphertext` into `plaintext_out`.
    fn open(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
        plaintext_out: &mut [u8],
    ) -> Result<(), EngineError>;
}

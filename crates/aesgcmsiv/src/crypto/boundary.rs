//! [`Aead`]: parameter validation and error mapping around a [`CipherEngine`].
//!
//! # Validation order
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. key present and [`KEY_SIZE`] bytes, else [`AeadError::InvalidKey`];
//! 2. nonce present and [`NONCE_SIZE`] bytes, else [`AeadError::InvalidNonce`];
//! 3. every data buffer present and outputs large enough, else
//!    [`AeadError::InvalidInput`].
//!
//! AAD is optional; `None` and `Some(&[])` authenticate identically.
//!
//! # Outputs
//!
//! On success only the first `input.len()` bytes of the output buffer are
//! written. On any engine failure the written region and the tag are cleared
//! before the error is returned.

use tracing::{debug, warn};

use common::{AeadError, KEY_SIZE, NONCE_SIZE, TAG_SIZE};

use super::engine::{CipherEngine, EngineError};

/// The AEAD boundary, generic over exactly one engine.
#[derive(Debug, Clone, Default)]
pub struct Aead<E> {
    engine: E,
}

impl<E: CipherEngine> Aead<E> {
    /// Wrap `engine`.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Encrypt and authenticate `plaintext` into caller-owned buffers.
    ///
    /// `ciphertext_out` must hold at least `plaintext.len()` bytes.
    ///
    /// # Errors
    ///
    /// Validation errors in the order listed in the module docs; any engine
    /// failure is [`AeadError::Internal`].
    pub fn seal(
        &self,
        key: Option<&[u8]>,
        nonce: Option<&[u8]>,
        plaintext: Option<&[u8]>,
        aad: Option<&[u8]>,
        ciphertext_out: Option<&mut [u8]>,
        tag_out: Option<&mut [u8; TAG_SIZE]>,
    ) -> Result<(), AeadError> {
        let key = check_key(key)?;
        let nonce = check_nonce(nonce)?;
        let (Some(plaintext), Some(ciphertext_out), Some(tag_out)) =
            (plaintext, ciphertext_out, tag_out)
        else {
            return Err(AeadError::InvalidInput);
        };
        let out = ciphertext_out
            .get_mut(..plaintext.len())
            .ok_or(AeadError::InvalidInput)?;
        let aad = aad.unwrap_or_default();

        debug!(
            engine = self.engine.name(),
            plaintext_len = plaintext.len(),
            aad_len = aad.len(),
            "seal"
        );

        self.engine
            .seal(key, nonce, aad, plaintext, out, tag_out)
            .map_err(|e| {
                out.fill(0);
                tag_out.fill(0);
                warn!(engine = self.engine.name(), error = %e, "seal failed");
                seal_error(e)
            })
    }

    /// Verify `tag` and decrypt `ciphertext` into a caller-owned buffer.
    ///
    /// `plaintext_out` must hold at least `ciphertext.len()` bytes.
    ///
    /// # Errors
    ///
    /// Validation errors in the order listed in the module docs, then
    /// [`AeadError::InvalidTag`] if the engine cannot register the tag,
    /// [`AeadError::DecryptFailed`] if the transform or verification fails, or
    /// [`AeadError::Internal`] if the engine cannot be initialised.
    pub fn open(
        &self,
        key: Option<&[u8]>,
        nonce: Option<&[u8]>,
        ciphertext: Option<&[u8]>,
        aad: Option<&[u8]>,
        tag: Option<&[u8]>,
        plaintext_out: Option<&mut [u8]>,
    ) -> Result<(), AeadError> {
        let key = check_key(key)?;
        let nonce = check_nonce(nonce)?;
        let (Some(ciphertext), Some(tag), Some(plaintext_out)) = (ciphertext, tag, plaintext_out)
        else {
            return Err(AeadError::InvalidInput);
        };
        let out = plaintext_out
            .get_mut(..ciphertext.len())
            .ok_or(AeadError::InvalidInput)?;
        let aad = aad.unwrap_or_default();

        debug!(
            engine = self.engine.name(),
            ciphertext_len = ciphertext.len(),
            aad_len = aad.len(),
            "open"
        );

        self.engine
            .open(key, nonce, aad, ciphertext, tag, out)
            .map_err(|e| {
                out.fill(0);
                let mapped = open_error(e);
                if mapped == AeadError::DecryptFailed {
                    debug!(engine = self.engine.name(), "open rejected");
                } else {
                    warn!(engine = self.engine.name(), error = %e, "open failed");
                }
                mapped
            })
    }

    /// Seal into freshly allocated buffers.
    ///
    /// Returns `(ciphertext, tag)`.
    pub fn seal_to_vec(
        &self,
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<(Vec<u8>, [u8; TAG_SIZE]), AeadError> {
        let mut ciphertext = vec![0u8; plaintext.len()];
        let mut tag = [0u8; TAG_SIZE];
        self.seal(
            Some(key),
            Some(nonce),
            Some(plaintext),
            Some(aad),
            Some(ciphertext.as_mut_slice()),
            Some(&mut tag),
        )?;
        Ok((ciphertext, tag))
    }

    /// Open into a freshly allocated buffer.
    pub fn open_to_vec(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        aad: &[u8],
        tag: &[u8],
    ) -> Result<Vec<u8>, AeadError> {
        let mut plaintext = vec![0u8; ciphertext.len()];
        self.open(
            Some(key),
            Some(nonce),
            Some(ciphertext),
            Some(aad),
            Some(tag),
            Some(plaintext.as_mut_slice()),
        )?;
        Ok(plaintext)
    }
}

fn check_key(key: Option<&[u8]>) -> Result<&[u8; KEY_SIZE], AeadError> {
    key.and_then(|k| k.try_into().ok())
        .ok_or(AeadError::InvalidKey)
}

fn check_nonce(nonce: Option<&[u8]>) -> Result<&[u8; NONCE_SIZE], AeadError> {
    nonce
        .and_then(|n| n.try_into().ok())
        .ok_or(AeadError::InvalidNonce)
}

fn seal_error(_: EngineError) -> AeadError {
    AeadError::Internal
}

fn open_error(e: EngineError) -> AeadError {
    match e {
        EngineError::Unavailable | EngineError::Init => AeadError::Internal,
        EngineError::TagSetup => AeadError::InvalidTag,
        EngineError::Transform | EngineError::Verify => AeadError::DecryptFailed,
    }
}

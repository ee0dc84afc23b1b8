//! Production engine backed by the RustCrypto `aes-gcm-siv` crate.
//!
//! **Algorithm:** AES-256-GCM-SIV (RFC 8452) is nonce-misuse-resistant: reusing
//! a nonce under one key reveals only whether two plaintexts were equal. It is
//! still the caller's job to keep nonces unique.

use aes_gcm_siv::{
    aead::{AeadInPlace, KeyInit},
    Aes256GcmSiv, Nonce, Tag,
};

use common::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};

use super::engine::{CipherEngine, EngineError};

/// Stateless AES-256-GCM-SIV engine.
///
/// A fresh key schedule is built per call and dropped on every exit path.
#[derive(Debug, Clone, Copy, Default)]
pub struct GcmSivEngine;

impl GcmSivEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }
}

fn build_cipher(key: &[u8; KEY_SIZE]) -> Result<Aes256GcmSiv, EngineError> {
    Aes256GcmSiv::new_from_slice(key).map_err(|_| EngineError::Init)
}

impl CipherEngine for GcmSivEngine {
    fn name(&self) -> &'static str {
        "gcm-siv"
    }

    fn seal(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        plaintext: &[u8],
        ciphertext_out: &mut [u8],
        tag_out: &mut [u8; TAG_SIZE],
    ) -> Result<(), EngineError> {
        let cipher = build_cipher(key)?;
        if ciphertext_out.len() != plaintext.len() {
            return Err(EngineError::Transform);
        }
        ciphertext_out.copy_from_slice(plaintext);
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(nonce), aad, ciphertext_out)
            .map_err(|_| EngineError::Transform)?;
        tag_out.copy_from_slice(&tag);
        Ok(())
    }

    fn open(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
        plaintext_out: &mut [u8],
    ) -> Result<(), EngineError> {
        let cipher = build_cipher(key)?;
        if tag.len() != TAG_SIZE {
            return Err(EngineError::TagSetup);
        }
        if plaintext_out.len() != ciphertext.len() {
            return Err(EngineError::Transform);
        }
        plaintext_out.copy_from_slice(ciphertext);
        // The crate compares tags in constant time and restores the buffer to
        // ciphertext on mismatch.
        cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(nonce),
                aad,
                plaintext_out,
                Tag::from_slice(tag),
            )
            .map_err(|_| EngineError::Verify)
    }
}

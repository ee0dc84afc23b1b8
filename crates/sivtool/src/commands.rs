//! Seal, open, and self-test over a caller-supplied [`Aead`].

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::info;

use aesgcmsiv::{Aead, AeadError, CipherEngine, KEY_SIZE, NONCE_SIZE};
use common::protocol::{ErrorReport, OpenReport, SealReport};

fn decode(name: &str, value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value.trim())
        .with_context(|| format!("--{name} must be standard base64"))
}

fn boundary_error(e: AeadError) -> anyhow::Error {
    anyhow::Error::new(e).context(format!("{e} (code {})", e.code()))
}

/// The report to print for `err`, if it came from the boundary.
pub fn failure_report(err: &anyhow::Error) -> Option<ErrorReport> {
    err.downcast_ref::<AeadError>().copied().map(ErrorReport::from)
}

/// Seal `plaintext` and return the base64 report.
pub fn seal<E: CipherEngine>(
    aead: &Aead<E>,
    key: &[u8],
    nonce_b64: &str,
    aad_b64: Option<&str>,
    plaintext: &[u8],
) -> Result<SealReport> {
    let nonce = decode("nonce", nonce_b64)?;
    let aad = aad_b64.map(|a| decode("aad", a)).transpose()?;

    let mut ciphertext = vec![0u8; plaintext.len()];
    let mut tag = [0u8; aesgcmsiv::TAG_SIZE];
    aead.seal(
        Some(key),
        Some(nonce.as_slice()),
        Some(plaintext),
        aad.as_deref(),
        Some(ciphertext.as_mut_slice()),
        Some(&mut tag),
    )
    .map_err(boundary_error)?;

    Ok(SealReport {
        ciphertext: STANDARD.encode(&ciphertext),
        tag: STANDARD.encode(tag),
    })
}

/// Open a base64 ciphertext and return the base64 plaintext report.
pub fn open<E: CipherEngine>(
    aead: &Aead<E>,
    key: &[u8],
    nonce_b64: &str,
    aad_b64: Option<&str>,
    tag_b64: &str,
    ciphertext_b64: &str,
) -> Result<OpenReport> {
    let nonce = decode("nonce", nonce_b64)?;
    let aad = aad_b64.map(|a| decode("aad", a)).transpose()?;
    let tag = decode("tag", tag_b64)?;
    let ciphertext = decode("ciphertext", ciphertext_b64)?;

    let mut plaintext = vec![0u8; ciphertext.len()];
    aead.open(
        Some(key),
        Some(nonce.as_slice()),
        Some(ciphertext.as_slice()),
        aad.as_deref(),
        Some(tag.as_slice()),
        Some(plaintext.as_mut_slice()),
    )
    .map_err(boundary_error)?;

    Ok(OpenReport {
        plaintext: STANDARD.encode(&plaintext),
    })
}

/// Run the zero-key "hello" scenario against the compiled engine.
pub fn self_test<E: CipherEngine>(aead: &Aead<E>) -> Result<()> {
    let key = [0u8; KEY_SIZE];
    let nonce = [0u8; NONCE_SIZE];

    let (ciphertext, tag) = aead
        .seal_to_vec(&key, &nonce, b"hello", b"")
        .map_err(boundary_error)?;
    if ciphertext.len() != 5 {
        anyhow::bail!("ciphertext length {} != plaintext length 5", ciphertext.len());
    }

    let plaintext = aead
        .open_to_vec(&key, &nonce, &ciphertext, b"", &tag)
        .map_err(boundary_error)?;
    if plaintext != b"hello" {
        anyhow::bail!("round trip did not recover the plaintext");
    }

    let mut forged = tag;
    forged[0] = forged[0].wrapping_add(1);
    match aead.open_to_vec(&key, &nonce, &ciphertext, b"", &forged) {
        Err(AeadError::DecryptFailed) => {}
        Ok(_) => anyhow::bail!("forged tag was accepted"),
        Err(e) => anyhow::bail!("forged tag gave {e} instead of a decryption failure"),
    }

    match aead.seal_to_vec(&key[..16], &nonce[..8], b"x", b"") {
        Err(AeadError::InvalidKey) => {}
        other => anyhow::bail!("validation order broken: {other:?}"),
    }

    info!(engine = aead.engine().name(), "self-test passed");
    Ok(())
}

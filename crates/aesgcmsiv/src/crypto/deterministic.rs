//! Deterministic test-double engine. **Provides no security.**
//!
//! Lets the boundary contract be exercised without linking a cryptographic
//! library. The transform is a key/nonce keystream XOR; the tag is a linear
//! checksum over every input, so flipping any single bit of key, nonce, AAD,
//! ciphertext or tag always fails verification.

use common::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};

use super::engine::{CipherEngine, EngineError};

/// Reversible, non-secure engine with the same call contract as the production one.
///
/// Output depends only on (key, nonce, aad, plaintext).
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicEngine;

impl DeterministicEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }
}

/// Rotate-xor accumulator. Every step is linear over GF(2) and the rotation is
/// a bijection, so a one-bit change in any absorbed byte survives to the output.
struct Checksum {
    state: [u8; TAG_SIZE],
    pos: usize,
}

impl Checksum {
    fn new() -> Self {
        Self {
            state: [0u8; TAG_SIZE],
            pos: 0,
        }
    }

    fn absorb(&mut self, data: &[u8]) {
        for &b in data {
            let i = self.pos % TAG_SIZE;
            self.state[i] = self.state[i].rotate_left(3) ^ b;
            self.pos += 1;
        }
    }

    fn absorb_len(&mut self, len: usize) {
        self.absorb(&(len as u64).to_le_bytes());
    }

    fn finish(self) -> [u8; TAG_SIZE] {
        self.state
    }
}

fn compute_tag(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    aad: &[u8],
    ciphertext: &[u8],
) -> [u8; TAG_SIZE] {
    let mut sum = Checksum::new();
    sum.absorb(key);
    sum.absorb(nonce);
    sum.absorb_len(aad.len());
    sum.absorb(aad);
    sum.absorb_len(ciphertext.len());
    sum.absorb(ciphertext);
    sum.finish()
}

fn apply_keystream(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], input: &[u8], out: &mut [u8]) {
    for (i, (o, b)) in out.iter_mut().zip(input).enumerate() {
        *o = b ^ key[i % KEY_SIZE] ^ nonce[i % NONCE_SIZE] ^ (i as u8);
    }
}

/// Compares without short-circuiting on the first differing byte.
fn tags_equal(a: &[u8; TAG_SIZE], b: &[u8]) -> bool {
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl CipherEngine for DeterministicEngine {
    fn name(&self) -> &'static str {
        "deterministic"
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
        if ciphertext_out.len() != plaintext.len() {
            return Err(EngineError::Transform);
        }
        apply_keystream(key, nonce, plaintext, ciphertext_out);
        *tag_out = compute_tag(key, nonce, aad, ciphertext_out);
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
        if tag.len() != TAG_SIZE {
            return Err(EngineError::TagSetup);
        }
        if plaintext_out.len() != ciphertext.len() {
            return Err(EngineError::Transform);
        }
        // Verify before transforming so unauthenticated plaintext is never written.
        let expected = compute_tag(key, nonce, aad, ciphertext);
        if !tags_equal(&expected, tag) {
            return Err(EngineError::Verify);
        }
        apply_keystream(key, nonce, ciphertext, plaintext_out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; KEY_SIZE] = [0x5a; KEY_SIZE];
    const NONCE: [u8; NONCE_SIZE] = [0xa5; NONCE_SIZE];

    fn seal(aad: &[u8], pt: &[u8]) -> (Vec<u8>, [u8; TAG_SIZE]) {
        let mut ct = vec![0u8; pt.len()];
        let mut tag = [0u8; TAG_SIZE];
        DeterministicEngine::new()
            .seal(&KEY, &NONCE, aad, pt, &mut ct, &mut tag)
            .unwrap();
        (ct, tag)
    }

    fn open(
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        aad: &[u8],
        ct: &[u8],
        tag: &[u8],
    ) -> Result<Vec<u8>, EngineError> {
        let mut pt = vec![0u8; ct.len()];
        DeterministicEngine::new().open(key, nonce, aad, ct, tag, &mut pt)?;
        Ok(pt)
    }

    #[test]
    fn same_inputs_same_outputs() {
        assert_eq!(seal(b"aad", b"hello"), seal(b"aad", b"hello"));
    }

    #[test]
    fn round_trip() {
        let (ct, tag) = seal(b"aad", b"hello world");
        assert_ne!(ct.as_slice(), b"hello world");
        assert_eq!(open(&KEY, &NONCE, b"aad", &ct, &tag).unwrap(), b"hello world");
    }

    #[test]
    fn zero_key_and_nonce_still_transform() {
        let mut ct = [0u8; 5];
        let mut tag = [0u8; TAG_SIZE];
        DeterministicEngine::new()
            .seal(&[0; KEY_SIZE], &[0; NONCE_SIZE], b"", b"hello", &mut ct, &mut tag)
            .unwrap();
        assert_ne!(&ct, b"hello");
    }

    #[test]
    fn every_single_bit_flip_is_detected() {
        let aad = b"context".to_vec();
        let (ct, tag) = seal(&aad, b"sixteen byte msg");

        for byte in 0..ct.len() {
            for bit in 0..8 {
                let mut c = ct.clone();
                c[byte] ^= 1 << bit;
                assert_eq!(open(&KEY, &NONCE, &aad, &c, &tag), Err(EngineError::Verify));
            }
        }
        for byte in 0..TAG_SIZE {
            for bit in 0..8 {
                let mut t = tag;
                t[byte] ^= 1 << bit;
                assert_eq!(open(&KEY, &NONCE, &aad, &ct, &t), Err(EngineError::Verify));
            }
        }
        for byte in 0..aad.len() {
            for bit in 0..8 {
                let mut a = aad.clone();
                a[byte] ^= 1 << bit;
                assert_eq!(open(&KEY, &NONCE, &a, &ct, &tag), Err(EngineError::Verify));
            }
        }
        for byte in 0..KEY_SIZE {
            for bit in 0..8 {
                let mut k = KEY;
                k[byte] ^= 1 << bit;
                assert_eq!(open(&k, &NONCE, &aad, &ct, &tag), Err(EngineError::Verify));
            }
        }
        for byte in 0..NONCE_SIZE {
            for bit in 0..8 {
                let mut n = NONCE;
                n[byte] ^= 1 << bit;
                assert_eq!(open(&KEY, &n, &aad, &ct, &tag), Err(EngineError::Verify));
            }
        }
    }

    #[test]
    fn aad_and_ciphertext_boundary_is_bound() {
        // Moving a byte from AAD into ciphertext must change the tag.
        let tag_a = compute_tag(&KEY, &NONCE, b"ab", b"c");
        let tag_b = compute_tag(&KEY, &NONCE, b"a", b"bc");
        assert_ne!(tag_a, tag_b);
    }

    #[test]
    fn failed_verification_writes_nothing() {
        let (ct, mut tag) = seal(b"", b"hello");
        tag[0] = tag[0].wrapping_add(1);
        let mut pt = [0xEEu8; 5];
        let err = DeterministicEngine::new()
            .open(&KEY, &NONCE, b"", &ct, &tag, &mut pt)
            .unwrap_err();
        assert_eq!(err, EngineError::Verify);
        assert_eq!(pt, [0xEE; 5]);
    }

    #[test]
    fn wrong_tag_length_rejected_at_setup() {
        let (ct, tag) = seal(b"", b"hi");
        assert_eq!(
            open(&KEY, &NONCE, b"", &ct, &tag[..15]),
            Err(EngineError::TagSetup)
        );
    }

    #[test]
    fn constant_time_compare_matches_equality() {
        let a = [3u8; TAG_SIZE];
        assert!(tags_equal(&a, &[3u8; TAG_SIZE]));
        let mut b = a;
        b[TAG_SIZE - 1] = 4;
        assert!(!tags_equal(&a, &b));
    }
}

//! `aesgcmsiv`: a fixed AES-256-GCM-SIV AEAD boundary.
//!
//! One algorithm identity, no negotiation: 32-byte key, 12-byte nonce, 16-byte
//! tag. The crate validates caller buffers in a fixed order, drives exactly one
//! [`crypto::CipherEngine`], and reports failures through the stable
//! [`common::AeadError`] taxonomy.
//!
//! Layout:
//! - [`crypto`]: the boundary ([`crypto::Aead`]) and both engines.
//! - [`ffi`]: the C ABI (`aesgcmsiv_encrypt` / `aesgcmsiv_decrypt`) over a
//!   process-wide boundary built from [`crypto::DefaultEngine`].
//! - [`config`] and [`telemetry`]: logging setup for hosts that call
//!   [`ffi::aesgcmsiv_init`].
//!
//! Nonce uniqueness per key is the caller's obligation and is not checked here.

pub mod config;
pub mod crypto;
pub mod ffi;
pub mod telemetry;

pub use common::{AeadError, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use crypto::{Aead, CipherEngine, DefaultEngine, DeterministicEngine};
#[cfg(feature = "gcm-siv")]
pub use crypto::GcmSivEngine;

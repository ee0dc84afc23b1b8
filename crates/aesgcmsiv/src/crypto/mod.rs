//! AES-256-GCM-SIV seal/open behind a validating boundary.
//!
//! This module is free of FFI concerns. [`Aead`] owns the validation rules and
//! the error mapping; the [`CipherEngine`] it wraps performs the transform.
//!
//! # Engines
//!
//! - [`GcmSivEngine`] (feature `gcm-siv`): RustCrypto `aes-gcm-siv`.
//! - [`DeterministicEngine`]: reversible, non-secure test double with the same
//!   call contract. Always compiled so contract tests can run against it.
//!
//! [`DefaultEngine`] is the one selected at build time for the C ABI.

pub mod boundary;
pub mod deterministic;
pub mod engine;
#[cfg(feature = "gcm-siv")]
pub mod gcm_siv;

pub use boundary::Aead;
pub use deterministic::DeterministicEngine;
pub use engine::{CipherEngine, EngineError};
#[cfg(feature = "gcm-siv")]
pub use gcm_siv::GcmSivEngine;

#[cfg(not(any(feature = "gcm-siv", feature = "mock-engine")))]
compile_error!("enable at least one engine feature: `gcm-siv` or `mock-engine`");

/// Engine the C ABI and `sivtool` are built against.
///
/// `mock-engine` wins when both engine features are enabled.
#[cfg(feature = "mock-engine")]
pub type DefaultEngine = DeterministicEngine;

/// Engine the C ABI and `sivtool` are built against.
#[cfg(all(feature = "gcm-siv", not(feature = "mock-engine")))]
pub type DefaultEngine = GcmSivEngine;

//! C ABI over the process-wide [`Aead`] boundary.
//!
//! ## Safety
//!
//! Every pointer argument may be null; null means "absent" and is reported
//! through the usual validation order. A non-null pointer must be valid for
//! its declared length:
//!
//! - `key` for `key_len` bytes, `nonce` for `nonce_len` bytes;
//! - `plaintext` / `ciphertext` for their `_len` bytes, `aad` for `aad_len`;
//! - `ciphertext_out` for `plaintext_len` bytes on encrypt, `plaintext_out` for
//!   `ciphertext_len` bytes on decrypt;
//! - `tag_out` / `tag` for [`AESGCMSIV_TAG_SIZE`] bytes.
//!
//! The data input may alias its output buffer (in-place operation). No other
//! argument may overlap an output buffer.
//!
//! ## Error Handling
//!
//! Functions return [`AESGCMSIV_SUCCESS`] or one of the negative
//! `AESGCMSIV_ERROR_*` codes. Panics never unwind across the boundary; they
//! are reported as [`AESGCMSIV_ERROR_INTERNAL`].

use std::ops::Deref;
use std::os::raw::{c_char, c_int};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::slice;
use std::sync::OnceLock;

use tracing::{error, info, warn};
use zeroize::Zeroizing;

use common::error::to_code;
use common::{AeadError, ALGORITHM, TAG_SIZE};

use crate::config::Config;
use crate::crypto::{Aead, CipherEngine, DefaultEngine};
use crate::telemetry;

/// Operation succeeded.
pub const AESGCMSIV_SUCCESS: c_int = 0;
/// Key absent or not 32 bytes.
pub const AESGCMSIV_ERROR_INVALID_KEY: c_int = -1;
/// Nonce absent or not 12 bytes.
pub const AESGCMSIV_ERROR_INVALID_NONCE: c_int = -2;
/// Required buffer absent.
pub const AESGCMSIV_ERROR_INVALID_INPUT: c_int = -3;
/// Tag could not be registered with the engine.
pub const AESGCMSIV_ERROR_INVALID_TAG: c_int = -4;
/// Authentication or decryption failed.
pub const AESGCMSIV_ERROR_DECRYPT_FAILED: c_int = -5;
/// Engine unavailable or failed internally.
pub const AESGCMSIV_ERROR_INTERNAL: c_int = -6;

/// Key length in bytes.
pub const AESGCMSIV_KEY_SIZE: usize = 32;
/// Nonce length in bytes.
pub const AESGCMSIV_NONCE_SIZE: usize = 12;
/// Tag length in bytes.
pub const AESGCMSIV_TAG_SIZE: usize = 16;

static BOUNDARY: OnceLock<Aead<DefaultEngine>> = OnceLock::new();

/// Process-wide boundary, built on first use and never torn down.
fn boundary() -> &'static Aead<DefaultEngine> {
    BOUNDARY.get_or_init(|| {
        let aead = Aead::new(DefaultEngine::default());
        info!(
            algorithm = ALGORITHM,
            engine = aead.engine().name(),
            "cipher engine initialised"
        );
        aead
    })
}

/// Runs `f`, turning a panic into [`AeadError::Internal`].
fn guarded(op: &'static str, f: impl FnOnce() -> Result<(), AeadError>) -> c_int {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => to_code(result),
        Err(_) => {
            error!(op, "panic caught at FFI boundary");
            AeadError::Internal.code()
        }
    }
}

/// Borrow `len` bytes at `ptr`, or `None` if `ptr` is null.
///
/// # Safety
///
/// A non-null `ptr` must be valid for reads of `len` bytes for `'a`.
unsafe fn input<'a>(ptr: *const u8, len: usize) -> Option<&'a [u8]> {
    if ptr.is_null() || len > isize::MAX as usize {
        return None;
    }
    // SAFETY: non-null and valid for `len` bytes per the caller contract.
    Some(unsafe { slice::from_raw_parts(ptr, len) })
}

/// Mutably borrow `len` bytes at `ptr`, or `None` if `ptr` is null.
///
/// # Safety
///
/// A non-null `ptr` must be valid for writes of `len` bytes for `'a` and not
/// aliased by any other live reference.
unsafe fn output<'a>(ptr: *mut u8, len: usize) -> Option<&'a mut [u8]> {
    if ptr.is_null() || len > isize::MAX as usize {
        return None;
    }
    // SAFETY: non-null, valid and unaliased per the caller contract.
    Some(unsafe { slice::from_raw_parts_mut(ptr, len) })
}

/// # Safety
///
/// A non-null `ptr` must be valid for writes of [`TAG_SIZE`] bytes for `'a`.
unsafe fn tag_output<'a>(ptr: *mut u8) -> Option<&'a mut [u8; TAG_SIZE]> {
    // SAFETY: `[u8; N]` has alignment 1; `as_mut` handles null.
    unsafe { ptr.cast::<[u8; TAG_SIZE]>().as_mut() }
}

fn overlaps(a: *const u8, a_len: usize, b: *const u8, b_len: usize) -> bool {
    let (a, b) = (a as usize, b as usize);
    a < b.saturating_add(b_len) && b < a.saturating_add(a_len)
}

/// Data input handed to the boundary.
///
/// A copy is taken only when the input overlaps the output buffer; the copy
/// is zeroized when dropped.
enum Staged<'a> {
    Borrowed(&'a [u8]),
    Copied(Zeroizing<Vec<u8>>),
}

impl Deref for Staged<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Staged::Borrowed(data) => data,
            Staged::Copied(copy) => copy.as_slice(),
        }
    }
}

/// Borrow the data input, copying it out first when it overlaps `out`.
///
/// # Safety
///
/// Same contract as [`input`].
unsafe fn staged_input<'a>(
    ptr: *const u8,
    len: usize,
    out: *const u8,
    out_len: usize,
) -> Option<Staged<'a>> {
    // SAFETY: forwarded caller contract.
    let data = unsafe { input(ptr, len) }?;
    if !out.is_null() && overlaps(ptr, len, out, out_len) {
        Some(Staged::Copied(Zeroizing::new(data.to_vec())))
    } else {
        Some(Staged::Borrowed(data))
    }
}

/// Encrypt `plaintext` with AES-256-GCM-SIV.
///
/// Writes `plaintext_len` bytes to `ciphertext_out` and 16 bytes to `tag_out`.
/// `aad` may be null, which is equivalent to an empty AAD.
///
/// # Returns
///
/// [`AESGCMSIV_SUCCESS`], or [`AESGCMSIV_ERROR_INVALID_KEY`],
/// [`AESGCMSIV_ERROR_INVALID_NONCE`], [`AESGCMSIV_ERROR_INVALID_INPUT`],
/// [`AESGCMSIV_ERROR_INTERNAL`], checked in that order.
///
/// # Safety
///
/// See the module-level pointer contract.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn aesgcmsiv_encrypt(
    key: *const u8,
    key_len: usize,
    nonce: *const u8,
    nonce_len: usize,
    plaintext: *const u8,
    plaintext_len: usize,
    aad: *const u8,
    aad_len: usize,
    ciphertext_out: *mut u8,
    tag_out: *mut u8,
) -> c_int {
    guarded("encrypt", || {
        // SAFETY: pointer validity is the caller's contract (module docs). The
        // staged plaintext no longer borrows `ciphertext_out` when they overlap.
        unsafe {
            let staged = staged_input(plaintext, plaintext_len, ciphertext_out, plaintext_len);
            boundary().seal(
                input(key, key_len),
                input(nonce, nonce_len),
                staged.as_deref(),
                input(aad, aad_len),
                output(ciphertext_out, plaintext_len),
                tag_output(tag_out),
            )
        }
    })
}

/// Verify `tag` and decrypt `ciphertext` with AES-256-GCM-SIV.
///
/// Writes `ciphertext_len` bytes to `plaintext_out` on success. On failure the
/// output region is cleared.
///
/// # Returns
///
/// [`AESGCMSIV_SUCCESS`], or [`AESGCMSIV_ERROR_INVALID_KEY`],
/// [`AESGCMSIV_ERROR_INVALID_NONCE`], [`AESGCMSIV_ERROR_INVALID_INPUT`],
/// [`AESGCMSIV_ERROR_INVALID_TAG`], [`AESGCMSIV_ERROR_DECRYPT_FAILED`],
/// [`AESGCMSIV_ERROR_INTERNAL`].
///
/// # Safety
///
/// See the module-level pointer contract.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn aesgcmsiv_decrypt(
    key: *const u8,
    key_len: usize,
    nonce: *const u8,
    nonce_len: usize,
    ciphertext: *const u8,
    ciphertext_len: usize,
    aad: *const u8,
    aad_len: usize,
    tag: *const u8,
    plaintext_out: *mut u8,
) -> c_int {
    guarded("decrypt", || {
        // SAFETY: as in `aesgcmsiv_encrypt`.
        unsafe {
            let staged = staged_input(ciphertext, ciphertext_len, plaintext_out, ciphertext_len);
            boundary().open(
                input(key, key_len),
                input(nonce, nonce_len),
                staged.as_deref(),
                input(aad, aad_len),
                input(tag, TAG_SIZE),
                output(plaintext_out, ciphertext_len),
            )
        }
    })
}

/// Install logging from `AESGCMSIV_*` configuration and build the engine.
///
/// Optional; the engine is otherwise built on first use. Safe to call more
/// than once. Invalid configuration falls back to the defaults with a
/// warning. Returns [`AESGCMSIV_SUCCESS`].
#[no_mangle]
pub extern "C" fn aesgcmsiv_init() -> c_int {
    guarded("init", || {
        init_with(Config::from_env());
        Ok(())
    })
}

/// Installs logging from `loaded` (or the defaults if it was rejected) and
/// warms the engine. Returns the configuration that was applied.
fn init_with(loaded: anyhow::Result<Config>) -> Config {
    let (cfg, rejected) = match loaded {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // A subscriber installed by the host (or an earlier call) is kept.
    let _ = telemetry::init_telemetry(&cfg);
    if let Some(e) = rejected {
        warn!(error = %format!("{e:#}"), "invalid AESGCMSIV configuration, using defaults");
    }

    boundary();
    cfg
}

/// Library version as a static NUL-terminated string. Do not free.
#[no_mangle]
pub extern "C" fn aesgcmsiv_version() -> *const c_char {
    const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr().cast::<c_char>()
}

/// Required key length in bytes.
#[no_mangle]
pub extern "C" fn aesgcmsiv_key_size() -> usize {
    AESGCMSIV_KEY_SIZE
}

/// Required nonce length in bytes.
#[no_mangle]
pub extern "C" fn aesgcmsiv_nonce_size() -> usize {
    AESGCMSIV_NONCE_SIZE
}

/// Tag length in bytes.
#[no_mangle]
pub extern "C" fn aesgcmsiv_tag_size() -> usize {
    AESGCMSIV_TAG_SIZE
}

//! Error taxonomy, size constants, and report types shared across the `aesgcmsiv` crates.

pub mod error;
pub mod protocol;

pub use error::{AeadError, SUCCESS};
pub use protocol::{ALGORITHM, KEY_SIZE, NONCE_SIZE, TAG_SIZE};

//! Structured logging for the boundary.
//!
//! # Telemetry invariants
//!
//! - **No key, nonce, tag, or data bytes** appear in any log field. Events carry
//!   lengths, the engine name, and the error stage only.
//! - Log level is configurable via `AESGCMSIV_LOG_LEVEL` (default: `info`).

pub mod init;

pub use init::init_telemetry;

//! Call-contract constants and the report types printed by `sivtool`.
//!
//! The boundary supports exactly one algorithm identity; there is no
//! negotiation, so every size here is fixed.

use serde::{Deserialize, Serialize};

/// Algorithm identity served by the boundary.
pub const ALGORITHM: &str = "AES-256-GCM-SIV";

/// Byte length of an AES-256 key (256 bits).
pub const KEY_SIZE: usize = 32;

/// Byte length of an AES-GCM-SIV nonce (96 bits).
pub const NONCE_SIZE: usize = 12;

/// Byte length of the authentication tag (128 bits).
pub const TAG_SIZE: usize = 16;

// ---------------------------------------------------------------------------
// Seal / open reports
// ---------------------------------------------------------------------------

/// Output of a successful seal, base64-encoded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealReport {
    /// Ciphertext, same length as the plaintext before encoding.
    pub ciphertext: String,
    /// 16-byte authentication tag.
    pub tag: String,
}

/// Output of a successful open, base64-encoded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenReport {
    /// Recovered plaintext.
    pub plaintext: String,
}

/// Failure report carrying the stable integer code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Stable integer code (see [`crate::AeadError::code`]).
    pub code: i32,
    /// Human-readable description; never contains key or data bytes.
    pub message: String,
}

impl From<crate::AeadError> for ErrorReport {
    fn from(e: crate::AeadError) -> Self {
        Self {
            code: e.code(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AeadError;

    #[test]
    fn sizes_match_rfc_8452() {
        assert_eq!(KEY_SIZE, 32);
        assert_eq!(NONCE_SIZE, 12);
        assert_eq!(TAG_SIZE, 16);
        assert_eq!(ALGORITHM, "AES-256-GCM-SIV");
    }

    #[test]
    fn seal_report_json_shape() {
        let r = SealReport {
            ciphertext: "aGVsbG8".into(),
            tag: "AAAA".into(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["ciphertext"], "aGVsbG8");
        assert_eq!(v["tag"], "AAAA");
    }

    #[test]
    fn error_report_from_aead_error() {
        let r = ErrorReport::from(AeadError::InvalidNonce);
        assert_eq!(r.code, -2);
        assert!(r.message.contains("nonce"));
        let json = serde_json::to_string(&r).unwrap();
        let back: ErrorReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}

//! Configuration loading and validation for `sivtool`.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

/// Validated `sivtool` configuration, read from `SIVTOOL_*` variables.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base64 key material. Required by `seal` and `open`.
    #[serde(default)]
    pub key: Option<String>,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("SIVTOOL"))
            .build()
            .context("failed to build sivtool configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise sivtool configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("SIVTOOL_LOG_LEVEL must not be empty");
        }
        Ok(())
    }

    /// Decode the configured key.
    ///
    /// Length is not checked here; the boundary reports a wrong-length key as
    /// `InvalidKey`.
    pub fn key_bytes(&self) -> Result<Vec<u8>> {
        let encoded = self
            .key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .context("SIVTOOL_KEY is required for seal and open")?;
        STANDARD
            .decode(encoded.trim())
            .context("SIVTOOL_KEY must be standard base64")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(key: Option<&str>) -> Config {
        Config {
            key: key.map(str::to_owned),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(default_log_level(), "warn");
    }

    #[test]
    fn key_required() {
        assert!(cfg(None).key_bytes().is_err());
        assert!(cfg(Some("  ")).key_bytes().is_err());
    }

    #[test]
    fn key_decodes() {
        let encoded = STANDARD.encode([7u8; 32]);
        assert_eq!(cfg(Some(encoded.as_str())).key_bytes().unwrap(), vec![7u8; 32]);
    }

    #[test]
    fn key_rejects_bad_base64() {
        assert!(cfg(Some("!!not base64!!")).key_bytes().is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let rendered = format!("{:?}", cfg(Some("c2VjcmV0")));
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("c2VjcmV0"));
    }

    #[test]
    fn validate_rejects_blank_level() {
        let mut c = cfg(None);
        c.log_level = " ".into();
        assert!(c.validate().is_err());
    }
}

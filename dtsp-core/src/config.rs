//! TOML configuration loading for the engine's two secrets: `seed` and
//! `udid`. Mirrors how the rest of this codebase loads configuration: a
//! `serde`-deserialized struct with defaults, read once at process start.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a [`DtspConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// The config file was not valid TOML for this schema.
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    /// A `*_hex` field was not valid hex.
    #[error("invalid hex in field `{field}`: {source}")]
    BadHex {
        /// Name of the offending field.
        field: &'static str,
        /// Underlying hex decode error.
        source: hex::FromHexError,
    },
}

/// Raw, deserialized configuration document. Plain and hex forms of each
/// secret are both accepted; the hex form, when present, takes precedence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawConfig {
    seed: String,
    seed_hex: Option<String>,
    udid: String,
    udid_hex: Option<String>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            seed: String::new(),
            seed_hex: None,
            udid: "PHP".to_string(),
            udid_hex: None,
        }
    }
}

/// Resolved engine secrets, ready to hand to [`crate::Engine::init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtspConfig {
    /// Shared secret; must be identical on every peer.
    pub seed: Vec<u8>,
    /// Per-deployment identifier mixed into the UDID base.
    pub udid: Vec<u8>,
}

impl DtspConfig {
    /// Parse a configuration document already read into memory.
    pub fn from_str(data: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(data)?;
        let seed = match raw.seed_hex {
            Some(h) => hex::decode(&h).map_err(|source| ConfigError::BadHex { field: "seed_hex", source })?,
            None => raw.seed.into_bytes(),
        };
        let udid = match raw.udid_hex {
            Some(h) => hex::decode(&h).map_err(|source| ConfigError::BadHex { field: "udid_hex", source })?,
            None => raw.udid.into_bytes(),
        };
        Ok(Self { seed, udid })
    }

    /// Load a configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Self::from_str(&data)
    }

    /// Alias kept for symmetry with the rest of this codebase's config APIs.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_file(path)
    }
}

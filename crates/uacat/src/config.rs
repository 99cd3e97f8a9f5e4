// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec configuration.
//!
//! [`DecodingLimits`] bound every length, count and nesting level a decoder
//! accepts from the wire. [`CodecConfig`] wraps them for file-based loading
//! (YAML, `config-loaders` feature).
//!
//! ```yaml
//! limits:
//!   max_string_length: 65535
//!   max_array_length: 100000
//!   max_nesting_depth: 32
//! ```

#[cfg(feature = "config-loaders")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "config-loaders")]
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[cfg(feature = "config-loaders")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config-loaders")]
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Upper bounds enforced while decoding untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config-loaders", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-loaders", serde(default))]
pub struct DecodingLimits {
    /// Maximum encoded length of a String, in bytes.
    pub max_string_length: usize,
    /// Maximum length of a ByteString (also bounds raw extension bodies).
    pub max_byte_string_length: usize,
    /// Maximum element count of any array or matrix.
    pub max_array_length: usize,
    /// Maximum size of a complete message or XML document.
    pub max_message_size: usize,
    /// Maximum nesting of structures, variants and diagnostic infos.
    pub max_nesting_depth: usize,
}

impl DecodingLimits {
    pub const DEFAULT_MAX_STRING_LENGTH: usize = 64 * 1024;
    pub const DEFAULT_MAX_BYTE_STRING_LENGTH: usize = 16 * 1024 * 1024;
    pub const DEFAULT_MAX_ARRAY_LENGTH: usize = 65_535;
    pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

    /// Limits that never reject anything except depth overflow.
    pub const fn unlimited() -> Self {
        Self {
            max_string_length: usize::MAX,
            max_byte_string_length: usize::MAX,
            max_array_length: usize::MAX,
            max_message_size: usize::MAX,
            max_nesting_depth: 1024,
        }
    }

    /// Reject limits that would make every decode fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("max_string_length", self.max_string_length),
            ("max_byte_string_length", self.max_byte_string_length),
            ("max_array_length", self.max_array_length),
            ("max_message_size", self.max_message_size),
            ("max_nesting_depth", self.max_nesting_depth),
        ];
        for (name, value) in checks {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
            }
        }
        Ok(())
    }
}

impl Default for DecodingLimits {
    fn default() -> Self {
        Self {
            max_string_length: Self::DEFAULT_MAX_STRING_LENGTH,
            max_byte_string_length: Self::DEFAULT_MAX_BYTE_STRING_LENGTH,
            max_array_length: Self::DEFAULT_MAX_ARRAY_LENGTH,
            max_message_size: Self::DEFAULT_MAX_MESSAGE_SIZE,
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Top-level codec configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config-loaders", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-loaders", serde(default))]
pub struct CodecConfig {
    pub limits: DecodingLimits,
}

impl CodecConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()
    }
}

#[cfg(feature = "config-loaders")]
impl CodecConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: CodecConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        log::info!("[config] loaded codec limits from {}", path.display());
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

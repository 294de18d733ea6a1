//! Module: config
//! Responsibility: codec limits and their TOML loading.
//! Does not own: per-table key layout (that comes from `TableModel`).
//! Boundary: read once when codecs are registered.

use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

pub const DEFAULT_MAX_KEY_FIELDS: usize = 16;
pub const DEFAULT_MAX_KEY_BYTES: usize = 4096;
pub const DEFAULT_MAX_ROW_BYTES: usize = 1 << 20;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config value '{field}' must be greater than zero")]
    ZeroLimit { field: &'static str },
}

///
/// CodecConfig
///
/// Limits applied to every key codec built with it.
/// Missing TOML keys fall back to the defaults.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Maximum number of fields in one key (merged fields for indexes).
    pub max_key_fields: usize,

    /// Maximum encoded key length, prefix included.
    pub max_key_bytes: usize,

    /// Maximum stored row payload accepted by the primary-key codec.
    pub max_row_bytes: usize,
}

impl CodecConfig {
    #[must_use]
    pub const fn new(max_key_fields: usize, max_key_bytes: usize) -> Self {
        Self {
            max_key_fields,
            max_key_bytes,
            max_row_bytes: DEFAULT_MAX_ROW_BYTES,
        }
    }

    #[must_use]
    pub const fn with_max_row_bytes(mut self, max_row_bytes: usize) -> Self {
        self.max_row_bytes = max_row_bytes;
        self
    }

    /// Parse and validate a config from TOML text.
    ///
    /// ```toml
    /// max_key_fields = 8
    /// max_key_bytes = 1024
    /// max_row_bytes = 65536
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_key_fields == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_key_fields",
            });
        }
        if self.max_key_bytes == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_key_bytes",
            });
        }
        if self.max_row_bytes == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_row_bytes",
            });
        }

        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_KEY_FIELDS, DEFAULT_MAX_KEY_BYTES)
    }
}

///
/// TESTS
///

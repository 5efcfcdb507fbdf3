//! Configuration for the comparison pipeline.
//!
//! `CompareConfig` centralizes the behavioral knobs shared by the unification
//! engine, the dumper, and the differ so the same values flow through the
//! whole run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error_codes;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Maximum allowed unified range size in bytes.
    pub max_unified_size: u64,
    /// Byte used for addresses no data record covers.
    pub fill_byte: u8,
    /// Bytes per dump/diff block line; 8 or 16.
    pub block_width: u32,
    /// Treat FF<->00 byte pairs as erased-marker noise.
    pub suppress_erased: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            max_unified_size: 1_048_576,
            fill_byte: 0xFF,
            block_width: 16,
            suppress_erased: false,
        }
    }
}

impl CompareConfig {
    pub fn builder() -> CompareConfigBuilder {
        CompareConfigBuilder {
            inner: CompareConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_width != 8 && self.block_width != 16 {
            return Err(ConfigError::InvalidBlockWidth {
                value: self.block_width,
            });
        }
        if self.max_unified_size == 0 {
            return Err(ConfigError::NonPositiveLimit {
                field: "max_unified_size",
                value: 0,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("block_width must be 8 or 16 (got {value})")]
    InvalidBlockWidth { value: u32 },
    #[error("{field} must be greater than zero (got {value})")]
    NonPositiveLimit { field: &'static str, value: u64 },
    #[error("fill byte must be exactly one hex byte, e.g. FF or 0xFF (got {input:?})")]
    InvalidFillByte { input: String },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidBlockWidth { .. } => error_codes::CONFIG_INVALID_BLOCK_WIDTH,
            ConfigError::NonPositiveLimit { .. } => error_codes::CONFIG_NON_POSITIVE_LIMIT,
            ConfigError::InvalidFillByte { .. } => error_codes::CONFIG_INVALID_FILL_BYTE,
        }
    }
}

/// Parse a one-byte hex value in `FF` or `0xFF` form.
pub fn parse_fill_byte(input: &str) -> Result<u8, ConfigError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() != 2 {
        return Err(ConfigError::InvalidFillByte {
            input: input.to_string(),
        });
    }
    u8::from_str_radix(digits, 16).map_err(|_| ConfigError::InvalidFillByte {
        input: input.to_string(),
    })
}

#[derive(Debug, Clone)]
pub struct CompareConfigBuilder {
    inner: CompareConfig,
}

impl Default for CompareConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompareConfigBuilder {
    pub fn new() -> Self {
        CompareConfig::builder()
    }

    pub fn max_unified_size(mut self, value: u64) -> Self {
        self.inner.max_unified_size = value;
        self
    }

    pub fn fill_byte(mut self, value: u8) -> Self {
        self.inner.fill_byte = value;
        self
    }

    pub fn block_width(mut self, value: u32) -> Self {
        self.inner.block_width = value;
        self
    }

    pub fn suppress_erased(mut self, value: bool) -> Self {
        self.inner.suppress_erased = value;
        self
    }

    pub fn build(self) -> Result<CompareConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

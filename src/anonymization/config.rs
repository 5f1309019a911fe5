//! Detection configuration

use crate::anonymization::anonymizer::{is_valid_mask_char, DEFAULT_MASK_CHAR};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Detection and masking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Path to a custom pattern library TOML file (built-in library if unset)
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// Character used to mask detected spans
    #[serde(default = "default_mask_char")]
    pub mask_char: char,

    /// External address recognizer
    #[serde(default)]
    pub address: AddressRecognizerConfig,
}

fn default_mask_char() -> char {
    DEFAULT_MASK_CHAR
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            pattern_library: None,
            mask_char: default_mask_char(),
            address: AddressRecognizerConfig::default(),
        }
    }
}

impl DetectionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }

        if !is_valid_mask_char(self.mask_char) {
            anyhow::bail!(
                "Invalid mask_char '{}'. Must be a printable ASCII character",
                self.mask_char.escape_default()
            );
        }

        self.address
            .validate()
            .context("Invalid address recognizer configuration")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("PIIGUARD_DETECTION_PATTERN_LIBRARY") {
            self.pattern_library = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        if let Ok(val) = std::env::var("PIIGUARD_DETECTION_MASK_CHAR") {
            let mut chars = val.chars();
            self.mask_char = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => anyhow::bail!("Invalid PIIGUARD_DETECTION_MASK_CHAR: {val}"),
            };
        }

        self.address.apply_env_overrides()?;

        Ok(())
    }
}

/// External address recognizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressRecognizerConfig {
    /// Enable the recognizer
    #[serde(default)]
    pub enabled: bool,

    /// Executable to run
    #[serde(default)]
    pub command: String,

    /// Arguments passed to the executable
    #[serde(default)]
    pub args: Vec<String>,

    /// Time limit for one invocation in milliseconds
    #[serde(default = "default_address_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_address_timeout_ms() -> u64 {
    2000
}

impl Default for AddressRecognizerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: String::new(),
            args: Vec::new(),
            timeout_ms: default_address_timeout_ms(),
        }
    }
}

impl AddressRecognizerConfig {
    /// Validate the recognizer configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled {
            if self.command.trim().is_empty() {
                anyhow::bail!("command is required when the address recognizer is enabled");
            }
            if self.timeout_ms == 0 {
                anyhow::bail!("timeout_ms must be greater than 0");
            }
        }
        Ok(())
    }

    /// Invocation time limit
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("PIIGUARD_DETECTION_ADDRESS_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid PIIGUARD_DETECTION_ADDRESS_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("PIIGUARD_DETECTION_ADDRESS_COMMAND") {
            self.command = val;
        }

        if let Ok(val) = std::env::var("PIIGUARD_DETECTION_ADDRESS_TIMEOUT_MS") {
            self.timeout_ms = val
                .parse()
                .context("Invalid PIIGUARD_DETECTION_ADDRESS_TIMEOUT_MS value")?;
        }

        Ok(())
    }
}

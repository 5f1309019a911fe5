//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the PiiGuard configuration file and its pattern library.

use crate::anonymization::detector::patterns::PatternRegistry;
use crate::config::load_config;
use clap::Args;
use std::sync::Arc;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let registry = match config.detection.pattern_library {
            Some(ref path) => PatternRegistry::from_file(path).map(Arc::new),
            None => PatternRegistry::builtin(),
        };

        let registry = match registry {
            Ok(r) => {
                println!("✅ Pattern library compiled successfully");
                r
            }
            Err(e) => {
                println!("❌ Pattern library is invalid");
                println!("   Error: {e:#}");
                return Ok(2);
            }
        };

        let categories: Vec<&str> = registry.categories().iter().map(|c| c.label()).collect();

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Bind Address: {}", config.server.bind_address);
        println!("  Request Timeout: {} ms", config.server.request_timeout_ms);
        println!("  Max Body Size: {} bytes", config.server.max_body_bytes);
        match config.detection.pattern_library {
            Some(ref path) => println!("  Pattern Library: {}", path.display()),
            None => println!("  Pattern Library: built-in"),
        }
        println!("  Rules: {}", categories.join(", "));
        println!("  Mask Character: {}", config.detection.mask_char);
        if config.detection.address.enabled {
            println!(
                "  Address Recognizer: {} (timeout {} ms)",
                config.detection.address.command, config.detection.address.timeout_ms
            );
        } else {
            println!("  Address Recognizer: disabled");
        }
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();

        Ok(0)
    }
}

//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Sample configuration written by `piiguard init`
pub const SAMPLE_CONFIG: &str = r#"# PiiGuard Configuration File
# PII detection and masking

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[server]
# Address the HTTP API listens on
bind_address = "127.0.0.1:8080"

# Time limit for processing one request
request_timeout_ms = 5000

# Largest accepted request body
max_body_bytes = 1048576

[detection]
# Character used to mask detected PII (printable ASCII)
mask_char = "*"

# Custom pattern library; the built-in library is used when unset
# pattern_library = "${PIIGUARD_PATTERN_LIBRARY}"

[detection.address]
# External address recognizer: reads text on stdin, prints a JSON array of
# {"text", "start", "length", "confidence"} on stdout
enabled = false
command = "python3"
args = ["scripts/detect_addresses.py"]
timeout_ms = 2000

[logging]
# JSON log files with rotation (daily, hourly, never)
local_enabled = false
local_path = "/var/log/piiguard"
local_rotation = "daily"
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "piiguard.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing PiiGuard configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, SAMPLE_CONFIG) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: piiguard validate-config");
                println!("  3. Scan a file: piiguard scan notes.txt");
                println!("  4. Start the API: piiguard serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }
}

//! Configuration management for PiiGuard.
//!
//! PiiGuard uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PIIGUARD_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [server]
//! bind_address = "127.0.0.1:8080"
//! request_timeout_ms = 5000
//!
//! [detection]
//! mask_char = "*"
//! # pattern_library = "${PIIGUARD_PATTERNS}"
//!
//! [detection.address]
//! enabled = false
//!
//! [logging]
//! local_enabled = false
//! local_path = "/var/log/piiguard"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str, load_config_or_default};
pub use schema::{ApplicationConfig, LoggingConfig, PiiGuardConfig, ServerConfig};

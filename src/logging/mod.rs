//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr
//! - JSON-formatted log files with rotation
//! - Configurable log levels
//!
//! Detected values are never logged. Log fields carry categories, counts,
//! offsets and lengths only.
//!
//! # Example
//!
//! ```no_run
//! use piiguard::logging::init_logging;
//! use piiguard::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config)?;
//!
//! tracing::info!("Application started");
//! # Ok::<(), piiguard::domain::PiiGuardError>(())
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the completion of a scan
///
/// # Example
///
/// ```no_run
/// use piiguard::log_scan_complete;
/// use std::time::Duration;
///
/// log_scan_complete!("request", 3, Duration::from_millis(2));
/// ```
#[macro_export]
macro_rules! log_scan_complete {
    ($source:expr, $entities:expr, $duration:expr) => {
        tracing::info!(
            source = $source,
            entities = $entities,
            duration_ms = $duration.as_millis() as u64,
            "Scan completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use piiguard::log_error_with_context;
/// use piiguard::domain::PiiGuardError;
///
/// let error = PiiGuardError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

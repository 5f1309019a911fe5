//! PII detection and masking
//!
//! This module finds personally identifiable information in free text and
//! produces a masked copy of the text in which every detected span is
//! replaced by a run of mask characters of the same length.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Detection**: ordered regex rules from a TOML pattern library, with
//!   optional validators (Luhn, IPv4 octets)
//! - **Masking**: equal-length replacement of every detected span
//! - **Address recognition**: optional external process, best effort
//! - **Reporting**: aggregate statistics over scanned documents
//!
//! # Usage
//!
//! ```rust,ignore
//! use piiguard::anonymization::{config::DetectionConfig, ScanEngine};
//!
//! let engine = ScanEngine::new(&DetectionConfig::default())?;
//! let result = engine.scan_core("Call 020 7123 4567");
//! assert_eq!(result.masked_text, "Call *************");
//! ```

pub mod address;
pub mod anonymizer;
pub mod config;
pub mod detector;
pub mod engine;
pub mod models;
pub mod report;

// Re-export main types
pub use address::{AddressRecognizer, ProcessAddressRecognizer};
pub use anonymizer::MaskingStrategy;
pub use config::DetectionConfig;
pub use detector::{regex::RegexDetector, PiiDetector};
pub use engine::{ScanEngine, ScanResult};
pub use models::{PiiCategory, PiiEntity};
pub use report::ScanReport;

// PiiGuard - PII Detection and Masking
// Copyright (c) 2025 PiiGuard Contributors
// Licensed under the MIT License

//! # PiiGuard - PII detection and masking
//!
//! PiiGuard finds personally identifiable information in free text (UK-centric
//! formats such as postcodes, National Insurance and NHS numbers, plus
//! emails, phone numbers, payment cards, dates of birth and IPv4 addresses)
//! and produces a masked copy in which every detected span is replaced by a
//! run of mask characters of the same length.
//!
//! ## Architecture
//!
//! - [`anonymization`] - Detection core, masking, scan engine and reports
//! - [`server`] - HTTP detection API
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration management
//! - [`domain`] - Error type and `Result` alias
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use piiguard::anonymization::{PiiDetector, RegexDetector};
//!
//! # fn main() -> anyhow::Result<()> {
//! let detector = RegexDetector::new()?;
//!
//! let text = "Contact John at john@example.com or +44 7911 123456";
//! for entity in detector.detect(text) {
//!     println!("{entity}");
//! }
//!
//! assert_eq!(
//!     detector.mask(text),
//!     "Contact John at **************** or ***************"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom pattern libraries
//!
//! Rules are declared in TOML and evaluated in declaration order:
//!
//! ```rust,no_run
//! use piiguard::anonymization::detector::patterns::PatternRegistry;
//! use piiguard::anonymization::{PiiDetector, RegexDetector};
//!
//! # fn main() -> anyhow::Result<()> {
//! let registry = PatternRegistry::from_toml(r#"
//! [[rules]]
//! category = "EMAIL"
//! pattern = '\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b'
//! "#)?;
//!
//! let detector = RegexDetector::with_registry(registry);
//! assert_eq!(detector.detect("a@b.io").len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod server;

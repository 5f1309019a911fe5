//! Scan engine
//!
//! This module provides the [`ScanEngine`] that combines the core regex
//! detector with the optional external address recognizer.
//!
//! # Architecture
//!
//! - **Detector**: finds PII with the pattern registry (never fails)
//! - **Masking**: rewrites the text with equal-length mask runs
//! - **Address recognizer**: best-effort extra findings from an external process
//!
//! The core result is always computed first. The recognizer can only add
//! findings; when it is absent or fails, the core result is returned as is.
//!
//! # Examples
//!
//! ```no_run
//! use piiguard::anonymization::{config::DetectionConfig, ScanEngine};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let engine = ScanEngine::new(&DetectionConfig::default())?;
//!
//! let result = engine.scan("Contact john@example.com").await;
//! assert_eq!(result.masked_text, "Contact ****************");
//! # Ok(())
//! # }
//! ```

use crate::anonymization::{
    address::{AddressRecognizer, ProcessAddressRecognizer},
    anonymizer::MaskingStrategy,
    config::DetectionConfig,
    detector::{patterns::PatternRegistry, regex::RegexDetector, PiiDetector},
    models::PiiEntity,
};
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

/// Result of scanning one text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Detections, core detections first in rule order, then addresses
    pub detected_entities: Vec<PiiEntity>,
    /// Input with every detection masked
    pub masked_text: String,
}

impl ScanResult {
    /// Check if any PII was detected
    pub fn has_detections(&self) -> bool {
        !self.detected_entities.is_empty()
    }
}

/// Scan engine
///
/// Thread-safe; share it across tasks with `Arc`.
#[derive(Clone)]
pub struct ScanEngine {
    detector: Arc<dyn PiiDetector>,
    address_recognizer: Option<Arc<dyn AddressRecognizer>>,
}

impl ScanEngine {
    /// Create a new scan engine from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the pattern
    /// library cannot be loaded or compiled.
    pub fn new(config: &DetectionConfig) -> Result<Self> {
        config.validate()?;

        let registry = match config.pattern_library {
            Some(ref path) => Arc::new(PatternRegistry::from_file(path)?),
            None => PatternRegistry::builtin()?,
        };

        let detector = RegexDetector::with_shared_registry(registry)
            .with_masking(MaskingStrategy::with_mask_char(config.mask_char));

        tracing::info!(
            rules = detector.registry().len(),
            custom_library = config.pattern_library.is_some(),
            "PII detector ready"
        );

        let mut engine = Self::with_detector(Arc::new(detector));

        if config.address.enabled {
            tracing::info!(
                command = %config.address.command,
                timeout_ms = config.address.timeout_ms,
                "Address recognizer enabled"
            );
            engine = engine.with_address_recognizer(Arc::new(ProcessAddressRecognizer::new(
                config.address.command.clone(),
                config.address.args.clone(),
                config.address.timeout(),
            )));
        }

        Ok(engine)
    }

    /// Create an engine around an existing detector, without address recognition
    pub fn with_detector(detector: Arc<dyn PiiDetector>) -> Self {
        Self {
            detector,
            address_recognizer: None,
        }
    }

    /// Attach an address recognizer
    pub fn with_address_recognizer(mut self, recognizer: Arc<dyn AddressRecognizer>) -> Self {
        self.address_recognizer = Some(recognizer);
        self
    }

    /// The core detector
    pub fn detector(&self) -> &Arc<dyn PiiDetector> {
        &self.detector
    }

    /// Whether an address recognizer is attached
    pub fn has_address_recognizer(&self) -> bool {
        self.address_recognizer.is_some()
    }

    /// Detect and mask with the core detector only
    pub fn scan_core(&self, text: &str) -> ScanResult {
        let detected_entities = self.detector.detect(text);
        let masked_text = self.detector.masking().apply(text, &detected_entities);
        ScanResult {
            detected_entities,
            masked_text,
        }
    }

    /// Add address findings to a core result
    ///
    /// Any recognizer failure is logged and `core` is returned unchanged.
    /// Findings whose span does not match `text` are dropped.
    pub async fn add_address_findings(&self, text: &str, core: ScanResult) -> ScanResult {
        let Some(ref recognizer) = self.address_recognizer else {
            return core;
        };
        if text.trim().is_empty() {
            return core;
        }

        let addresses = match recognizer.recognize(text).await {
            Ok(addresses) => addresses,
            Err(e) => {
                tracing::warn!(
                    recognizer = recognizer.name(),
                    error = %e,
                    "Address recognizer failed, using core results only"
                );
                return core;
            }
        };

        let found = addresses.len();
        let addresses: Vec<PiiEntity> = addresses
            .into_iter()
            .filter(|address| address.is_consistent_with(text))
            .collect();
        if addresses.len() < found {
            tracing::debug!(
                recognizer = recognizer.name(),
                dropped = found - addresses.len(),
                "Dropping address findings that do not match the text"
            );
        }
        if addresses.is_empty() {
            return core;
        }

        tracing::debug!(
            recognizer = recognizer.name(),
            addresses = addresses.len(),
            "Address recognizer added findings"
        );
        let mut detected_entities = core.detected_entities;
        detected_entities.extend(addresses);
        let masked_text = self.detector.masking().apply(text, &detected_entities);
        ScanResult {
            detected_entities,
            masked_text,
        }
    }

    /// Scan a text: core detection, then best-effort address recognition
    pub async fn scan(&self, text: &str) -> ScanResult {
        let core = self.scan_core(text);
        self.add_address_findings(text, core).await
    }
}

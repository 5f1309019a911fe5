//! PII detection module
//!
//! Provides the detector capability trait and its regex-based
//! implementation.

pub mod patterns;
pub mod regex;
pub mod validators;

use crate::anonymization::anonymizer::MaskingStrategy;
use crate::anonymization::models::PiiEntity;

/// Trait for PII detection implementations
///
/// Both operations are total: any input, including the empty string, yields
/// a result and never an error.
pub trait PiiDetector: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Detect PII in a text
    fn detect(&self, text: &str) -> Vec<PiiEntity>;

    /// Masking applied by [`mask`](Self::mask)
    fn masking(&self) -> MaskingStrategy {
        MaskingStrategy::default()
    }

    /// Return a copy of `text` with every detection masked
    fn mask(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let entities = self.detect(text);
        self.masking().apply(text, &entities)
    }
}

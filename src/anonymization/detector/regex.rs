//! Regex-based PII detector

use super::{patterns::PatternRegistry, PiiDetector};
use crate::anonymization::anonymizer::MaskingStrategy;
use crate::anonymization::models::PiiEntity;
use anyhow::Result;
use std::sync::Arc;

/// Regex-based PII detector
///
/// Applies every rule of its [`PatternRegistry`] in declaration order.
/// Cheap to clone; the registry is shared.
#[derive(Debug, Clone)]
pub struct RegexDetector {
    pattern_registry: Arc<PatternRegistry>,
    masking: MaskingStrategy,
}

impl RegexDetector {
    /// Create a new regex detector with the built-in patterns
    pub fn new() -> Result<Self> {
        Ok(Self::with_shared_registry(PatternRegistry::builtin()?))
    }

    /// Create a new regex detector with custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self::with_shared_registry(Arc::new(registry))
    }

    /// Create a new regex detector over an already shared registry
    pub fn with_shared_registry(registry: Arc<PatternRegistry>) -> Self {
        Self {
            pattern_registry: registry,
            masking: MaskingStrategy::default(),
        }
    }

    /// Set the masking strategy used by [`PiiDetector::mask`]
    pub fn with_masking(mut self, masking: MaskingStrategy) -> Self {
        self.masking = masking;
        self
    }

    /// The registry this detector evaluates
    pub fn registry(&self) -> &PatternRegistry {
        &self.pattern_registry
    }
}

impl PiiDetector for RegexDetector {
    fn name(&self) -> &str {
        "regex"
    }

    fn detect(&self, text: &str) -> Vec<PiiEntity> {
        if text.is_empty() {
            return Vec::new();
        }

        let entities: Vec<PiiEntity> = self
            .pattern_registry
            .rules()
            .iter()
            .flat_map(|rule| rule.find_entities(text))
            .collect();

        tracing::trace!(
            text_len = text.len(),
            rules = self.pattern_registry.len(),
            detections = entities.len(),
            "Regex detection complete"
        );

        entities
    }

    fn masking(&self) -> MaskingStrategy {
        self.masking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::PiiCategory;
    use test_case::test_case;

    fn detector() -> RegexDetector {
        RegexDetector::new().unwrap()
    }

    #[test_case("test@example.com", "****************")]
    #[test_case("my.email@domain.co.uk", "*********************")]
    #[test_case("+44 7911 123456", "***************")]
    #[test_case("020 7123 4567", "*************")]
    #[test_case("SW1A 1AA", "********")]
    #[test_case("EC1A 1BB", "********")]
    #[test_case("AB123456C", "*********")]
    #[test_case("123 456 7890", "************")]
    #[test_case("123456789", "*********")]
    #[test_case("ABCDE123456FGHIJ", "****************")]
    #[test_case("12-34-56-12345678", "*****************")]
    #[test_case("4532015112830366", "****************")]
    #[test_case("4532 0151 1283 0366", "*******************")]
    #[test_case("5425233430109903", "****************")]
    #[test_case("5425-2334-3010-9903", "*******************")]
    #[test_case("4012888888881881", "****************")]
    #[test_case("1234567812345678", "1234567812345678")]
    #[test_case("Card 4532 0151 1283 0366 12/25", "Card ******************* 12/25")]
    #[test_case("Card 4532015112830366 12 times", "Card **************** 12 times")]
    #[test_case("pay 4532015112830366 123 now", "pay **************** 123 now")]
    #[test_case("no pii here", "no pii here")]
    #[test_case("no postcode here", "no postcode here")]
    #[test_case("no card number here", "no card number here")]
    fn test_mask(input: &str, expected: &str) {
        assert_eq!(detector().mask(input), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case(" " ; "single space")]
    #[test_case("   \t\n" ; "whitespace")]
    fn test_blank_input(input: &str) {
        let detector = detector();
        assert!(detector.detect(input).is_empty());
        assert_eq!(detector.mask(input), input);
    }

    #[test]
    fn test_detect_email_spans_whole_string() {
        let entities = detector().detect("test@example.com");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].category, PiiCategory::Email);
        assert_eq!(entities[0].start_offset, 0);
        assert_eq!(entities[0].length, 16);
        assert_eq!(entities[0].confidence, 1.0);
    }

    #[test]
    fn test_detect_returns_correct_entities() {
        let entities = detector().detect("Email: test@example.com, Phone: +44 7911 123456");

        assert_eq!(entities.len(), 2);
        assert!(entities
            .iter()
            .any(|e| e.category == PiiCategory::Email && e.matched_text == "test@example.com"));
        assert!(entities
            .iter()
            .any(|e| e.category == PiiCategory::PhoneNumber && e.matched_text == "+44 7911 123456"));
    }

    #[test]
    fn test_detect_valid_cards_only() {
        let input = "Valid cards: 4532015112830366 and 5425-2334-3010-9903, but not 1234567812345678";
        let entities = detector().detect(input);

        assert_eq!(entities.len(), 2);
        assert!(entities.iter().all(|e| e.category == PiiCategory::CardNumber));
        assert_eq!(entities[0].matched_text, "4532015112830366");
        assert_eq!(entities[1].matched_text, "5425-2334-3010-9903");
    }

    #[test]
    fn test_card_followed_by_expiry_is_detected() {
        let entities = detector().detect("Card 4532 0151 1283 0366 12/25");
        let card = entities
            .iter()
            .find(|e| e.category == PiiCategory::CardNumber)
            .unwrap();
        assert_eq!(card.matched_text, "4532 0151 1283 0366");
        assert_eq!(card.start_offset, 5);
        assert_eq!(card.length, 19);
    }

    #[test]
    fn test_offsets_are_characters_after_multibyte_text() {
        let entities = detector().detect("Zoë: zoe@example.com");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].start_offset, 5);
        assert_eq!(entities[0].span(), 6..21);
    }

    #[test]
    fn test_mask_multiple_pii() {
        let input = "Contact John at john@example.com or +44 7911 123456. Address: SW1A 1AA";
        let expected = "Contact John at **************** or ***************. Address: ********";
        assert_eq!(detector().mask(input), expected);
    }

    #[test]
    fn test_detect_is_grouped_by_rule_order() {
        // The IP appears first in the text but its rule is evaluated last.
        let entities = detector().detect("10.1.2.3 then someone@example.org");
        let categories: Vec<_> = entities.iter().map(|e| e.category).collect();
        assert_eq!(categories, vec![PiiCategory::Email, PiiCategory::IpAddress]);
    }

    #[test]
    fn test_overlapping_detections_are_kept() {
        let entities = detector().detect("12-34-56-12345678");
        assert!(entities.iter().any(|e| e.category == PiiCategory::BankDetails));
        assert!(entities.iter().any(|e| e.category == PiiCategory::DateOfBirth));
    }

    #[test]
    fn test_custom_registry_and_mask_char() {
        let registry = PatternRegistry::from_toml(
            "[[rules]]\ncategory = \"PASSPORT_NUMBER\"\npattern = '\\b[0-9]{9}\\b'",
        )
        .unwrap();
        let detector =
            RegexDetector::with_registry(registry).with_masking(MaskingStrategy::with_mask_char('X'));

        assert_eq!(detector.mask("a@b.io 123456789"), "a@b.io XXXXXXXXX");
        assert_eq!(detector.registry().len(), 1);
    }

    #[test]
    fn test_detector_is_deterministic() {
        let detector = detector();
        let text = "dob 01/02/1990, ip 192.168.0.1, nhs 943 476 5919";
        assert_eq!(detector.detect(text), detector.detect(text));
    }
}

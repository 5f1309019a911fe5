//! PII entity data models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// PII category enumeration
///
/// Closed set of tags naming the kind of personal data a recognition rule
/// targets. The trailing categories (`Person`, `Address`, `Organization`,
/// `Location`) are reserved for NLP-derived findings and have no built-in
/// pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiCategory {
    /// Email addresses
    Email,
    /// UK landline and mobile telephone numbers
    PhoneNumber,
    /// UK postcodes
    Postcode,
    /// UK National Insurance numbers
    NationalInsuranceNumber,
    /// NHS numbers
    NhsNumber,
    /// UK passport numbers
    PassportNumber,
    /// UK driving licence numbers
    DrivingLicenseNumber,
    /// Sort code followed by account number
    BankDetails,
    /// Credit or debit card numbers
    CardNumber,
    /// Dates of birth
    DateOfBirth,
    /// IPv4 addresses
    IpAddress,

    // Reserved for NLP-derived findings
    /// Person names
    Person,
    /// Free-text postal addresses
    Address,
    /// Organization names
    Organization,
    /// Other location references
    Location,
}

impl PiiCategory {
    /// Every category, in declaration order
    pub const ALL: [PiiCategory; 15] = [
        Self::Email,
        Self::PhoneNumber,
        Self::Postcode,
        Self::NationalInsuranceNumber,
        Self::NhsNumber,
        Self::PassportNumber,
        Self::DrivingLicenseNumber,
        Self::BankDetails,
        Self::CardNumber,
        Self::DateOfBirth,
        Self::IpAddress,
        Self::Person,
        Self::Address,
        Self::Organization,
        Self::Location,
    ];

    /// Get the stable label for the category (matches its serialized form)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::PhoneNumber => "PHONE_NUMBER",
            Self::Postcode => "POSTCODE",
            Self::NationalInsuranceNumber => "NATIONAL_INSURANCE_NUMBER",
            Self::NhsNumber => "NHS_NUMBER",
            Self::PassportNumber => "PASSPORT_NUMBER",
            Self::DrivingLicenseNumber => "DRIVING_LICENSE_NUMBER",
            Self::BankDetails => "BANK_DETAILS",
            Self::CardNumber => "CARD_NUMBER",
            Self::DateOfBirth => "DATE_OF_BIRTH",
            Self::IpAddress => "IP_ADDRESS",
            Self::Person => "PERSON",
            Self::Address => "ADDRESS",
            Self::Organization => "ORGANIZATION",
            Self::Location => "LOCATION",
        }
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PiiCategory {
    type Err = String;

    /// Parse a category name, case-insensitively, accepting a few short aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EMAIL" => Ok(Self::Email),
            "PHONE_NUMBER" | "PHONE" => Ok(Self::PhoneNumber),
            "POSTCODE" => Ok(Self::Postcode),
            "NATIONAL_INSURANCE_NUMBER" | "NINO" => Ok(Self::NationalInsuranceNumber),
            "NHS_NUMBER" | "NHS" => Ok(Self::NhsNumber),
            "PASSPORT_NUMBER" | "PASSPORT" => Ok(Self::PassportNumber),
            "DRIVING_LICENSE_NUMBER" | "DRIVING_LICENCE_NUMBER" | "LICENSE" => {
                Ok(Self::DrivingLicenseNumber)
            }
            "BANK_DETAILS" | "BANK_ACCOUNT" => Ok(Self::BankDetails),
            "CARD_NUMBER" | "CREDIT_CARD" => Ok(Self::CardNumber),
            "DATE_OF_BIRTH" | "DOB" => Ok(Self::DateOfBirth),
            "IP_ADDRESS" => Ok(Self::IpAddress),
            "PERSON" | "NAME" => Ok(Self::Person),
            "ADDRESS" => Ok(Self::Address),
            "ORGANIZATION" | "ORGANISATION" => Ok(Self::Organization),
            "LOCATION" => Ok(Self::Location),
            _ => Err(format!("Unknown PII category: {s}")),
        }
    }
}

/// Detected PII entity
///
/// One confirmed detection. `start_offset` and `length` count characters
/// (Unicode scalar values) and describe the half-open span
/// `[start_offset, start_offset + length)`; they form the serialized
/// contract. The matching byte range of the scanned `&str` is kept alongside
/// for slicing and masking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PiiEntity {
    /// Category of PII
    pub category: PiiCategory,
    /// Matched text, exactly as it appears in the input
    pub matched_text: String,
    /// Start position in the input, in characters
    pub start_offset: usize,
    /// Length of the matched span, in characters
    pub length: usize,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    #[serde(skip)]
    span: Range<usize>,
}

impl PiiEntity {
    /// Create a new PII entity with full confidence
    ///
    /// `byte_start` locates `matched_text` in the scanned text and
    /// `start_offset` is the same position counted in characters.
    pub fn new(
        category: PiiCategory,
        matched_text: impl Into<String>,
        byte_start: usize,
        start_offset: usize,
    ) -> Self {
        let matched_text = matched_text.into();
        Self {
            category,
            span: byte_start..byte_start + matched_text.len(),
            length: matched_text.chars().count(),
            matched_text,
            start_offset,
            confidence: 1.0,
        }
    }

    /// Create an entity for the byte range `span` of `text`
    ///
    /// Returns `None` if `span` is empty, out of bounds, or splits a
    /// character.
    pub fn locate(category: PiiCategory, text: &str, span: Range<usize>) -> Option<Self> {
        let matched = text.get(span.clone()).filter(|m| !m.is_empty())?;
        let start_offset = text[..span.start].chars().count();
        Some(Self::new(category, matched, span.start, start_offset))
    }

    /// Set the confidence score
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Exclusive end of the span, in characters
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.length
    }

    /// Byte range usable for slicing the scanned text
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Check whether the span lies within `text` and covers `matched_text`
    /// at the reported character offset
    pub fn is_consistent_with(&self, text: &str) -> bool {
        self.length > 0
            && text.get(self.span()) == Some(self.matched_text.as_str())
            && text[..self.span.start].chars().count() == self.start_offset
    }
}

impl fmt::Display for PiiEntity {
    // Never includes the matched text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.2}) at {}..{}",
            self.category,
            self.confidence,
            self.start_offset,
            self.end_offset()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_entity_length_follows_matched_text() {
        let entity = PiiEntity::new(PiiCategory::Email, "test@example.com", 4, 4);
        assert_eq!(entity.length, 16);
        assert_eq!(entity.end_offset(), 20);
        assert_eq!(entity.span(), 4..20);
        assert_eq!(entity.confidence, 1.0);
    }

    #[test]
    fn test_offsets_count_characters() {
        let text = "Zoë née Müller: 1 Café Row";
        let start = text.find("1 Café Row").unwrap();
        let entity = PiiEntity::locate(PiiCategory::Address, text, start..text.len()).unwrap();

        assert_eq!(entity.start_offset, 16);
        assert_eq!(entity.length, 10);
        assert_eq!(entity.span(), start..text.len());
        assert_eq!(&text[entity.span()], "1 Café Row");
        assert!(entity.is_consistent_with(text));
    }

    #[test]
    fn test_locate_rejects_invalid_spans() {
        let text = "é@x.io";
        assert!(PiiEntity::locate(PiiCategory::Email, text, 1..7).is_none());
        assert!(PiiEntity::locate(PiiCategory::Email, text, 2..20).is_none());
        assert!(PiiEntity::locate(PiiCategory::Email, text, 2..2).is_none());
    }

    #[test]
    fn test_confidence_is_clamped() {
        let entity = PiiEntity::new(PiiCategory::Address, "1 High St", 0, 0).with_confidence(1.7);
        assert_eq!(entity.confidence, 1.0);

        let entity = entity.with_confidence(-0.2);
        assert_eq!(entity.confidence, 0.0);
    }

    #[test]
    fn test_consistency_with_source_text() {
        let text = "mail me: a@b.io";
        let good = PiiEntity::new(PiiCategory::Email, "a@b.io", 9, 9);
        let shifted = PiiEntity::new(PiiCategory::Email, "a@b.io", 8, 8);
        let out_of_bounds = PiiEntity::new(PiiCategory::Email, "a@b.io", 12, 12);
        let wrong_char_offset = PiiEntity::new(PiiCategory::Email, "a@b.io", 9, 7);

        assert!(good.is_consistent_with(text));
        assert!(!shifted.is_consistent_with(text));
        assert!(!out_of_bounds.is_consistent_with(text));
        assert!(!wrong_char_offset.is_consistent_with(text));
    }

    #[test]
    fn test_serialization_contract() {
        let text = "née 10.0.0.1";
        let entity = PiiEntity::locate(PiiCategory::IpAddress, text, 5..text.len()).unwrap();
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["category"], "IP_ADDRESS");
        assert_eq!(json["matchedText"], "10.0.0.1");
        assert_eq!(json["startOffset"], 4);
        assert_eq!(json["length"], 8);
        assert_eq!(json["confidence"], 1.0);
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_display_hides_value() {
        let entity = PiiEntity::new(PiiCategory::Email, "secret@example.com", 0, 0);
        let rendered = entity.to_string();
        assert_eq!(rendered, "EMAIL (1.00) at 0..18");
        assert!(!rendered.contains("secret"));
    }

    #[test_case("email", PiiCategory::Email)]
    #[test_case("PHONE", PiiCategory::PhoneNumber)]
    #[test_case("card_number", PiiCategory::CardNumber)]
    #[test_case("driving_licence_number", PiiCategory::DrivingLicenseNumber)]
    #[test_case("ip_address", PiiCategory::IpAddress)]
    fn test_parse_category(input: &str, expected: PiiCategory) {
        assert_eq!(input.parse::<PiiCategory>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_category() {
        assert!("shoe_size".parse::<PiiCategory>().is_err());
    }

    #[test]
    fn test_label_round_trips_through_parse() {
        for category in PiiCategory::ALL {
            assert_eq!(category.label().parse::<PiiCategory>().unwrap(), category);
        }
    }
}

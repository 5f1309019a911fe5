//! Post-match validators
//!
//! Structural patterns for card numbers and IP addresses accept far more
//! strings than are real; these checks run on each raw match and reject the
//! ones that fail numeric validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum number of digits in a card number
pub const CARD_MIN_DIGITS: usize = 13;

/// Maximum number of digits in a card number
pub const CARD_MAX_DIGITS: usize = 19;

/// Extra validation applied to a pattern match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// Luhn mod-10 checksum over the digits (separators ignored)
    Luhn,
    /// Four dot-separated decimal octets, each in 0..=255
    Ipv4Octets,
}

impl Validator {
    /// Check whether a matched value passes this validator
    pub fn accepts(&self, matched: &str) -> bool {
        match self {
            Self::Luhn => is_valid_luhn(matched),
            Self::Ipv4Octets => is_valid_ipv4(matched),
        }
    }

    /// Name used in pattern library files
    pub fn name(&self) -> &'static str {
        match self {
            Self::Luhn => "luhn",
            Self::Ipv4Octets => "ipv4_octets",
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Validator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "luhn" => Ok(Self::Luhn),
            "ipv4_octets" | "ipv4" | "ip_octets" => Ok(Self::Ipv4Octets),
            _ => Err(format!("Unknown validator: {s}")),
        }
    }
}

/// Validate a card number with the Luhn algorithm
///
/// Spaces and dashes are stripped first. The remaining string must be
/// 13 to 19 ASCII digits. Starting from the rightmost digit, every second
/// digit is doubled (minus 9 when the result exceeds 9) and the number is
/// valid when the digit sum is a multiple of 10.
pub fn is_valid_luhn(number: &str) -> bool {
    let digits: Vec<u32> = number
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default();

    if !(CARD_MIN_DIGITS..=CARD_MAX_DIGITS).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(idx, &digit)| {
            if idx % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

/// Validate a dotted-quad IPv4 address
///
/// Exactly four parts, each a non-empty run of ASCII digits whose value is
/// at most 255.
pub fn is_valid_ipv4(address: &str) -> bool {
    let octets: Vec<&str> = address.split('.').collect();
    if octets.len() != 4 {
        return false;
    }

    octets.iter().all(|octet| {
        !octet.is_empty()
            && octet.bytes().all(|b| b.is_ascii_digit())
            && octet.parse::<u32>().is_ok_and(|value| value <= 255)
    })
}

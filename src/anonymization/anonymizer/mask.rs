//! Masking strategy - overwrites detected spans with a mask character

use crate::anonymization::models::PiiEntity;
use serde::{Deserialize, Serialize};

/// Default mask character
pub const DEFAULT_MASK_CHAR: char = '*';

/// Masking strategy
///
/// Replaces every detected span with a run of the mask character of the
/// same length, leaving the rest of the text untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingStrategy {
    mask_char: char,
}

impl MaskingStrategy {
    /// Create a masking strategy using `*`
    pub fn new() -> Self {
        Self {
            mask_char: DEFAULT_MASK_CHAR,
        }
    }

    /// Create a masking strategy with a custom mask character
    ///
    /// Only printable ASCII is accepted so that masking keeps byte offsets
    /// stable; anything else falls back to `*`.
    pub fn with_mask_char(mask_char: char) -> Self {
        if is_valid_mask_char(mask_char) {
            Self { mask_char }
        } else {
            tracing::warn!(
                mask_char = %mask_char.escape_unicode(),
                "Unsupported mask character, using '*'"
            );
            Self::new()
        }
    }

    /// The mask character in use
    pub fn mask_char(&self) -> char {
        self.mask_char
    }

    /// Produce the masked copy of `text`
    ///
    /// Entities are applied rightmost-first (descending start, ties
    /// kept in detection order). Each replacement has the same length as the
    /// span it covers, so offsets of spans further left stay valid and
    /// overlapping spans just re-mask already masked characters.
    pub fn apply(&self, text: &str, entities: &[PiiEntity]) -> String {
        if text.is_empty() || entities.is_empty() {
            return text.to_string();
        }

        let mut ordered: Vec<&PiiEntity> = entities.iter().collect();
        ordered.sort_by(|a, b| b.span().start.cmp(&a.span().start));

        let mut result = text.to_string();
        for entity in ordered {
            let span = entity.span();
            let Some(covered) = result.get(span.clone()) else {
                tracing::debug!(
                    start = entity.start_offset,
                    length = entity.length,
                    "Skipping span outside text or char boundaries"
                );
                continue;
            };

            let replacement: String = std::iter::repeat(self.mask_char)
                .take(covered.chars().count())
                .collect();
            result.replace_range(span, &replacement);
        }

        result
    }
}

impl Default for MaskingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

/// Check whether a character can be used as a mask
pub fn is_valid_mask_char(c: char) -> bool {
    c.is_ascii_graphic()
}

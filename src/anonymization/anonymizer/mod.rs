//! Anonymization strategy module
//!
//! Turns detections into a rewritten copy of the input text.

pub mod mask;

pub use mask::{is_valid_mask_char, MaskingStrategy, DEFAULT_MASK_CHAR};

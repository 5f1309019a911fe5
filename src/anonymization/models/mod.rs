//! Data models shared by detection, masking and reporting

pub mod pii_entity;

pub use pii_entity::{PiiCategory, PiiEntity};

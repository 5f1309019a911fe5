//! Result type alias for PiiGuard

use super::errors::PiiGuardError;

/// Result type alias for PiiGuard operations
///
/// # Examples
///
/// ```
/// use piiguard::domain::result::Result;
/// use piiguard::domain::errors::PiiGuardError;
///
/// fn failing_function() -> Result<()> {
///     Err(PiiGuardError::Configuration("mask_char must be printable".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PiiGuardError>;

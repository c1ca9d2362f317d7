//! Validation utilities
//!
//! Precondition helpers that fail with [`ViewError::PreconditionViolation`].

use crate::module::traits::ViewError;

/// Ensure a condition is true, or return a precondition error
///
/// # Example
/// ```rust
/// use module_views::utils::ensure;
///
/// assert!(ensure(1 > 0, "value must be positive").is_ok());
/// ```
pub fn ensure(condition: bool, message: &str) -> Result<(), ViewError> {
    if condition {
        Ok(())
    } else {
        Err(ViewError::PreconditionViolation(message.to_string()))
    }
}

/// Validate a value is not None
///
/// Returns `Ok(value)` if Some, a precondition error naming `name` if None.
pub fn ensure_some<T>(value: Option<T>, name: &str) -> Result<T, ViewError> {
    value.ok_or_else(|| ViewError::PreconditionViolation(format!("{} must be set", name)))
}

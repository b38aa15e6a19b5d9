//! Form error types.

use thiserror::Error;

/// Form-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// No template is registered for the form type.
    #[error("Form type {0} not supported")]
    UnsupportedFormType(String),

    /// The key is not a `section.field` path of the template.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The value does not fit the field's kind.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Qualified field key.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

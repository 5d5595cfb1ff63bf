//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! Nothing here carries a `String` payload that is shown to visitors: the
//! user-facing wording lives on [`FailureReason`](crate::submission::FailureReason).

use crate::submission::FailureReason;

/// Umbrella error for one contact submission attempt.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    /// The form was rejected locally; no outbound call was made.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The relay call was made and failed.
    #[error("delivery error")]
    Delivery(#[from] DeliveryError),
}

impl ContactError {
    /// The status-level reason this error maps to.
    #[must_use]
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::Validation(ValidationError::MissingField) => FailureReason::MissingField,
            Self::Validation(ValidationError::InvalidEmail) => FailureReason::InvalidEmail,
            Self::Delivery(_) => FailureReason::DeliveryFailed,
        }
    }
}

/// Local validation failures. Recoverable by editing the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `name`, `email` or `message` is empty after trimming.
    #[error("missing required field")]
    MissingField,

    /// `email` does not look like `local@domain.tld`.
    #[error("invalid email")]
    InvalidEmail,
}

/// The relay could not deliver the message.
///
/// The source is kept for diagnostics only.
#[derive(Debug, thiserror::Error)]
#[error("message delivery failed")]
pub struct DeliveryError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl DeliveryError {
    /// Wrap any relay-specific error.
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Portfolio content that fails its invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// The owner name is empty.
    #[error("owner name must not be empty")]
    EmptyOwnerName,

    /// The public contact email is not a valid address.
    #[error("contact email {0:?} is not a valid address")]
    InvalidContactEmail(String),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn should_map_validation_errors_to_reasons() {
        let err = ContactError::from(ValidationError::MissingField);
        assert_eq!(err.reason(), FailureReason::MissingField);

        let err = ContactError::from(ValidationError::InvalidEmail);
        assert_eq!(err.reason(), FailureReason::InvalidEmail);
    }

    #[test]
    fn should_map_delivery_error_to_delivery_failed() {
        let err = ContactError::from(DeliveryError::new("connection reset"));
        assert_eq!(err.reason(), FailureReason::DeliveryFailed);
    }

    #[test]
    fn should_keep_delivery_source_for_diagnostics() {
        let err = DeliveryError::new("provider said no");
        assert_eq!(err.to_string(), "message delivery failed");
        assert_eq!(err.source().unwrap().to_string(), "provider said no");
    }

    #[test]
    fn should_display_validation_errors() {
        assert_eq!(
            ValidationError::MissingField.to_string(),
            "missing required field"
        );
        assert_eq!(ValidationError::InvalidEmail.to_string(), "invalid email");
    }
}

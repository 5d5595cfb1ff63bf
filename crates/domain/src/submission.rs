//! Submission status of a contact form and the outcome of one attempt.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::contact::FormState;

/// Why the latest attempt did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    MissingField,
    InvalidEmail,
    DeliveryFailed,
}

impl FailureReason {
    /// The message shown next to the form.
    ///
    /// Delivery failures never expose the underlying cause.
    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            Self::MissingField => "Please fill in all required fields",
            Self::InvalidEmail => "Please enter a valid email address",
            Self::DeliveryFailed => {
                "Failed to send message. Please try again or contact me directly."
            }
        }
    }

    /// Whether the visitor must change the form before resubmitting.
    #[must_use]
    pub fn is_validation(self) -> bool {
        !matches!(self, Self::DeliveryFailed)
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingField => "missing required field",
            Self::InvalidEmail => "invalid email",
            Self::DeliveryFailed => "delivery failed",
        })
    }
}

/// Where a contact form is in its submit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed(FailureReason),
}

impl SubmissionStatus {
    #[must_use]
    pub fn is_sending(self) -> bool {
        matches!(self, Self::Sending)
    }

    #[must_use]
    pub fn is_succeeded(self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// The failure reason, if the last attempt failed.
    #[must_use]
    pub fn failure(self) -> Option<FailureReason> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Sending => f.write_str("sending"),
            Self::Succeeded => f.write_str("succeeded"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Result of a single `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The relay accepted the message.
    Delivered,
    /// Validation or delivery failed; the status carries the same reason.
    Rejected(FailureReason),
    /// Another attempt is still in flight; nothing was done.
    InFlight,
}

impl SubmitOutcome {
    /// The status a fresh submission leaves behind. `None` for [`Self::InFlight`].
    #[must_use]
    pub fn status(self) -> Option<SubmissionStatus> {
        match self {
            Self::Delivered => Some(SubmissionStatus::Succeeded),
            Self::Rejected(reason) => Some(SubmissionStatus::Failed(reason)),
            Self::InFlight => None,
        }
    }
}

/// Point-in-time copy of a form and its status, for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub form: FormState,
    #[serde(flatten)]
    pub status: SubmissionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_idle() {
        assert_eq!(SubmissionStatus::default(), SubmissionStatus::Idle);
    }

    #[test]
    fn should_display_reasons() {
        assert_eq!(
            FailureReason::MissingField.to_string(),
            "missing required field"
        );
        assert_eq!(FailureReason::InvalidEmail.to_string(), "invalid email");
        assert_eq!(FailureReason::DeliveryFailed.to_string(), "delivery failed");
    }

    #[test]
    fn should_use_generic_message_for_delivery_failure() {
        assert_eq!(
            FailureReason::DeliveryFailed.user_message(),
            "Failed to send message. Please try again or contact me directly."
        );
        assert!(!FailureReason::DeliveryFailed.is_validation());
        assert!(FailureReason::InvalidEmail.is_validation());
    }

    #[test]
    fn should_expose_failure_reason() {
        let status = SubmissionStatus::Failed(FailureReason::InvalidEmail);
        assert_eq!(status.failure(), Some(FailureReason::InvalidEmail));
        assert_eq!(SubmissionStatus::Sending.failure(), None);
    }

    #[test]
    fn should_map_outcome_to_status() {
        assert_eq!(
            SubmitOutcome::Delivered.status(),
            Some(SubmissionStatus::Succeeded)
        );
        assert_eq!(
            SubmitOutcome::Rejected(FailureReason::MissingField).status(),
            Some(SubmissionStatus::Failed(FailureReason::MissingField))
        );
        assert_eq!(SubmitOutcome::InFlight.status(), None);
    }

    #[test]
    fn should_serialize_status_with_reason() {
        let json =
            serde_json::to_value(SubmissionStatus::Failed(FailureReason::DeliveryFailed)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "failed", "reason": "delivery_failed"})
        );
        let json = serde_json::to_value(SubmissionStatus::Idle).unwrap();
        assert_eq!(json, serde_json::json!({"status": "idle"}));
    }

    #[test]
    fn should_flatten_status_into_snapshot() {
        let snapshot = FormSnapshot::default();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["status"], "idle");
        assert_eq!(json["form"]["name"], "");
    }
}

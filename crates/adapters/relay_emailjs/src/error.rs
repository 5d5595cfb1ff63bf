//! EmailJS adapter error types.

use folio_domain::error::DeliveryError;

/// Errors specific to the EmailJS relay.
#[derive(Debug, thiserror::Error)]
pub enum EmailJsError {
    /// The request never got a response: connection, TLS or timeout.
    #[error("EmailJS request failed")]
    Transport(#[from] reqwest::Error),

    /// EmailJS answered with a non-success status.
    #[error("EmailJS rejected the message with status {status}: {body}")]
    Rejected {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, usually a short plain-text reason.
        body: String,
    },
}

impl EmailJsError {
    /// Whether the request timed out before EmailJS answered.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }
}

impl From<EmailJsError> for DeliveryError {
    fn from(err: EmailJsError) -> Self {
        DeliveryError::new(err)
    }
}

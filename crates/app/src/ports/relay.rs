//! Relay port — delivery of a contact message through a third-party service.

use std::fmt;
use std::future::Future;

use folio_domain::contact::ContactMessage;
use folio_domain::error::DeliveryError;

/// Identifiers the relay needs to route a message to the right template and
/// account. Supplied by configuration, never hard-coded.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RelayCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Optional secret for providers that require server-side authentication.
    pub private_key: Option<String>,
}

impl fmt::Debug for RelayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayCredentials")
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Delivers a validated contact message.
///
/// One call is one attempt: implementations must not retry on their own.
pub trait MessageRelay {
    /// Send `message` using `credentials`. Resolves once the provider has
    /// accepted or rejected it.
    fn deliver(
        &self,
        credentials: &RelayCredentials,
        message: &ContactMessage,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

impl<T: MessageRelay + Send + Sync> MessageRelay for std::sync::Arc<T> {
    fn deliver(
        &self,
        credentials: &RelayCredentials,
        message: &ContactMessage,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send {
        (**self).deliver(credentials, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_redact_private_key_in_debug_output() {
        let credentials = RelayCredentials {
            service_id: "service_1".to_string(),
            template_id: "template_1".to_string(),
            public_key: "public".to_string(),
            private_key: Some("hunter2".to_string()),
        };
        let debug = format!("{credentials:?}");
        assert!(debug.contains("service_1"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}

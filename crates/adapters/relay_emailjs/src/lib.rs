//! # folio-adapter-relay-emailjs
//!
//! Delivers contact messages through the EmailJS REST API.
//!
//! ## Responsibilities
//! - Translate a validated [`ContactMessage`] into an EmailJS send request
//! - Map transport failures and non-2xx answers to [`DeliveryError`]
//!
//! One call is one HTTP request: no retry and no backoff.
//!
//! ## Dependency rule
//! Depends on `folio-app` (port traits) and `folio-domain` only.

pub mod config;
pub mod error;

use folio_app::ports::{MessageRelay, RelayCredentials};
use folio_domain::contact::ContactMessage;
use folio_domain::error::DeliveryError;
use serde::Serialize;

pub use config::EmailJsConfig;
pub use error::EmailJsError;

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

impl<'a> SendRequest<'a> {
    fn new(credentials: &'a RelayCredentials, message: &'a ContactMessage) -> Self {
        Self {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.public_key,
            access_token: credentials.private_key.as_deref(),
            template_params: TemplateParams {
                name: message.name(),
                email: message.email().as_ref(),
                subject: message.subject(),
                message: message.message(),
            },
        }
    }
}

/// [`MessageRelay`] backed by the EmailJS HTTP API.
#[derive(Debug, Clone)]
pub struct EmailJsRelay {
    client: reqwest::Client,
    send_url: String,
}

impl EmailJsRelay {
    /// Build a relay with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`EmailJsError::Transport`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: &EmailJsConfig) -> Result<Self, EmailJsError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            send_url: config.send_url(),
        })
    }

    /// Send one message and report the EmailJS-specific outcome.
    ///
    /// # Errors
    ///
    /// Returns [`EmailJsError::Transport`] when no response arrives in time
    /// and [`EmailJsError::Rejected`] for any non-2xx status.
    #[tracing::instrument(skip_all, fields(service_id = %credentials.service_id))]
    pub async fn send(
        &self,
        credentials: &RelayCredentials,
        message: &ContactMessage,
    ) -> Result<(), EmailJsError> {
        let response = self
            .client
            .post(&self.send_url)
            .json(&SendRequest::new(credentials, message))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%status, "EmailJS accepted message");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(EmailJsError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

impl MessageRelay for EmailJsRelay {
    async fn deliver(
        &self,
        credentials: &RelayCredentials,
        message: &ContactMessage,
    ) -> Result<(), DeliveryError> {
        self.send(credentials, message)
            .await
            .map_err(DeliveryError::from)
    }
}

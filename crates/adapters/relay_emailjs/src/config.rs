//! EmailJS client configuration.

use std::time::Duration;

use serde::Deserialize;

/// Public EmailJS API host.
pub const DEFAULT_BASE_URL: &str = "https://api.emailjs.com";

/// Transport settings for the EmailJS client.
///
/// Account identifiers are not part of this struct; they travel with every
/// call as [`folio_app::ports::RelayCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmailJsConfig {
    /// Scheme and host of the API, without trailing path.
    pub base_url: String,
    /// Upper bound for one send request, in seconds.
    pub timeout_secs: u64,
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl EmailJsConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of the send endpoint.
    #[must_use]
    pub fn send_url(&self) -> String {
        format!("{}/api/v1.0/email/send", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = EmailJsConfig::default();
        assert_eq!(config.base_url, "https://api.emailjs.com");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn should_build_send_url_without_double_slash() {
        let config = EmailJsConfig {
            base_url: "http://127.0.0.1:9000/".to_string(),
            ..EmailJsConfig::default()
        };
        assert_eq!(config.send_url(), "http://127.0.0.1:9000/api/v1.0/email/send");
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: EmailJsConfig = toml::from_str("timeout_secs = 3").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 3);
    }
}

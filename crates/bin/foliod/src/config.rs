//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `folio.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::Path;
use std::time::Duration;

use folio_adapter_http_axum::sessions::SessionLimits;
use folio_adapter_relay_emailjs::EmailJsConfig;
use folio_adapter_relay_emailjs::config::DEFAULT_BASE_URL;
use folio_app::ports::RelayCredentials;
use folio_app::services::contact_form::ContactConfig;
use serde::Deserialize;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "folio.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Portfolio content file.
    pub content: ContentConfig,
    /// EmailJS relay settings.
    pub relay: RelayConfig,
    /// Contact form and session settings.
    pub contact: ContactSettings,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Where the portfolio content lives.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Path to the TOML content file.
    pub path: String,
}

/// EmailJS account and transport settings.
#[derive(Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Optional access token for accounts that require it.
    pub private_key: Option<String>,
    pub base_url: String,
    /// Upper bound for one send request, in seconds.
    pub timeout_secs: u64,
}

/// Contact form timing and session registry limits.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    /// How long the success message stays visible, in milliseconds.
    pub success_display_ms: u64,
    /// Idle time before a visitor session is dropped, in seconds.
    pub session_ttl_secs: u64,
    /// Maximum number of live visitor sessions.
    pub session_capacity: usize,
    /// How often expired sessions are swept, in seconds.
    pub sweep_interval_secs: u64,
}

impl Config {
    /// Load configuration from `folio.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("FOLIO_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("FOLIO_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("FOLIO_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("FOLIO_CONTENT") {
            self.content.path = val;
        }
        if let Some(val) = var("FOLIO_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("FOLIO_EMAILJS_SERVICE_ID") {
            self.relay.service_id = val;
        }
        if let Some(val) = var("FOLIO_EMAILJS_TEMPLATE_ID") {
            self.relay.template_id = val;
        }
        if let Some(val) = var("FOLIO_EMAILJS_PUBLIC_KEY") {
            self.relay.public_key = val;
        }
        if let Some(val) = var("FOLIO_EMAILJS_PRIVATE_KEY") {
            self.relay.private_key = Some(val).filter(|key| !key.is_empty());
        }
        if let Some(val) = var("FOLIO_EMAILJS_BASE_URL") {
            self.relay.base_url = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.content.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content path must not be empty".to_string(),
            ));
        }
        if self.relay.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "relay timeout must be non-zero".to_string(),
            ));
        }
        if self.contact.session_capacity == 0 {
            return Err(ConfigError::Validation(
                "session capacity must be non-zero".to_string(),
            ));
        }
        if self.contact.sweep_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "session sweep interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Settings handed to every contact form controller.
    #[must_use]
    pub fn contact_config(&self) -> ContactConfig {
        ContactConfig {
            credentials: self.relay.credentials(),
            success_display: Duration::from_millis(self.contact.success_display_ms),
        }
    }

    #[must_use]
    pub fn session_limits(&self) -> SessionLimits {
        SessionLimits {
            ttl: Duration::from_secs(self.contact.session_ttl_secs),
            capacity: self.contact.session_capacity,
        }
    }
}

impl RelayConfig {
    #[must_use]
    pub fn credentials(&self) -> RelayCredentials {
        RelayCredentials {
            service_id: self.service_id.clone(),
            template_id: self.template_id.clone(),
            public_key: self.public_key.clone(),
            private_key: self.private_key.clone(),
        }
    }

    /// Transport settings for the EmailJS client.
    #[must_use]
    pub fn emailjs(&self) -> EmailJsConfig {
        EmailJsConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Whether every identifier EmailJS requires is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !(self.service_id.is_empty() || self.template_id.is_empty() || self.public_key.is_empty())
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("credentials", &self.credentials())
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ContactSettings {
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "foliod=info,folio=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: "content/portfolio.toml".to_string(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            private_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: EmailJsConfig::default().timeout_secs,
        }
    }
}

impl Default for ContactSettings {
    fn default() -> Self {
        let limits = SessionLimits::default();
        Self {
            success_display_ms: 5_000,
            session_ttl_secs: limits.ttl.as_secs(),
            session_capacity: limits.capacity,
            sweep_interval_secs: 60,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.content.path, "content/portfolio.toml");
        assert_eq!(config.relay.base_url, "https://api.emailjs.com");
        assert_eq!(config.relay.timeout_secs, 10);
        assert_eq!(config.contact.success_display_ms, 5_000);
        assert_eq!(config.contact.session_ttl_secs, 1_800);
        assert_eq!(config.contact.session_capacity, 10_000);
        assert!(!config.relay.is_configured());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [logging]
            filter = 'debug'

            [content]
            path = '/srv/folio/portfolio.toml'

            [relay]
            service_id = 'service_1'
            template_id = 'template_1'
            public_key = 'public_1'
            private_key = 'secret'
            base_url = 'http://localhost:8025'
            timeout_secs = 3

            [contact]
            success_display_ms = 2500
            session_ttl_secs = 600
            session_capacity = 50
            sweep_interval_secs = 5
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.content.path, "/srv/folio/portfolio.toml");
        assert!(config.relay.is_configured());
        assert_eq!(config.relay.emailjs().send_url(), "http://localhost:8025/api/v1.0/email/send");
        assert_eq!(config.relay.emailjs().timeout(), Duration::from_secs(3));

        let contact = config.contact_config();
        assert_eq!(contact.success_display, Duration::from_millis(2_500));
        assert_eq!(contact.credentials.private_key.as_deref(), Some("secret"));

        let limits = config.session_limits();
        assert_eq!(limits.ttl, Duration::from_secs(600));
        assert_eq!(limits.capacity, 50);
        assert_eq!(config.contact.sweep_interval(), Duration::from_secs(5));
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_apply_environment_overrides() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[
            ("FOLIO_BIND", "127.0.0.1:8080"),
            ("FOLIO_CONTENT", "/tmp/content.toml"),
            ("FOLIO_LOG", "debug"),
            ("FOLIO_EMAILJS_SERVICE_ID", "service_env"),
            ("FOLIO_EMAILJS_TEMPLATE_ID", "template_env"),
            ("FOLIO_EMAILJS_PUBLIC_KEY", "public_env"),
            ("FOLIO_EMAILJS_BASE_URL", "http://relay.test"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.content.path, "/tmp/content.toml");
        assert_eq!(config.logging.filter, "debug");
        assert!(config.relay.is_configured());
        assert_eq!(config.relay.base_url, "http://relay.test");
        assert!(config.relay.private_key.is_none());
    }

    #[test]
    fn should_prefer_rust_log_over_folio_log() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[("FOLIO_LOG", "debug"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_invalid_port_override() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[("FOLIO_PORT", "not-a-port")]));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_treat_empty_private_key_as_unset() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[("FOLIO_EMAILJS_PRIVATE_KEY", "")]));
        assert!(config.relay.private_key.is_none());
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_session_capacity() {
        let mut config = Config::default();
        config.contact.session_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_not_leak_private_key_in_debug_output() {
        let mut config = Config::default();
        config.relay.private_key = Some("hunter2".to_string());
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}

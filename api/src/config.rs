use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Client settings, embedded at build time as TOML.
/// Every field has a default so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin plus the `/api` prefix, without a trailing slash.
    pub api_base_url: String,
    pub notification_poll_secs: u64,
    pub chat_poll_secs: u64,
    pub payment_poll_secs: u64,
    /// How long after sending a chat message its author may still edit it.
    pub message_edit_window_secs: i64,
    pub message_delete_window_secs: i64,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            notification_poll_secs: 30,
            chat_poll_secs: 5,
            payment_poll_secs: 5,
            message_edit_window_secs: 300,
            message_delete_window_secs: 300,
            log_filter: "info".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: ClientConfig =
            toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = Url::parse(&self.api_base_url)
            .map_err(|_| ConfigError::InvalidBaseUrl(self.api_base_url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url.clone()));
        }

        let intervals = [
            ("notification_poll_secs", self.notification_poll_secs),
            ("chat_poll_secs", self.chat_poll_secs),
            ("payment_poll_secs", self.payment_poll_secs),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(ConfigError::NonPositive(name));
            }
        }
        if self.message_edit_window_secs <= 0 {
            return Err(ConfigError::NonPositive("message_edit_window_secs"));
        }
        if self.message_delete_window_secs <= 0 {
            return Err(ConfigError::NonPositive("message_delete_window_secs"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_and_trims_slash() {
        let config = ClientConfig::from_toml_str(
            "api_base_url = \"https://freela.example.com/api/\"\nchat_poll_secs = 10\n",
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://freela.example.com/api");
        assert_eq!(config.chat_poll_secs, 10);
        assert_eq!(config.notification_poll_secs, 30);
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = ClientConfig::from_toml_str("api_base_url = \"not a url\"").unwrap_err();
        assert_eq!(err, ConfigError::InvalidBaseUrl("not a url".to_string()));

        let err = ClientConfig::from_toml_str("api_base_url = \"ftp://host/api\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = ClientConfig::from_toml_str("payment_poll_secs = 0").unwrap_err();
        assert_eq!(err, ConfigError::NonPositive("payment_poll_secs"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            ClientConfig::from_toml_str("chat_poll_secs = \"fast\""),
            Err(ConfigError::Parse(_))
        ));
    }
}

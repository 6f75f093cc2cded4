//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc, time::Duration};

use serde::Deserialize;

use crate::base::prompts;

use super::types::Res;

/// Default port for the liveness endpoint.
fn default_port() -> u16 {
    10000
}

/// Default interface for the liveness endpoint.
fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

/// Default OpenAI model to use.
fn default_completion_model() -> String {
    "gpt-3.5-turbo".to_string()
}

/// Default system directive sent with every completion request.
fn default_system_directive() -> String {
    prompts::SYSTEM_DIRECTIVE.to_string()
}

/// Default completion timeout, in seconds.
fn default_completion_timeout_secs() -> u64 {
    120
}

/// Configuration for the mention-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The shared, immutable configuration values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Configuration values, as read from the environment and config file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// OpenAI API key (`API_KEY`).
    pub api_key: String,
    /// Slack bot token (`BOT_TOKEN`).
    pub bot_token: String,
    /// Slack app-level token used for the socket mode connection (`APP_TOKEN`).
    pub app_token: String,
    /// Port for the liveness endpoint (`PORT`).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Interface for the liveness endpoint (`BIND_HOST`).
    #[serde(default = "default_bind_host")]
    pub bind_host: String,
    /// OpenAI model to use (`COMPLETION_MODEL`).
    #[serde(default = "default_completion_model")]
    pub completion_model: String,
    /// System directive sent ahead of the user message (`SYSTEM_DIRECTIVE`).
    #[serde(default = "default_system_directive")]
    pub system_directive: String,
    /// Optional override of the OpenAI API base URL (`API_BASE`).
    #[serde(default)]
    pub api_base: Option<String>,
    /// Upper bound on a single completion call, in seconds (`COMPLETION_TIMEOUT_SECS`).
    #[serde(default = "default_completion_timeout_secs")]
    pub completion_timeout_secs: u64,
}

impl ConfigInner {
    /// The completion timeout as a [`Duration`].
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }
}

impl Config {
    /// Load the configuration from the process environment, layering an optional TOML file on top.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        Self::load_from(explicit_path, None)
    }

    /// Load the configuration, reading environment keys from `env` instead of the process
    /// environment when it is provided.
    pub fn load_from(explicit_path: Option<&std::path::Path>, env: Option<config::Map<String, String>>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().source(env));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.completion_timeout_secs < 1 {
            return Err(anyhow::anyhow!("Completion timeout must be at least 1 second."));
        }

        Ok(result)
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![("API_KEY", "sk-test"), ("BOT_TOKEN", "xoxb-test"), ("APP_TOKEN", "xapp-test")]
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::load_from(None, Some(env(&required()))).unwrap();

        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.bot_token, "xoxb-test");
        assert_eq!(config.app_token, "xapp-test");
        assert_eq!(config.port, 10000);
        assert_eq!(config.bind_host, "0.0.0.0");
        assert_eq!(config.completion_model, "gpt-3.5-turbo");
        assert_eq!(config.system_directive, "You are a helpful Slack assistant.");
        assert_eq!(config.api_base, None);
        assert_eq!(config.completion_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_config_port_from_env() {
        let mut pairs = required();
        pairs.push(("PORT", "8080"));

        let config = Config::load_from(None, Some(env(&pairs))).unwrap();

        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_config_invalid_port_is_fatal() {
        let mut pairs = required();
        pairs.push(("PORT", "not-a-port"));

        assert!(Config::load_from(None, Some(env(&pairs))).is_err());
    }

    #[test]
    fn test_config_missing_credentials_is_fatal() {
        let result = Config::load_from(None, Some(env(&[("API_KEY", "sk-test")])));

        assert!(result.is_err());
    }

    #[test]
    fn test_config_overrides() {
        let mut pairs = required();
        pairs.push(("COMPLETION_MODEL", "gpt-4.1-mini"));
        pairs.push(("API_BASE", "http://localhost:1234/v1"));
        pairs.push(("COMPLETION_TIMEOUT_SECS", "5"));

        let config = Config::load_from(None, Some(env(&pairs))).unwrap();

        assert_eq!(config.completion_model, "gpt-4.1-mini");
        assert_eq!(config.api_base.as_deref(), Some("http://localhost:1234/v1"));
        assert_eq!(config.completion_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_zero_timeout_is_rejected() {
        let mut pairs = required();
        pairs.push(("COMPLETION_TIMEOUT_SECS", "0"));

        assert!(Config::load_from(None, Some(env(&pairs))).is_err());
    }
}

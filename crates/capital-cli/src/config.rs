/*
[INPUT]:  YAML configuration file and CAPITAL_* environment variables
[OUTPUT]: Parsed CLI configuration, credentials, and client configuration
[POS]:    Configuration layer - login and endpoint setup
[UPDATE]: When adding new configuration options
*/

use std::fmt;

use anyhow::{Context, Result, bail};
use capital_adapter::{ClientConfig, Credentials, Environment};
use serde::{Deserialize, Serialize};

pub const API_KEY_ENV: &str = "CAPITAL_API_KEY";
pub const IDENTIFIER_ENV: &str = "CAPITAL_IDENTIFIER";
pub const PASSWORD_ENV: &str = "CAPITAL_PASSWORD";

/// Top-level configuration for the command-line client
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    /// Use the demo environment instead of live
    #[serde(default)]
    pub demo: bool,
    /// API key generated in the platform settings
    #[serde(default)]
    pub api_key: String,
    /// Login identifier (usually the account e-mail)
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
    /// Account used when a command does not name one
    #[serde(default)]
    pub default_account_id: Option<String>,
    #[serde(default)]
    pub live_base_url: Option<String>,
    #[serde(default)]
    pub demo_base_url: Option<String>,
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("read config file {path}"))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("parse YAML config")?;
        Ok(config)
    }

    /// Let CAPITAL_API_KEY, CAPITAL_IDENTIFIER and CAPITAL_PASSWORD win over the file
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());
        if let Some(api_key) = non_empty(API_KEY_ENV) {
            self.api_key = api_key;
        }
        if let Some(identifier) = non_empty(IDENTIFIER_ENV) {
            self.identifier = identifier;
        }
        if let Some(password) = non_empty(PASSWORD_ENV) {
            self.password = password;
        }
    }

    pub fn environment(&self) -> Environment {
        Environment::from_demo(self.demo)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.api_key, &self.identifier, &self.password)
    }

    pub fn client_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            live_base_url: self
                .live_base_url
                .clone()
                .unwrap_or(defaults.live_base_url),
            demo_base_url: self
                .demo_base_url
                .clone()
                .unwrap_or(defaults.demo_base_url),
            ..defaults
        }
    }

    /// Account named on the command line, else the configured default
    pub fn resolve_account(&self, explicit: Option<&str>) -> Result<String> {
        match explicit.or(self.default_account_id.as_deref()) {
            Some(account_id) if !account_id.is_empty() => Ok(account_id.to_string()),
            _ => bail!("no account given: pass --account or set default_account_id in the config"),
        }
    }
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("demo", &self.demo)
            .field("api_key", &"<redacted>")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .field("default_account_id", &self.default_account_id)
            .field("live_base_url", &self.live_base_url)
            .field("demo_base_url", &self.demo_base_url)
            .finish()
    }
}

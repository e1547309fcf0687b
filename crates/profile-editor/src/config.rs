/*
[INPUT]:  YAML configuration file and PROFILE_EDITOR__* environment variables
[OUTPUT]: Parsed editor configuration
[POS]:    Configuration layer - service and session setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use config::{Config, Environment, File, FileFormat};
use profile_adapter::{ClientConfig, MAX_TOKEN_TTL_SECS};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `PROFILE_EDITOR__SESSION__TOKEN`
pub const ENV_PREFIX: &str = "PROFILE_EDITOR";

/// Top-level configuration for the profile editor
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// User service connection
    #[serde(default)]
    pub api: ApiConfig,
    /// Signed-in user and credentials
    pub session: SessionConfig,
    /// Optional country list replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries_path: Option<PathBuf>,
    /// Directory for the TUI log file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Identifier of the signed-in user
    pub user_id: String,
    /// Bearer token; without one the session is signed out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

fn default_base_url() -> String {
    profile_adapter::http::client::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_token_ttl_secs() -> u64 {
    3600
}

impl AppConfig {
    /// Load configuration from a YAML file with environment overrides applied
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Self::build(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load configuration from a YAML file only
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        Self::build(path, Environment::with_prefix(ENV_PREFIX).source(Some(Default::default())))
    }

    fn build(path: &Path, env: Environment) -> anyhow::Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Yaml))
            .add_source(env.separator("__").try_parsing(true))
            .build()
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = settings
            .try_deserialize()
            .with_context(|| format!("parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot express
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.session.user_id.trim().is_empty() {
            bail!("session.user_id must not be empty");
        }
        if self.api.timeout_secs == 0 || self.api.connect_timeout_secs == 0 {
            bail!("api timeouts must be greater than zero");
        }
        if self.session.token.as_deref().is_some_and(|token| token.trim().is_empty()) {
            bail!("session.token must not be blank when set");
        }
        if self.session.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            bail!("session.token_ttl_secs must be at most {MAX_TOKEN_TTL_SECS}");
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }
}

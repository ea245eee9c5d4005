use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;

use crate::constants::{defaults, env};
use crate::error::AdvisorError;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Some(defaults::LLM_BASE_URL.to_string()),
            model: defaults::LLM_MODEL.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::MARKET_BASE_URL.to_string(),
            user_agent: defaults::MARKET_USER_AGENT.to_string(),
            timeout_secs: defaults::MARKET_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Upper bound on tool-calling rounds for a single advice request
    pub max_tool_rounds: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            max_tool_rounds: defaults::MAX_TOOL_ROUNDS,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub market: MarketConfig,
    pub advisor: AdvisorConfig,
}

impl AppConfig {
    /// Read `config.yaml` (or `$ADVISOR_CONFIG`) and the LLM key from the environment.
    pub fn load() -> Result<Self, AdvisorError> {
        let config_path =
            std::env::var(env::CONFIG_PATH).unwrap_or_else(|_| defaults::CONFIG_PATH.to_string());

        let content = match fs::read_to_string(&config_path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Self::from_sources(content.as_deref(), std::env::var(env::LLM_API_KEY).ok())
    }

    pub fn from_sources(yaml: Option<&str>, env_api_key: Option<String>) -> Result<Self, AdvisorError> {
        let mut config: AppConfig = match yaml {
            Some(content) => {
                // Strip BOM if present
                let content = content.strip_prefix('\u{feff}').unwrap_or(content);
                if content.trim().is_empty() {
                    AppConfig::default()
                } else {
                    serde_yaml::from_str(content)?
                }
            }
            None => AppConfig::default(),
        };

        if let Some(key) = env_api_key.filter(|k| !k.trim().is_empty()) {
            config.llm.api_key = Some(key);
        }

        match &config.llm.api_key {
            Some(key) if !key.trim().is_empty() => Ok(config),
            _ => Err(AdvisorError::Config(format!(
                "{} not found in environment variables",
                env::LLM_API_KEY
            ))),
        }
    }
}

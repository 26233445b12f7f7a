use bank_auth::{AuthClientConfig, TransportConfig, ValidatorConfig, DEFAULT_LOGIN_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::AppError;

/// Default location of the config file
pub const DEFAULT_CONFIG_PATH: &str = "mybank.toml";

/// Application configuration, read from a TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub auth: AuthSettings,
    pub validation: ValidationSettings,
}

/// Login endpoint and HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_LOGIN_ENDPOINT.to_string(),
            timeout_secs: 60,
            connect_timeout_secs: 10,
            user_agent: "MyBank/0.1.0".to_string(),
        }
    }
}

/// Extra input rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub require_cpf_check_digits: bool,
}

impl AppConfig {
    /// Load config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn auth_client_config(&self) -> AuthClientConfig {
        AuthClientConfig {
            endpoint: self.auth.endpoint.clone(),
            transport: TransportConfig {
                timeout: Duration::from_secs(self.auth.timeout_secs),
                connect_timeout: Duration::from_secs(self.auth.connect_timeout_secs),
                user_agent: self.auth.user_agent.clone(),
            },
        }
    }

    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            require_cpf_check_digits: self.validation.require_cpf_check_digits,
        }
    }
}

use bank_auth::TransportError;
use thiserror::Error;

/// Central error types for the MyBank app
#[derive(Debug, Error)]
pub enum AppError {
    /// Filesystem error (config file, stdin)
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),
    /// Config file is not valid TOML or has wrong types
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
    /// HTTP client could not be set up
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    /// Login task ended without a result
    #[error("Login task failed: {0}")]
    Task(String),
}

/// User-friendly error messages for the terminal
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Filesystem(_) => "Error accessing files. Please check permissions.".to_string(),
            AppError::Config(e) => format!("The configuration file is invalid: {}", e.message()),
            AppError::Transport(_) => "Could not prepare the network connection.".to_string(),
            AppError::Task(_) => "The login was interrupted. Please try again.".to_string(),
        }
    }
}

// src/infra/errors.rs — Error types for code-agent

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    // Blocks every workflow before it starts
    #[error("Configuration error: {0}")]
    Configuration(String),

    // Blocks only the generate workflow; no network call is made
    #[error("{0}")]
    Validation(String),

    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    #[error("Nothing to {action}: generate code first.")]
    EmptyHistory { action: String },

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgentError {
    pub fn validation(message: impl Into<String>) -> Self {
        AgentError::Validation(message.into())
    }

    pub fn empty_history(action: impl Into<String>) -> Self {
        AgentError::EmptyHistory {
            action: action.into(),
        }
    }

    /// Warnings are reported to the user but leave the session usable
    /// without any state having changed.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            AgentError::Validation(_) | AgentError::EmptyHistory { .. }
        )
    }
}

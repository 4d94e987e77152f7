// src/infra/session.rs — Session management
//
// A session owns everything that must not outlive one user's run: the
// credential (memory only, never persisted) and the interaction history.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::history::HistoryStore;
use crate::infra::errors::AgentError;

/// Provider credential. Its `Debug` form never shows the secret.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(raw: impl Into<String>) -> Result<Self, AgentError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AgentError::Configuration(
                "Please enter your API key to continue.".into(),
            ));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(AgentError::Configuration(
                "API key must not contain whitespace.".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub history: HistoryStore,
    api_key: ApiKey,
}

impl Session {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            history: HistoryStore::new(),
            api_key,
        }
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}

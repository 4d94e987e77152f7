// src/core/types.rs — Core domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::infra::errors::AgentError;

/// Labels offered by the language selector. Anything else is still accepted.
pub const KNOWN_LANGUAGES: &[&str] = &[
    "Python",
    "JavaScript",
    "Java",
    "C++",
    "C#",
    "Go",
    "Ruby",
    "PHP",
    "Swift",
    "Rust",
    "TypeScript",
];

/// Selector entry that asks for a free-form label instead.
pub const OTHER_LANGUAGE: &str = "Other";

/// Target language label. Open by design: any non-empty text is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language(String);

impl Language {
    pub fn parse(raw: &str) -> Result<Self, AgentError> {
        let label = raw.trim();
        if label.is_empty() {
            return Err(AgentError::validation("Please specify a programming language."));
        }
        if label.eq_ignore_ascii_case(OTHER_LANGUAGE) {
            return Err(AgentError::validation("Please type your custom language."));
        }
        let language = Self(label.to_string());
        if !language.is_known() {
            match language.closest_known() {
                Some(guess) => tracing::warn!(
                    "Unrecognised language '{}' (did you mean '{}'?); using it as given",
                    label,
                    guess
                ),
                None => tracing::debug!("Using custom language '{}'", label),
            }
        }
        Ok(language)
    }

    /// Resolve a selector choice, where `Other` defers to the custom entry.
    pub fn from_selection(choice: &str, custom: Option<&str>) -> Result<Self, AgentError> {
        if choice.trim().eq_ignore_ascii_case(OTHER_LANGUAGE) {
            Self::parse(custom.unwrap_or(""))
        } else {
            Self::parse(choice)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased label, used for code fences and download file extensions.
    pub fn lowercase(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn is_known(&self) -> bool {
        KNOWN_LANGUAGES
            .iter()
            .any(|k| k.eq_ignore_ascii_case(&self.0))
    }

    /// Nearest known label by edit similarity, if it is close enough to be a typo.
    pub fn closest_known(&self) -> Option<&'static str> {
        let lower = self.lowercase();
        KNOWN_LANGUAGES
            .iter()
            .map(|k| (*k, strsim::normalized_levenshtein(&lower, &k.to_lowercase())))
            .filter(|(_, score)| *score >= 0.6)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(k, _)| k)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stored turn. Never mutated after it enters the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// The request actually sent: rewritten and/or context-prefixed.
    pub prompt: String,
    pub language: Language,
    /// Raw generation output.
    pub response: String,
    pub created_at: DateTime<Utc>,
}

impl InteractionRecord {
    pub fn new(prompt: impl Into<String>, language: Language, response: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            language,
            response: response.into(),
            created_at: Utc::now(),
        }
    }
}

/// Per-call toggles, rebuilt from the current UI/CLI state every time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationConfig {
    pub include_explanation: bool,
    pub show_code_only: bool,
    pub enhance_prompt: bool,
    pub context_code: Option<String>,
}

/// What the user asked for in one generate action.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub user_input: String,
    pub language: String,
    pub config: GenerationConfig,
}

impl GenerationRequest {
    pub fn new(user_input: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            language: language.into(),
            config: GenerationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }
}

/// Workflow stages, reported through `ProgressEvent::Stage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Idle,
    Validating,
    Rewriting,
    Generating,
    Recording,
    Reviewing,
    Done,
    Error,
}

impl std::fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WorkflowStage::Idle => "idle",
            WorkflowStage::Validating => "validating",
            WorkflowStage::Rewriting => "rewriting",
            WorkflowStage::Generating => "generating",
            WorkflowStage::Recording => "recording",
            WorkflowStage::Reviewing => "reviewing",
            WorkflowStage::Done => "done",
            WorkflowStage::Error => "error",
        };
        f.write_str(s)
    }
}

/// Real-time events emitted by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Stage(WorkflowStage),
    PromptRewritten { rewritten: String },
    Recorded { history_len: usize },
    Failed { message: String },
}

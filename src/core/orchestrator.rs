// src/core/orchestrator.rs — Generate / review / export workflows

use std::sync::Arc;

use super::chains::ConversationChains;
use super::prompt;
use super::render;
use super::types::*;
use crate::export::{self, Artifact};
use crate::infra::config::ModelConfig;
use crate::infra::errors::AgentError;
use crate::infra::session::Session;
use crate::provider::ModelProvider;

/// Drives one user action at a time against a session.
///
/// Every workflow borrows the session for its whole duration, so two chain
/// calls can never overlap within one session.
pub struct Orchestrator {
    chains: ConversationChains,
    on_progress: Option<Box<dyn Fn(ProgressEvent) + Send>>,
}

/// Everything a successful generate action hands back to the surface.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// The record that was appended to history.
    pub record: InteractionRecord,
    /// Text to show, per `show_code_only`.
    pub display: String,
    pub estimated_tokens: usize,
    /// `generated_code.<lang>` download.
    pub download: Artifact,
}

#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub language: Language,
    pub review: String,
}

impl Orchestrator {
    pub fn new(chains: ConversationChains) -> Self {
        Self {
            chains,
            on_progress: None,
        }
    }

    pub fn from_config(
        provider: Arc<dyn ModelProvider>,
        config: &ModelConfig,
    ) -> Result<Self, AgentError> {
        let chains = ConversationChains::new(provider, config.model.clone(), config.temperature)?;
        Ok(Self::new(chains))
    }

    /// Set a callback for stage transitions.
    pub fn with_progress(mut self, cb: impl Fn(ProgressEvent) + Send + 'static) -> Self {
        self.on_progress = Some(Box::new(cb));
        self
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(ref cb) = self.on_progress {
            cb(event);
        }
    }

    fn fail(&self, err: &AgentError) {
        if err.is_warning() {
            tracing::warn!("{}", err);
        } else {
            tracing::error!("{}", err);
        }
        self.emit(ProgressEvent::Stage(WorkflowStage::Error));
        self.emit(ProgressEvent::Failed {
            message: err.to_string(),
        });
    }

    /// Validate, optionally rewrite, generate, then record.
    ///
    /// History is only touched after the generate call succeeded.
    pub async fn generate(
        &self,
        session: &mut Session,
        request: GenerationRequest,
    ) -> Result<GenerationOutcome, AgentError> {
        let result = self.run_generate(session, request).await;
        if let Err(ref e) = result {
            self.fail(e);
        }
        result
    }

    async fn run_generate(
        &self,
        session: &mut Session,
        request: GenerationRequest,
    ) -> Result<GenerationOutcome, AgentError> {
        let config = &request.config;

        self.emit(ProgressEvent::Stage(WorkflowStage::Idle));
        self.emit(ProgressEvent::Stage(WorkflowStage::Validating));
        if request.user_input.trim().is_empty() {
            return Err(AgentError::validation("Please enter a coding prompt."));
        }
        let language = Language::parse(&request.language)?;

        let mut effective =
            prompt::effective_request(&request.user_input, config.context_code.as_deref());

        if config.enhance_prompt {
            self.emit(ProgressEvent::Stage(WorkflowStage::Rewriting));
            effective = self.chains.rewrite(&effective).await?;
            tracing::debug!("Prompt rewritten ({} chars)", effective.len());
            self.emit(ProgressEvent::PromptRewritten {
                rewritten: effective.clone(),
            });
        }

        self.emit(ProgressEvent::Stage(WorkflowStage::Generating));
        let explanation_flag = prompt::build_explanation_flag(config.include_explanation);
        // Context is already folded into `effective`.
        let formatted = prompt::build_request(language.as_str(), &effective, None);
        let response = self.chains.generate(&formatted, explanation_flag).await?;

        self.emit(ProgressEvent::Stage(WorkflowStage::Recording));
        let estimated_tokens = prompt::estimate_tokens(&formatted, &response);
        let record = InteractionRecord::new(effective, language, response);
        session.history.append(record.clone());
        self.emit(ProgressEvent::Recorded {
            history_len: session.history.len(),
        });
        tracing::info!(
            session = %session.id,
            language = %record.language,
            estimated_tokens,
            "Generated code recorded"
        );

        let display = render::render_response(
            &record.response,
            record.language.as_str(),
            config.show_code_only,
        );
        let download = export::to_plain_text(&record);

        self.emit(ProgressEvent::Stage(WorkflowStage::Done));
        Ok(GenerationOutcome {
            record,
            display,
            estimated_tokens,
            download,
        })
    }

    /// Review the most recent record. The review text is returned only; it
    /// is never written back into history.
    pub async fn review(&self, session: &Session) -> Result<ReviewOutcome, AgentError> {
        let result = self.run_review(session).await;
        if let Err(ref e) = result {
            self.fail(e);
        }
        result
    }

    async fn run_review(&self, session: &Session) -> Result<ReviewOutcome, AgentError> {
        self.emit(ProgressEvent::Stage(WorkflowStage::Idle));
        let last = session
            .history
            .last()
            .ok_or_else(|| AgentError::empty_history("review"))?;

        self.emit(ProgressEvent::Stage(WorkflowStage::Reviewing));
        let review = self
            .chains
            .review(last.language.as_str(), &last.response)
            .await?;

        self.emit(ProgressEvent::Stage(WorkflowStage::Done));
        Ok(ReviewOutcome {
            language: last.language.clone(),
            review,
        })
    }

    /// The session as `session_history.pdf`. Refuses an empty history.
    pub fn export_history(&self, session: &Session) -> Result<Artifact, AgentError> {
        if session.history.is_empty() {
            let err = AgentError::empty_history("export");
            self.fail(&err);
            return Err(err);
        }
        export::to_document(&session.history).inspect_err(|e| self.fail(e))
    }

    /// Plain-text download of the latest generated code.
    pub fn download_latest(&self, session: &Session) -> Result<Artifact, AgentError> {
        session
            .history
            .last()
            .map(export::to_plain_text)
            .ok_or_else(|| AgentError::empty_history("download"))
    }
}

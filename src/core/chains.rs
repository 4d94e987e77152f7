// src/core/chains.rs — The three named completion chains
//
// Each chain is a fixed instruction template bound to the provider. One
// invocation = one render + one round trip. No retries, no caching.

use std::sync::Arc;

use minijinja::{context, Environment};

use crate::infra::errors::AgentError;
use crate::provider::{ChatRequest, Message, ModelProvider};

const GENERATE_TEMPLATE: &str = "\
You are an expert coding assistant that generates clean, efficient code
in any programming language requested. When given a prompt, respond with
only the code (unless explanation is explicitly asked for) in markdown format
with correct syntax highlighting.

User request: {{ user_input }}

{{ explanation_flag }}
";

const REWRITE_TEMPLATE: &str =
    "Rewrite this prompt to be as clear and specific as possible for coding:\n{{ input }}";

const REVIEW_TEMPLATE: &str =
    "Review the following code and provide improvements:\n```{{ language }}\n{{ code }}\n```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chain {
    Generate,
    Rewrite,
    Review,
}

impl Chain {
    pub fn name(&self) -> &'static str {
        match self {
            Chain::Generate => "generate",
            Chain::Rewrite => "rewrite",
            Chain::Review => "review",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            Chain::Generate => GENERATE_TEMPLATE,
            Chain::Rewrite => REWRITE_TEMPLATE,
            Chain::Review => REVIEW_TEMPLATE,
        }
    }
}

pub struct ConversationChains {
    provider: Arc<dyn ModelProvider>,
    model: String,
    temperature: f32,
    templates: Environment<'static>,
}

impl ConversationChains {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Result<Self, AgentError> {
        let mut templates = Environment::new();
        for chain in [Chain::Generate, Chain::Rewrite, Chain::Review] {
            templates.add_template(chain.name(), chain.template())?;
        }
        Ok(Self {
            provider,
            model: model.into(),
            temperature,
            templates,
        })
    }

    /// Render a chain's prompt without calling the provider.
    pub fn render(&self, chain: Chain, vars: minijinja::Value) -> Result<String, AgentError> {
        let tmpl = self.templates.get_template(chain.name())?;
        Ok(tmpl.render(vars)?)
    }

    pub async fn generate(
        &self,
        user_input: &str,
        explanation_flag: &str,
    ) -> Result<String, AgentError> {
        self.invoke(
            Chain::Generate,
            context! { user_input => user_input, explanation_flag => explanation_flag },
        )
        .await
    }

    pub async fn rewrite(&self, input: &str) -> Result<String, AgentError> {
        let rewritten = self.invoke(Chain::Rewrite, context! { input => input }).await?;
        if rewritten.trim().is_empty() {
            return Err(AgentError::Provider {
                provider: self.provider.id().to_string(),
                message: "rewrite returned an empty prompt".into(),
            });
        }
        Ok(rewritten)
    }

    pub async fn review(&self, language: &str, code: &str) -> Result<String, AgentError> {
        self.invoke(Chain::Review, context! { language => language, code => code })
            .await
    }

    async fn invoke(&self, chain: Chain, vars: minijinja::Value) -> Result<String, AgentError> {
        let prompt = self.render(chain, vars)?;
        tracing::debug!(
            chain = chain.name(),
            model = %self.model,
            prompt_chars = prompt.len(),
            "invoking chain"
        );

        let response = self
            .provider
            .chat(ChatRequest {
                model: self.model.clone(),
                messages: vec![Message::user(prompt)],
                max_tokens: None,
                temperature: Some(self.temperature),
            })
            .await?;

        tracing::info!(
            chain = chain.name(),
            tokens = response.usage.total(),
            "chain completed"
        );
        Ok(response.content)
    }
}

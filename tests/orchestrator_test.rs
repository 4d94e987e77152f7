// tests/orchestrator_test.rs — Integration test: workflows against a scripted provider

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use code_agent::core::chains::ConversationChains;
use code_agent::core::orchestrator::Orchestrator;
use code_agent::core::types::{
    GenerationConfig, GenerationRequest, Language, ProgressEvent, WorkflowStage,
};
use code_agent::infra::errors::AgentError;
use code_agent::infra::session::{ApiKey, Session};
use code_agent::provider::*;

/// Answers each chain from a script and records every prompt it was sent.
#[derive(Default)]
struct ScriptedProvider {
    generate_reply: String,
    rewrite_reply: String,
    review_reply: String,
    fail_on: Option<&'static str>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new() -> Self {
        Self {
            generate_reply: "```python\nprint('hi')\n```".into(),
            rewrite_reply: "Write a Python function that sorts a list of integers using quicksort"
                .into(),
            review_reply: "Looks fine; add error handling.".into(),
            ..Default::default()
        }
    }

    fn failing_on(mut self, chain: &'static str) -> Self {
        self.fail_on = Some(chain);
        self
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn chain_of(prompt: &str) -> &'static str {
        if prompt.starts_with("Rewrite this prompt") {
            "rewrite"
        } else if prompt.starts_with("Review the following code") {
            "review"
        } else {
            "generate"
        }
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AgentError> {
        let prompt = request.messages[0].content.clone();
        let chain = Self::chain_of(&prompt);
        self.prompts.lock().unwrap().push(prompt);

        if self.fail_on == Some(chain) {
            return Err(AgentError::Provider {
                provider: "scripted".into(),
                message: "401 Invalid API Key".into(),
            });
        }

        let content = match chain {
            "rewrite" => self.rewrite_reply.clone(),
            "review" => self.review_reply.clone(),
            _ => self.generate_reply.clone(),
        };
        Ok(ChatResponse {
            content,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        })
    }
}

fn orchestrator(provider: Arc<ScriptedProvider>) -> Orchestrator {
    let chains = ConversationChains::new(provider, "mock-model", 0.7).unwrap();
    Orchestrator::new(chains)
}

fn session() -> Session {
    Session::new(ApiKey::new("gsk_test").unwrap())
}

#[tokio::test]
async fn test_generate_appends_exactly_one_record() {
    let provider = Arc::new(ScriptedProvider::new());
    let orch = orchestrator(provider.clone());
    let mut session = session();

    let outcome = orch
        .generate(
            &mut session,
            GenerationRequest::new("print hi", "Python"),
        )
        .await
        .unwrap();

    assert_eq!(session.history.len(), 1);
    let last = session.history.last().unwrap();
    assert_eq!(last.language.as_str(), "Python");
    assert_eq!(last.prompt, "print hi");
    assert_eq!(last.response, "```python\nprint('hi')\n```");
    assert_eq!(outcome.record, *last);
    assert_eq!(outcome.download.file_name, "generated_code.python");

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("User request: Language: Python\nRequest: print hi"));
    assert!(prompts[0].contains("Only return code."));
}

#[tokio::test]
async fn test_enhanced_prompt_replaces_original() {
    let provider = Arc::new(ScriptedProvider::new());
    let orch = orchestrator(provider.clone());
    let mut session = session();

    let request = GenerationRequest::new("a sorter", "Python").with_config(GenerationConfig {
        enhance_prompt: true,
        ..Default::default()
    });
    orch.generate(&mut session, request).await.unwrap();

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].ends_with("\na sorter"));
    assert!(prompts[1].contains(
        "Request: Write a Python function that sorts a list of integers using quicksort"
    ));
    assert!(!prompts[1].contains("a sorter"));

    assert_eq!(
        session.history.last().unwrap().prompt,
        "Write a Python function that sorts a list of integers using quicksort"
    );
}

#[tokio::test]
async fn test_context_code_is_prefixed_in_record_and_request() {
    let provider = Arc::new(ScriptedProvider::new());
    let orch = orchestrator(provider.clone());
    let mut session = session();

    let request = GenerationRequest::new("add docstrings", "Python").with_config(GenerationConfig {
        include_explanation: true,
        context_code: Some("def f(x):\n    return x".into()),
        ..Default::default()
    });
    orch.generate(&mut session, request).await.unwrap();

    let expected = "def f(x):\n    return x\n\nNow do this:\nadd docstrings";
    assert_eq!(session.history.last().unwrap().prompt, expected);
    let prompts = provider.prompts();
    assert!(prompts[0].contains(&format!("Request: {expected}")));
    assert!(prompts[0].contains("Also provide a brief explanation."));
}

#[tokio::test]
async fn test_validation_blocks_provider_calls() {
    let provider = Arc::new(ScriptedProvider::new());
    let orch = orchestrator(provider.clone());
    let mut session = session();

    let err = orch
        .generate(&mut session, GenerationRequest::new("   ", "Python"))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Validation(_)));

    let err = orch
        .generate(&mut session, GenerationRequest::new("fizzbuzz", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Validation(_)));

    assert!(provider.prompts().is_empty());
    assert!(session.history.is_empty());
}

#[tokio::test]
async fn test_rewrite_failure_aborts_before_generate() {
    let provider = Arc::new(ScriptedProvider::new().failing_on("rewrite"));
    let orch = orchestrator(provider.clone());
    let mut session = session();

    let request = GenerationRequest::new("a sorter", "Python").with_config(GenerationConfig {
        enhance_prompt: true,
        ..Default::default()
    });
    let err = orch.generate(&mut session, request).await.unwrap_err();

    assert!(matches!(err, AgentError::Provider { .. }));
    assert!(err.to_string().contains("401 Invalid API Key"));
    assert_eq!(provider.prompts().len(), 1);
    assert!(session.history.is_empty());
}

#[tokio::test]
async fn test_generate_failure_records_nothing() {
    let provider = Arc::new(ScriptedProvider::new().failing_on("generate"));
    let orch = orchestrator(provider);
    let mut session = session();

    let err = orch
        .generate(&mut session, GenerationRequest::new("fizzbuzz", "Rust"))
        .await
        .unwrap_err();
    assert!(!err.is_warning());
    assert!(session.history.is_empty());
}

#[tokio::test]
async fn test_review_on_empty_history_never_calls_provider() {
    let provider = Arc::new(ScriptedProvider::new());
    let orch = orchestrator(provider.clone());
    let session = session();

    let err = orch.review(&session).await.unwrap_err();
    assert!(matches!(err, AgentError::EmptyHistory { .. }));
    assert!(err.is_warning());
    assert!(provider.prompts().is_empty());
    assert!(session.history.is_empty());
}

#[tokio::test]
async fn test_review_passes_last_record_verbatim() {
    let provider = Arc::new(ScriptedProvider {
        generate_reply: "func main(){}".into(),
        ..ScriptedProvider::new()
    });
    let orch = orchestrator(provider.clone());
    let mut session = session();

    orch.generate(&mut session, GenerationRequest::new("empty main", "Go"))
        .await
        .unwrap();
    let outcome = orch.review(&session).await.unwrap();

    assert_eq!(outcome.language, Language::parse("Go").unwrap());
    assert_eq!(outcome.review, "Looks fine; add error handling.");

    let prompts = provider.prompts();
    assert_eq!(
        prompts.last().unwrap(),
        "Review the following code and provide improvements:\n```Go\nfunc main(){}\n```"
    );
    // The review is not written back.
    assert_eq!(session.history.len(), 1);
    assert_eq!(session.history.last().unwrap().response, "func main(){}");
}

#[tokio::test]
async fn test_review_failure_leaves_history_unchanged() {
    let provider = Arc::new(ScriptedProvider::new().failing_on("review"));
    let orch = orchestrator(provider);
    let mut session = session();

    orch.generate(&mut session, GenerationRequest::new("hello", "Python"))
        .await
        .unwrap();
    let before = session.history.records().to_vec();

    assert!(orch.review(&session).await.is_err());
    assert_eq!(session.history.records(), before.as_slice());
}

#[tokio::test]
async fn test_progress_reports_stages_in_order() {
    let provider = Arc::new(ScriptedProvider::new());
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let orch = orchestrator(provider).with_progress(move |e| sink.lock().unwrap().push(e));
    let mut session = session();

    let request = GenerationRequest::new("a sorter", "Python").with_config(GenerationConfig {
        enhance_prompt: true,
        ..Default::default()
    });
    orch.generate(&mut session, request).await.unwrap();

    let stages: Vec<WorkflowStage> = events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::Stage(s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(
        stages,
        vec![
            WorkflowStage::Idle,
            WorkflowStage::Validating,
            WorkflowStage::Rewriting,
            WorkflowStage::Generating,
            WorkflowStage::Recording,
            WorkflowStage::Done,
        ]
    );
}

#[tokio::test]
async fn test_failed_generation_emits_error_stage() {
    let provider = Arc::new(ScriptedProvider::new());
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let orch = orchestrator(provider).with_progress(move |e| sink.lock().unwrap().push(e));
    let mut session = session();

    let _ = orch
        .generate(&mut session, GenerationRequest::new("", "Python"))
        .await;

    let events = events.lock().unwrap();
    assert!(events.contains(&ProgressEvent::Stage(WorkflowStage::Error)));
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::Failed { message } if message.contains("coding prompt"))));
}

#[tokio::test]
async fn test_clear_then_export_is_refused() {
    let provider = Arc::new(ScriptedProvider::new());
    let orch = orchestrator(provider);
    let mut session = session();

    orch.generate(&mut session, GenerationRequest::new("hello", "Python"))
        .await
        .unwrap();
    assert!(orch.export_history(&session).is_ok());

    session.history.clear();
    assert!(session.history.last().is_none());
    assert!(matches!(
        orch.export_history(&session),
        Err(AgentError::EmptyHistory { .. })
    ));
    assert!(matches!(
        orch.download_latest(&session),
        Err(AgentError::EmptyHistory { .. })
    ));
}

// src/cli/chat.rs — Interactive REPL
//
// Plain lines are generation requests. Slash commands stand in for the
// toggles and buttons: language, explanation, code-only display, prompt
// enhancement, context file, review, downloads, and clearing history.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::input;
use crate::core::context::load_context_file;
use crate::core::orchestrator::Orchestrator;
use crate::core::types::{GenerationConfig, GenerationRequest};
use crate::infra::config::Config;
use crate::infra::errors::AgentError;
use crate::infra::session::Session;
use crate::provider::ModelProvider;
use crate::util::preview;

/// Toggles and selections that slash commands modify.
struct ChatState {
    language: Option<String>,
    config: GenerationConfig,
    context_path: Option<PathBuf>,
    export_dir: PathBuf,
}

/// Run the interactive chat REPL.
pub async fn run_chat(
    provider: Arc<dyn ModelProvider>,
    config: &Config,
    mut session: Session,
    language: Option<String>,
    quiet: bool,
) -> anyhow::Result<()> {
    eprintln!(
        "code-agent v{} | {}/{} | type /help for commands\n",
        env!("CARGO_PKG_VERSION"),
        config.model.provider,
        config.model.model,
    );

    let mut orchestrator = Orchestrator::from_config(provider, &config.model)?;
    if !quiet {
        orchestrator = orchestrator.with_progress(super::progress::terminal_progress());
    }

    let mut state = ChatState {
        language: language.or_else(|| config.generation.default_language.clone()),
        config: config.generation.to_generation_config(),
        context_path: None,
        export_dir: config.export.dir(),
    };

    while let Some(line) = read_input() {
        let trimmed = line.trim();

        if trimmed == "quit" || trimmed == "exit" || trimmed == "/quit" {
            break;
        }

        if trimmed.starts_with('/') {
            handle_slash_command(trimmed, &mut state, &mut session, &orchestrator).await;
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        let request = GenerationRequest::new(trimmed, state.language.clone().unwrap_or_default())
            .with_config(state.config.clone());
        match orchestrator.generate(&mut session, request).await {
            Ok(outcome) => println!("{}\n", outcome.display),
            Err(e) => report(&e),
        }
    }

    eprintln!(
        "\nSession ended: {} record(s) generated.",
        session.history.len()
    );
    Ok(())
}

fn report(err: &AgentError) {
    if err.is_warning() {
        eprintln!("[warning] {}", err);
    } else {
        eprintln!("[error] {}", err);
    }
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}

fn on_off(b: bool) -> &'static str {
    if b {
        "on"
    } else {
        "off"
    }
}

fn save(artifact: Result<crate::export::Artifact, AgentError>, dir: &Path) {
    match artifact.and_then(|a| a.write_to(dir)) {
        Ok(path) => eprintln!("  Saved {}", path.display()),
        Err(e) => report(&e),
    }
}

async fn handle_slash_command(
    input: &str,
    state: &mut ChatState,
    session: &mut Session,
    orchestrator: &Orchestrator,
) {
    let (cmd, arg) = match input.split_once(' ') {
        Some((c, a)) => (c, a.trim()),
        None => (input, ""),
    };

    match cmd {
        "/lang" => {
            let chosen = if arg.is_empty() {
                input::pick_language()
            } else {
                input::select_language(arg)
            };
            match chosen {
                Ok(lang) => {
                    eprintln!("  Language set to {}", lang);
                    state.language = Some(lang.to_string());
                }
                Err(e) => report(&e),
            }
        }

        "/explain" => {
            state.config.include_explanation = !state.config.include_explanation;
            eprintln!("  Explanation: {}", on_off(state.config.include_explanation));
        }

        "/codeonly" => {
            state.config.show_code_only = !state.config.show_code_only;
            eprintln!("  Code-only output: {}", on_off(state.config.show_code_only));
        }

        "/enhance" => {
            state.config.enhance_prompt = !state.config.enhance_prompt;
            eprintln!("  Prompt enhancement: {}", on_off(state.config.enhance_prompt));
        }

        "/context" => {
            if arg.is_empty() {
                match state.context_path {
                    Some(ref p) => eprintln!("  Context file: {}", p.display()),
                    None => eprintln!("  No context file. Usage: /context <file> | /context clear"),
                }
            } else if arg == "clear" {
                state.context_path = None;
                state.config.context_code = None;
                eprintln!("  Context cleared");
            } else {
                let path = PathBuf::from(arg);
                match load_context_file(&path) {
                    Ok(code) => {
                        eprintln!("  Context loaded: {} ({} bytes)", path.display(), code.len());
                        state.config.context_code = Some(code);
                        state.context_path = Some(path);
                    }
                    Err(e) => report(&e),
                }
            }
        }

        "/review" => match orchestrator.review(session).await {
            Ok(outcome) => {
                println!("## Review & suggestions ({})\n", outcome.language);
                println!("{}\n", outcome.review);
            }
            Err(e) => report(&e),
        },

        "/download" => save(orchestrator.download_latest(session), &state.export_dir),

        "/export" => save(orchestrator.export_history(session), &state.export_dir),

        "/clear" => {
            session.history.clear();
            state.context_path = None;
            state.config.context_code = None;
            eprintln!("  History and context cleared");
        }

        "/history" => {
            if session.history.is_empty() {
                eprintln!("  No code generated in this session yet.");
            } else {
                eprintln!("  Session history ({} record(s)):", session.history.len());
                for (i, record) in session.history.iter().enumerate() {
                    eprintln!(
                        "  {}. [{}] {}",
                        i + 1,
                        record.language,
                        preview(&record.prompt, 60)
                    );
                }
            }
        }

        "/status" => {
            eprintln!(
                "  Language: {}",
                state.language.as_deref().unwrap_or("(not set)")
            );
            eprintln!(
                "  Explanation: {} | Code-only: {} | Enhance: {}",
                on_off(state.config.include_explanation),
                on_off(state.config.show_code_only),
                on_off(state.config.enhance_prompt),
            );
            if let Some(ref p) = state.context_path {
                eprintln!("  Context file: {}", p.display());
            }
            eprintln!(
                "  Session {} | {} record(s) | exports -> {}",
                session.id,
                session.history.len(),
                state.export_dir.display()
            );
        }

        "/help" => {
            eprintln!("Slash commands:");
            eprintln!("  /lang [name|Other]    Pick or set the target language");
            eprintln!("  /explain              Toggle explanation with the code");
            eprintln!("  /codeonly             Toggle code-only output");
            eprintln!("  /enhance              Toggle prompt rewriting before generation");
            eprintln!("  /context [file|clear] Show, load, or drop a context file");
            eprintln!("  /review               Review the most recent code");
            eprintln!("  /download             Save the most recent code to a file");
            eprintln!("  /export               Save the session as session_history.pdf");
            eprintln!("  /history              List this session's requests");
            eprintln!("  /clear                Clear history and context");
            eprintln!("  /status               Show current settings");
            eprintln!("  /quit, quit, exit     End session");
        }

        _ => {
            eprintln!("Unknown command: {}. Type /help for commands.", cmd);
        }
    }
}

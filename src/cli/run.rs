// src/cli/run.rs — `generate`: one request, then optional review/exports

use std::sync::Arc;

use super::input;
use super::GenerateArgs;
use crate::core::context::load_context_file;
use crate::core::orchestrator::Orchestrator;
use crate::core::types::{GenerationConfig, GenerationRequest};
use crate::infra::config::Config;
use crate::infra::session::Session;
use crate::provider::ModelProvider;

/// Per-call toggles: config defaults, with CLI flags switching features on
/// (or, for `--markdown`, switching code-only display off).
pub fn generation_config(args: &GenerateArgs, config: &Config) -> GenerationConfig {
    let mut cfg = config.generation.to_generation_config();
    if args.explain {
        cfg.include_explanation = true;
    }
    if args.markdown {
        cfg.show_code_only = false;
    }
    if args.enhance {
        cfg.enhance_prompt = true;
    }
    cfg
}

pub async fn run_generate(
    args: GenerateArgs,
    provider: Arc<dyn ModelProvider>,
    config: &Config,
    mut session: Session,
    quiet: bool,
) -> anyhow::Result<()> {
    let request_text = input::read_request(&args.request, args.stdin)?;
    let language = match args
        .language
        .clone()
        .or_else(|| config.generation.default_language.clone())
    {
        Some(l) => input::select_language(&l)?,
        None => input::pick_language()?,
    };

    let mut gen_config = generation_config(&args, config);
    if let Some(ref path) = args.context {
        gen_config.context_code = Some(load_context_file(path)?);
    }

    let mut orchestrator = Orchestrator::from_config(provider, &config.model)?;
    if !quiet {
        orchestrator = orchestrator.with_progress(super::progress::terminal_progress());
    }

    let outcome = orchestrator
        .generate(
            &mut session,
            GenerationRequest::new(request_text, language.to_string()).with_config(gen_config),
        )
        .await?;

    println!("{}", outcome.display);
    tracing::debug!("Estimated tokens: {}", outcome.estimated_tokens);

    let out_dir = args.out_dir.clone().unwrap_or_else(|| config.export.dir());

    if args.download {
        let path = outcome.download.write_to(&out_dir)?;
        eprintln!("Saved {}", path.display());
    }

    if args.review {
        match orchestrator.review(&session).await {
            Ok(review) => {
                println!();
                println!("## Review & suggestions");
                println!();
                println!("{}", review.review);
            }
            Err(e) => eprintln!("[error] Review failed: {}", e),
        }
    }

    if args.export_pdf {
        let artifact = orchestrator.export_history(&session)?;
        let path = artifact.write_to(&out_dir)?;
        eprintln!("Saved {}", path.display());
    }

    Ok(())
}

// src/main.rs — code-agent entry point

use std::sync::Arc;

use clap::Parser;

use code_agent::cli::{input, Cli, Commands};
use code_agent::infra::config::Config;
use code_agent::infra::logger;
use code_agent::infra::session::Session;
use code_agent::provider::openai_compat::OpenAICompatProvider;
use code_agent::provider::ModelProvider;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Respects RUST_LOG
    logger::init_logging(if cli.verbose { "debug" } else { "warn" });

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Falls back to defaults if no config.toml
    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(model) = cli.model {
        config.model.model = model;
    }

    // Nothing runs without a credential.
    let api_key = input::resolve_api_key(cli.api_key.as_deref(), &config.model.api_key_env)?;
    let session = Session::new(api_key);
    let provider: Arc<dyn ModelProvider> = Arc::new(OpenAICompatProvider::from_config(
        &config.model,
        session.api_key().clone(),
    ));
    tracing::debug!("Session {} started", session.id);

    match cli.command {
        Commands::Generate(args) => {
            code_agent::cli::run::run_generate(args, provider, &config, session, cli.quiet).await
        }
        Commands::Chat { language } => {
            code_agent::cli::chat::run_chat(provider, &config, session, language, cli.quiet).await
        }
    }
}

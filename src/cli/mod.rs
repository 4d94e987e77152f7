// src/cli/mod.rs — CLI definition (clap derive)

pub mod chat;
pub mod input;
pub mod progress;
pub mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "code-agent",
    about = "Describe the code you want; get it generated, reviewed, and exported",
    version
)]
pub struct Cli {
    /// Provider API key (falls back to $GROQ_API_KEY, then an interactive prompt)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Model id to request from the provider
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress progress output (only emit results)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate code for a single request
    Generate(GenerateArgs),
    /// Interactive session with history, review and export
    Chat {
        /// Starting language (change later with /lang)
        #[arg(short, long)]
        language: Option<String>,
    },
}

#[derive(Args, Clone, Debug, Default)]
pub struct GenerateArgs {
    /// What the code should do
    #[arg(trailing_var_arg = true)]
    pub request: Vec<String>,

    /// Target language (any label; omitted = config default or picker)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Ask for a brief explanation alongside the code
    #[arg(short, long)]
    pub explain: bool,

    /// Show the full markdown response instead of code only
    #[arg(long)]
    pub markdown: bool,

    /// Rewrite a vague request into a specific one before generating
    #[arg(long)]
    pub enhance: bool,

    /// Existing code to give the model as context (.py .js .cpp .java .txt)
    #[arg(short, long)]
    pub context: Option<PathBuf>,

    /// Read the request from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Review the generated code afterwards
    #[arg(long)]
    pub review: bool,

    /// Save the code as generated_code.<language>
    #[arg(long)]
    pub download: bool,

    /// Save the session as session_history.pdf
    #[arg(long)]
    pub export_pdf: bool,

    /// Directory for saved files (default: config export.dir or cwd)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

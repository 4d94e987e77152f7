// src/cli/input.rs — Credential, language, and request input

use std::io::IsTerminal;

use crate::core::types::{Language, KNOWN_LANGUAGES, OTHER_LANGUAGE};
use crate::infra::errors::AgentError;
use crate::infra::session::ApiKey;

/// Resolve the credential: explicit flag, then environment, then a masked
/// prompt when attached to a terminal. Never written anywhere.
pub fn resolve_api_key(flag: Option<&str>, env_var: &str) -> Result<ApiKey, AgentError> {
    if let Some(key) = flag {
        return ApiKey::new(key);
    }
    if let Ok(key) = std::env::var(env_var) {
        if !key.trim().is_empty() {
            tracing::debug!("Using credential from ${}", env_var);
            return ApiKey::new(key);
        }
    }
    if std::io::stdin().is_terminal() {
        let key = inquire::Password::new("Enter your API key:")
            .without_confirmation()
            .with_display_mode(inquire::PasswordDisplayMode::Masked)
            .with_help_message(&format!("Not stored. Set ${env_var} to skip this prompt."))
            .prompt()
            .map_err(|_| AgentError::Configuration("API key entry cancelled".into()))?;
        return ApiKey::new(key);
    }
    Err(AgentError::Configuration(format!(
        "Please enter your API key to continue (--api-key or ${env_var})."
    )))
}

/// Language selector: the known labels plus `Other`, which asks for free text.
pub fn pick_language() -> Result<Language, AgentError> {
    if !std::io::stdin().is_terminal() {
        return Err(AgentError::validation(
            "Please specify a programming language (--language).",
        ));
    }
    let mut options: Vec<&str> = KNOWN_LANGUAGES.to_vec();
    options.push(OTHER_LANGUAGE);

    let choice = inquire::Select::new("Select programming language:", options)
        .with_page_size(12)
        .prompt()
        .map_err(|_| AgentError::validation("Language selection cancelled"))?;

    select_language(choice)
}

/// Resolve a typed or picked label. `Other` asks for the custom label first.
pub fn select_language(choice: &str) -> Result<Language, AgentError> {
    let custom = if choice.trim().eq_ignore_ascii_case(OTHER_LANGUAGE) {
        Some(prompt_custom_language()?)
    } else {
        None
    };
    Language::from_selection(choice, custom.as_deref())
}

fn prompt_custom_language() -> Result<String, AgentError> {
    inquire::Text::new("Type your custom language:")
        .prompt()
        .map_err(|_| AgentError::validation("Language entry cancelled"))
}

/// Build the request text from positional args and/or stdin.
///
/// With `--stdin`, stdin is the request and positional args (if any) are
/// placed in front of it. Piped stdin is only read when there are no args.
pub fn read_request(args: &[String], force_stdin: bool) -> Result<String, AgentError> {
    let has_args = !args.is_empty();
    let stdin_is_pipe = !std::io::stdin().is_terminal();

    if force_stdin || (stdin_is_pipe && !has_args) {
        let content = read_stdin()?;
        if has_args {
            return Ok(format!("{}\n\n{}", args.join(" "), content));
        }
        return Ok(content);
    }
    if has_args {
        return Ok(args.join(" "));
    }

    let text = inquire::Text::new("Describe what you want the code to do:")
        .prompt()
        .map_err(|_| AgentError::validation("Request entry cancelled"))?;
    Ok(text)
}

fn read_stdin() -> Result<String, AgentError> {
    use std::io::Read;
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

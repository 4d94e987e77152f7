// src/core/prompt.rs — Request formatting for the generation chain

/// Separator between uploaded context and the user's instruction.
pub const CONTEXT_SEPARATOR: &str = "Now do this:";

pub const EXPLAIN_FLAG: &str = "Also provide a brief explanation.";
pub const CODE_ONLY_FLAG: &str = "Only return code.";

/// The request text as the model should see it: uploaded context first
/// (when there is any), then the instruction.
pub fn effective_request(user_request: &str, context_code: Option<&str>) -> String {
    match context_code {
        Some(ctx) if !ctx.is_empty() => {
            format!("{ctx}\n\n{CONTEXT_SEPARATOR}\n{user_request}")
        }
        _ => user_request.to_string(),
    }
}

/// Format the `user_input` variable of the generation template.
pub fn build_request(language: &str, user_request: &str, context_code: Option<&str>) -> String {
    format!(
        "Language: {}\nRequest: {}",
        language,
        effective_request(user_request, context_code)
    )
}

pub fn build_explanation_flag(include_explanation: bool) -> &'static str {
    if include_explanation {
        EXPLAIN_FLAG
    } else {
        CODE_ONLY_FLAG
    }
}

/// Rough token count: whitespace-separated words of request plus response.
pub fn estimate_tokens(formatted_request: &str, response: &str) -> usize {
    formatted_request.split_whitespace().count() + response.split_whitespace().count()
}

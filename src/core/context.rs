// src/core/context.rs — Context file upload
//
// Existing code the user hands over as background for the request. Only the
// extension is checked; content is taken as-is once it decodes as UTF-8.

use std::path::Path;

use crate::infra::errors::AgentError;

pub const ALLOWED_EXTENSIONS: &[&str] = &["py", "js", "cpp", "java", "txt"];

pub fn is_allowed(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ALLOWED_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Read a context file into the `context_code` of a generation call.
pub fn load_context_file(path: &Path) -> Result<String, AgentError> {
    if !is_allowed(path) {
        return Err(AgentError::validation(format!(
            "Unsupported context file '{}'. Allowed extensions: {}",
            path.display(),
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| {
        AgentError::validation(format!("Context file '{}' is not valid UTF-8", path.display()))
    })?;

    tracing::debug!(
        "Loaded context file {} ({} bytes)",
        path.display(),
        text.len()
    );
    Ok(text)
}

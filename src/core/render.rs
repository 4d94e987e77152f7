// src/core/render.rs — Display form of a generation response

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Concatenated bodies of every code block in a markdown response.
pub fn extract_code_blocks(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => current = Some(String::new()),
            Event::Text(text) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(buf) = current.take() {
                    blocks.push(buf);
                }
            }
            _ => {}
        }
    }
    blocks
}

/// Text shown for a response. Code-only mode keeps just the code, fenced
/// with the lowercased language tag; otherwise the markdown is shown as-is.
pub fn render_response(response: &str, language: &str, show_code_only: bool) -> String {
    if !show_code_only {
        return response.to_string();
    }

    let blocks = extract_code_blocks(response);
    let code = if blocks.is_empty() {
        response.trim_end().to_string()
    } else {
        blocks.join("\n").trim_end().to_string()
    };
    format!("```{}\n{}\n```", language.to_lowercase(), code)
}

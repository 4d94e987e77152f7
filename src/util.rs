// src/util.rs — Shared utility functions

/// One-line preview of multi-line text for listings and progress output.
///
/// Newlines collapse to spaces; text longer than `max_chars` characters is
/// cut and suffixed with `...`.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

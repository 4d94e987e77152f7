// src/export/mod.rs — Downloadable artifacts
//
// A plain-text file for the latest generated code, and a PDF of the whole
// session history.

pub mod pdf;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::core::history::HistoryStore;
use crate::core::types::{InteractionRecord, Language};
use crate::infra::errors::AgentError;

pub const PDF_FILE_NAME: &str = "session_history.pdf";

/// A named, typed blob ready to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Write into `dir` (created if missing) and return the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, AgentError> {
        if Path::new(&self.file_name).file_name() != Some(OsStr::new(&self.file_name)) {
            return Err(AgentError::Export(format!(
                "refusing to write '{}': not a plain file name",
                self.file_name
            )));
        }
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        tracing::info!("Wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Lowercased label made safe as a file extension: path separators and
/// other unusual characters become `_`, and edge dots are dropped.
fn file_extension(language: &Language) -> String {
    let mapped: String = language
        .lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '+' | '#' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = mapped.trim_matches('.');
    if trimmed.is_empty() {
        "txt".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Raw response text, named `generated_code.<language lowercased>`.
pub fn to_plain_text(record: &InteractionRecord) -> Artifact {
    Artifact {
        file_name: format!("generated_code.{}", file_extension(&record.language)),
        mime: "text/plain",
        bytes: record.response.as_bytes().to_vec(),
    }
}

/// Every record, in insertion order, as one PDF.
pub fn to_document(history: &HistoryStore) -> Result<Artifact, AgentError> {
    Ok(Artifact {
        file_name: PDF_FILE_NAME.to_string(),
        mime: "application/pdf",
        bytes: pdf::render(history.records())?,
    })
}

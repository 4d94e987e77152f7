// src/cli/progress.rs — Terminal progress renderer for workflow stages

use crate::core::types::{ProgressEvent, WorkflowStage};
use crate::util::preview;

fn format_event(event: &ProgressEvent) -> Option<String> {
    match event {
        ProgressEvent::Stage(WorkflowStage::Rewriting) => Some("[rewrite] enhancing prompt...".into()),
        ProgressEvent::Stage(WorkflowStage::Generating) => Some("[generate] generating code...".into()),
        ProgressEvent::Stage(WorkflowStage::Reviewing) => Some("[review] reviewing code...".into()),
        ProgressEvent::Stage(_) => None,
        ProgressEvent::PromptRewritten { rewritten } => {
            Some(format!("[rewrite] -> {}", preview(rewritten, 80)))
        }
        ProgressEvent::Recorded { history_len } => {
            Some(format!("[history] {} record(s) in session", history_len))
        }
        // Failures are printed by the caller, which owns the error.
        ProgressEvent::Failed { .. } => None,
    }
}

/// Progress callback writing to stderr, keeping stdout for code.
pub fn terminal_progress() -> impl Fn(ProgressEvent) + Send + 'static {
    move |event| {
        if let Some(line) = format_event(&event) {
            eprintln!("{}", line);
        }
    }
}

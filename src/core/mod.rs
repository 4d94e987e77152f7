// src/core/mod.rs — Prompt, chain, history, and workflow logic

pub mod chains;
pub mod context;
pub mod history;
pub mod orchestrator;
pub mod prompt;
pub mod render;
pub mod types;

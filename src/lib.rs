// src/lib.rs — Library root for code-agent

pub mod cli;
pub mod core;
pub mod export;
pub mod infra;
pub mod provider;
pub mod util;

// src/infra/paths.rs — Config path resolution
//
// CODE_AGENT_HOME overrides everything. Otherwise config lives in
// ~/.code-agent/. Exports default to the working directory.

use std::path::PathBuf;

/// Returns the CODE_AGENT_HOME override, if set.
fn agent_home() -> Option<PathBuf> {
    std::env::var_os("CODE_AGENT_HOME").map(PathBuf::from)
}

/// Home directory, or the working directory when none can be determined.
pub fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration directory: $CODE_AGENT_HOME/ or ~/.code-agent/
pub fn config_dir() -> PathBuf {
    if let Some(home) = agent_home() {
        return home;
    }
    dirs_home().join(".code-agent")
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Default directory for downloaded artifacts
pub fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

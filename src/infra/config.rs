// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::types::GenerationConfig;
use crate::infra::errors::AgentError;
use crate::infra::paths;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "deepseek-r1-distill-llama-70b";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub generation: GenerationDefaults,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Provider id used in logs and error messages.
    pub provider: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Request timeout. Unset means the transport's own behaviour applies.
    pub timeout_seconds: Option<u64>,
    /// Environment variable consulted for the credential.
    pub api_key_env: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "groq".into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: None,
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".into()
}

/// Initial toggle values; the CLI and chat commands override them per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationDefaults {
    pub include_explanation: bool,
    pub show_code_only: bool,
    pub enhance_prompt: bool,
    pub default_language: Option<String>,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            include_explanation: false,
            show_code_only: true,
            enhance_prompt: false,
            default_language: None,
        }
    }
}

impl GenerationDefaults {
    pub fn to_generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            include_explanation: self.include_explanation,
            show_code_only: self.show_code_only,
            enhance_prompt: self.enhance_prompt,
            context_code: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where downloads are written (defaults to the working directory).
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl ExportConfig {
    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(paths::default_export_dir)
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> Result<Self, AgentError> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, AgentError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), AgentError> {
        if self.model.base_url.trim().is_empty() {
            return Err(AgentError::Configuration("model.base_url is empty".into()));
        }
        if self.model.model.trim().is_empty() {
            return Err(AgentError::Configuration("model.model is empty".into()));
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(AgentError::Configuration(format!(
                "model.temperature must be within 0.0-2.0, got {}",
                self.model.temperature
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_hosted_model() {
        let c = Config::default();
        assert_eq!(c.model.provider, "groq");
        assert_eq!(c.model.model, "deepseek-r1-distill-llama-70b");
        assert!((c.model.temperature - 0.7).abs() < 0.001);
        assert!(c.model.timeout_seconds.is_none());
        assert_eq!(c.model.api_key_env, "GROQ_API_KEY");
    }

    #[test]
    fn test_generation_defaults() {
        let g = GenerationDefaults::default();
        assert!(!g.include_explanation);
        assert!(g.show_code_only);
        assert!(!g.enhance_prompt);

        let cfg = g.to_generation_config();
        assert!(cfg.show_code_only);
        assert!(cfg.context_code.is_none());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.model.base_url, DEFAULT_BASE_URL);
        assert!(config.export.dir.is_none());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[model]
provider = "local"
base_url = "http://localhost:8080/v1"
model = "qwen2.5-coder"
temperature = 0.2
timeout_seconds = 90

[generation]
include_explanation = true
show_code_only = false
enhance_prompt = true
default_language = "Rust"

[export]
dir = "/tmp/exports"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.provider, "local");
        assert_eq!(config.model.timeout_seconds, Some(90));
        assert_eq!(config.model.api_key_env, "GROQ_API_KEY");
        assert!(config.generation.include_explanation);
        assert!(!config.generation.show_code_only);
        assert_eq!(config.generation.default_language.as_deref(), Some("Rust"));
        assert_eq!(config.export.dir(), PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_partial_model_section_keeps_defaults() {
        let config: Config = toml::from_str("[model]\nmodel = \"llama-3.3-70b-versatile\"\n").unwrap();
        assert_eq!(config.model.model, "llama-3.3-70b-versatile");
        assert_eq!(config.model.base_url, DEFAULT_BASE_URL);
        assert!((config.model.temperature - 0.7).abs() < 0.001);
    }

    #[test]
    fn test_load_rejects_bad_temperature() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[model]\nprovider = \"groq\"\nbase_url = \"https://x\"\nmodel = \"m\"\ntemperature = 5.0"
        )
        .unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, AgentError::Configuration(_)));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(AgentError::Io(_))));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.model.model, config.model.model);
    }
}

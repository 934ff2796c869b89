//! Configuration for actionizer.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (OPENAI_API_KEY, OPENAI_BASE_URL, ACTIONIZER_MODEL)
//! 2. Config file (.actionizer/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .actionizer/config.yaml
//! - Falls back to ~/.actionizer/config.yaml
//!
//! Configuration is resolved once at startup and handed to the extractor
//! explicitly; nothing here is read again per extraction.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::extract::{ExtractError, TranscriptLimits};

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_MODEL: &str = "ACTIONIZER_MODEL";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

const CONFIG_DIR: &str = ".actionizer";
const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub limits: Option<LimitsSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelSection {
    pub name: Option<String>,
    pub base_url: Option<String>,
    /// Prefer the environment for secrets; accepted here for local setups
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsSection {
    pub max_transcript_bytes: Option<usize>,
}

/// Model service settings
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ModelConfig {
    /// The credential, or a configuration error if it is missing or blank
    pub fn validate(&self) -> Result<&str, ExtractError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ExtractError::Configuration(format!(
                "Model API key is not configured. Set {ENV_API_KEY} or model.api_key in {CONFIG_DIR}/{CONFIG_FILE}."
            ))),
        }
    }

    /// Key suitable for display: last four characters only
    pub fn masked_key(&self) -> String {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => {
                let tail: String = key
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("****{tail}")
            }
            _ => "(not set)".to_string(),
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub model: ModelConfig,
    pub limits: TranscriptLimits,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents, then home
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
        .filter(|path| path.exists())
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge file settings and environment over the defaults
fn resolve(
    config_file: Option<PathBuf>,
    file: Option<ConfigFile>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let section = file
        .as_ref()
        .map(|f| f.model.clone())
        .unwrap_or_default();
    let defaults = ModelConfig::default();

    let model = ModelConfig {
        api_key: env(ENV_API_KEY)
            .or(section.api_key)
            .filter(|k| !k.trim().is_empty()),
        model: env(ENV_MODEL)
            .or(section.name)
            .unwrap_or(defaults.model),
        base_url: env(ENV_BASE_URL)
            .or(section.base_url)
            .unwrap_or(defaults.base_url),
        temperature: section.temperature.unwrap_or(defaults.temperature),
        timeout_seconds: section.timeout_seconds.unwrap_or(defaults.timeout_seconds),
    };

    let mut limits = TranscriptLimits::default();
    if let Some(max) = file
        .as_ref()
        .and_then(|f| f.limits.as_ref())
        .and_then(|l| l.max_transcript_bytes)
    {
        limits.max_transcript_bytes = max;
    }

    ResolvedConfig {
        model,
        limits,
        config_file,
    }
}

/// Load configuration from all sources
pub fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();
    let file = config_file
        .as_deref()
        .map(load_config_file)
        .transpose()?;

    Ok(resolve(config_file, file, |name| std::env::var(name).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = resolve(None, None, no_env);

        assert_eq!(config.model, ModelConfig::default());
        assert_eq!(config.model.model, "gpt-4o-mini");
        assert_eq!(config.limits, TranscriptLimits::default());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".actionizer");
        std::fs::create_dir_all(&dir).unwrap();

        let config_path = dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
model:
  name: gpt-4o
  base_url: http://localhost:8080/v1
  temperature: 0.1
  timeout_seconds: 15
limits:
  max_transcript_bytes: 4096
"#
        )
        .unwrap();

        let parsed = load_config_file(&config_path).unwrap();
        assert_eq!(parsed.version, "1.0");
        assert_eq!(parsed.model.name.as_deref(), Some("gpt-4o"));

        let config = resolve(Some(config_path), Some(parsed), no_env);
        assert_eq!(config.model.model, "gpt-4o");
        assert_eq!(config.model.base_url, "http://localhost:8080/v1");
        assert_eq!(config.model.temperature, 0.1);
        assert_eq!(config.model.timeout_seconds, 15);
        assert_eq!(config.limits.max_transcript_bytes, 4096);
        assert!(config.model.api_key.is_none());
    }

    #[test]
    fn test_environment_overrides_file() {
        let file: ConfigFile = serde_yaml::from_str(
            "version: \"1.0\"\nmodel:\n  name: from-file\n  api_key: file-key\n",
        )
        .unwrap();
        let env: HashMap<&str, &str> = [(ENV_API_KEY, "env-key"), (ENV_MODEL, "from-env")]
            .into_iter()
            .collect();

        let config = resolve(None, Some(file), |name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.model.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.model.model, "from-env");
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let config = ModelConfig::default();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), crate::extract::ErrorKind::Configuration);

        let blank = ModelConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_masked_key() {
        let config = ModelConfig {
            api_key: Some("sk-abcdef1234".to_string()),
            ..Default::default()
        };
        assert_eq!(config.masked_key(), "****1234");
        assert_eq!(ModelConfig::default().masked_key(), "(not set)");
    }
}

//! Configuration loading, validation, and management for metaprompt.
//!
//! Loads configuration from `~/.metaprompt/config.toml` with environment
//! variable overrides. Validates all settings at startup; the resulting
//! [`AppConfig`] is passed by value into the provider and pipeline
//! constructors so nothing downstream reads the environment.

use metaprompt_core::GOLDEN_ANGLE_DEGREES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables consulted for the API key, in priority order.
pub const API_KEY_VARS: [&str; 2] = ["METAPROMPT_API_KEY", "GEMINI_API_KEY"];

/// File name of the bundled base template.
pub const TEMPLATE_FILE_NAME: &str = "NextJs.startup.md";

/// The root configuration structure.
///
/// Maps directly to `~/.metaprompt/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base technical template merged into every draft
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    /// Directory drafts and enhanced prompts are written to
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,

    /// Text-generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Color derivation settings
    #[serde(default)]
    pub palette: PaletteConfig,
}

fn default_template_path() -> PathBuf {
    AppConfig::config_dir().join(TEMPLATE_FILE_NAME)
}
fn default_target_dir() -> PathBuf {
    PathBuf::from("prompts")
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("template_path", &self.template_path)
            .field("target_dir", &self.target_dir)
            .field("generation", &self.generation)
            .field("palette", &self.palette)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Model identifiers, tried strictly in this order
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Per-request timeout; bounds every model attempt
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_models() -> Vec<String> {
    vec![
        "gemini-3-pro-preview".into(),
        "gemini-2.5-pro".into(),
        "gemini-2.5-flash".into(),
        "gemini-1.5-pro".into(),
        "gemini-1.5-flash".into(),
    ]
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_output_tokens() -> u32 {
    8192
}
fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Hue rotation applied to the primary color, in degrees
    #[serde(default = "default_rotation_degrees")]
    pub rotation_degrees: f64,
}

fn default_rotation_degrees() -> f64 {
    GOLDEN_ANGLE_DEGREES
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            rotation_degrees: default_rotation_degrees(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.metaprompt/config.toml),
    /// then apply environment overrides:
    /// - `METAPROMPT_API_KEY` / `GEMINI_API_KEY` (when the file sets no key)
    /// - `METAPROMPT_TEMPLATE`
    /// - `METAPROMPT_TARGET_DIR`
    /// - `METAPROMPT_MODELS` (comma-separated priority list)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_dir().join("config.toml"))
    }

    /// Same as [`AppConfig::load`] but from an explicit file.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path, without environment
    /// overrides. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production). Empty values are ignored, including a blank `api_key`
    /// from the file.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if self.api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
            self.api_key = None;
        }
        if self.api_key.is_none() {
            self.api_key = API_KEY_VARS.iter().find_map(|key| var(*key));
        }

        if let Some(template) = var("METAPROMPT_TEMPLATE") {
            self.template_path = PathBuf::from(template);
        }

        if let Some(target) = var("METAPROMPT_TARGET_DIR") {
            self.target_dir = PathBuf::from(target);
        }

        if let Some(models) = var("METAPROMPT_MODELS") {
            self.generation.models = models
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect();
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".metaprompt")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generation = &self.generation;

        if generation.temperature < 0.0 || generation.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "generation.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if generation.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "generation.request_timeout_secs must be > 0".into(),
            ));
        }

        if generation.models.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "generation.models must not contain empty identifiers".into(),
            ));
        }

        if !self.palette.rotation_degrees.is_finite() {
            return Err(ConfigError::ValidationError(
                "palette.rotation_degrees must be a finite number".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            template_path: default_template_path(),
            target_dir: default_target_dir(),
            generation: GenerationConfig::default(),
            palette: PaletteConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

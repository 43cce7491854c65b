//! Configuration management
//!
//! Settings live in settings.json in the data directory:
//! ```json
//! {
//!   "gemini": { "apiKey": "...", "model": "gemini-2.5-flash" },
//!   "backend": "local",
//!   "apiUrl": "http://localhost:3001/api"
//! }
//! ```
//! Fields this crate doesn't know about are preserved on save.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::gemini::DEFAULT_MODEL;
use crate::adapters::rest::DEFAULT_API_URL;

/// Keys accepted by `Config::set`
pub const SETTABLE_KEYS: &[&str] = &["gemini.apiKey", "gemini.model", "backend", "apiUrl"];

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    gemini: GeminiSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    backend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_url: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Where profiles are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Local,
    Rest,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Local => "local",
            BackendKind::Rest => "rest",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(BackendKind::Local),
            "rest" => Ok(BackendKind::Rest),
            other => Err(anyhow!("Unknown backend '{}'. Expected 'local' or 'rest'", other)),
        }
    }
}

/// NextStep configuration (effective view of settings + environment)
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub backend: BackendKind,
    pub api_url: String,
    settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_settings(SettingsFile::default())
    }
}

/// Non-empty environment variable
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load config from the data directory
    ///
    /// Environment overrides, highest first:
    /// - NEXTSTEP_GEMINI_API_KEY, then GEMINI_API_KEY
    /// - NEXTSTEP_BACKEND
    /// - NEXTSTEP_API_URL
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::from_settings(Self::read_settings(data_dir)?);

        if let Some(key) = env_value("NEXTSTEP_GEMINI_API_KEY").or_else(|| env_value("GEMINI_API_KEY")) {
            config.gemini_api_key = Some(key);
        }
        if let Some(backend) = env_value("NEXTSTEP_BACKEND") {
            config.backend = backend.parse()?;
        }
        if let Some(url) = env_value("NEXTSTEP_API_URL") {
            config.api_url = url;
        }

        Ok(config)
    }

    fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
        let settings_path = data_dir.join("settings.json");
        if !settings_path.exists() {
            return Ok(SettingsFile::default());
        }
        let content = std::fs::read_to_string(&settings_path)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    fn from_settings(settings: SettingsFile) -> Self {
        Self {
            gemini_api_key: settings.gemini.api_key.clone().filter(|k| !k.is_empty()),
            gemini_model: settings
                .gemini
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            backend: settings
                .backend
                .as_deref()
                .and_then(|b| b.parse().ok())
                .unwrap_or(BackendKind::Local),
            api_url: settings
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            settings,
        }
    }

    /// Change one setting. Takes effect in this config and on the next `save`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "gemini.apiKey" => {
                self.settings.gemini.api_key = Some(value.to_string()).filter(|v| !v.is_empty());
                self.gemini_api_key = self.settings.gemini.api_key.clone();
            }
            "gemini.model" => {
                if value.is_empty() {
                    bail!("Model name cannot be empty");
                }
                self.settings.gemini.model = Some(value.to_string());
                self.gemini_model = value.to_string();
            }
            "backend" => {
                let backend: BackendKind = value.parse()?;
                self.settings.backend = Some(backend.as_str().to_string());
                self.backend = backend;
            }
            "apiUrl" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    bail!("API URL must start with http:// or https://");
                }
                self.settings.api_url = Some(value.trim_end_matches('/').to_string());
                self.api_url = value.trim_end_matches('/').to_string();
            }
            other => bail!(
                "Unknown setting '{}'. Valid settings: {}",
                other,
                SETTABLE_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Save config to the data directory
    ///
    /// Re-reads the file first so settings written by someone else in the
    /// meantime survive.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join("settings.json");
        let mut settings = Self::read_settings(data_dir)?;

        settings.gemini.api_key = self.settings.gemini.api_key.clone();
        settings.gemini.model = self.settings.gemini.model.clone();
        settings.backend = self.settings.backend.clone();
        settings.api_url = self.settings.api_url.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// API key with all but the last four characters hidden
    pub fn masked_api_key(&self) -> Option<String> {
        self.gemini_api_key.as_ref().map(|key| {
            let chars: Vec<char> = key.chars().collect();
            if chars.len() <= 4 {
                "****".to_string()
            } else {
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("****{}", tail)
            }
        })
    }

    /// Effective settings for display. The API key is masked.
    pub fn to_display_json(&self) -> serde_json::Value {
        serde_json::json!({
            "gemini": {
                "apiKey": self.masked_api_key(),
                "model": self.gemini_model,
            },
            "backend": self.backend.as_str(),
            "apiUrl": self.api_url,
        })
    }
}

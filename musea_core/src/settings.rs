//! Per-source tuning knobs.
//!
//! Everything has sensible defaults; a YAML file under the user config dir
//! can override them, and the Rijksmuseum legacy-API key can also come from
//! the `RIJKSMUSEUM_API_KEY` environment variable.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::artwork::Source;

// ============================================================================
// Default Values
// ============================================================================

/// Default per-source deadline in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 25_000;

/// Rijksmuseum deadline; larger because every artwork costs two calls
/// (Linked-Art resolve + legacy image lookup).
pub const DEFAULT_RIJKS_TIMEOUT_MS: u64 = 40_000;

/// Default bound on concurrent detail fetches within one source.
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 5;

/// Courtesy delay between Rijksmuseum requests, in milliseconds.
pub const DEFAULT_RIJKS_INTERVAL_MS: u64 = 100;

/// Environment variable consulted for the Rijksmuseum legacy-API key.
pub const RIJKS_API_KEY_ENV: &str = "RIJKSMUSEUM_API_KEY";

// ============================================================================
// SourceSettings
// ============================================================================

/// Tuning for one museum's adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Deadline for this source's whole share of a search.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum concurrent detail fetches.
    #[serde(default = "default_detail_concurrency")]
    pub detail_concurrency: usize,

    /// Minimum spacing between requests to this upstream; 0 disables the gate.
    #[serde(default)]
    pub min_request_interval_ms: u64,

    /// API key, for upstreams that need one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_detail_concurrency() -> usize {
    DEFAULT_DETAIL_CONCURRENCY
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
            min_request_interval_ms: 0,
            api_key: None,
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Tuning for all three adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub met: SourceSettings,

    #[serde(default = "default_rijks_settings")]
    pub rijks: SourceSettings,

    #[serde(default)]
    pub va: SourceSettings,
}

fn default_rijks_settings() -> SourceSettings {
    SourceSettings {
        timeout_ms: DEFAULT_RIJKS_TIMEOUT_MS,
        min_request_interval_ms: DEFAULT_RIJKS_INTERVAL_MS,
        ..SourceSettings::default()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            met: SourceSettings::default(),
            rijks: default_rijks_settings(),
            va: SourceSettings::default(),
        }
    }
}

static BUILTIN: Lazy<Settings> = Lazy::new(Settings::default);

impl Settings {
    /// The built-in defaults, before any file or environment overrides.
    pub fn builtin() -> &'static Settings {
        &BUILTIN
    }

    pub fn for_source(&self, source: Source) -> &SourceSettings {
        match source {
            Source::Met => &self.met,
            Source::Rijks => &self.rijks,
            Source::Va => &self.va,
        }
    }

    /// Fill the Rijksmuseum API key from the environment when the settings
    /// file didn't provide one.
    pub fn with_env_overrides(mut self) -> Self {
        if self.rijks.api_key.is_none() {
            if let Ok(key) = std::env::var(RIJKS_API_KEY_ENV) {
                if !key.is_empty() {
                    self.rijks.api_key = Some(key);
                }
            }
        }
        self
    }
}

// ============================================================================
// SettingsStore
// ============================================================================

/// Storage for user-tuned settings.
///
/// Settings are stored in YAML format at `~/.config/musea/settings.yaml`.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store at the default location.
    pub fn new_default() -> Self {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        let path = base.join("musea").join("settings.yaml");
        Self { path }
    }

    /// Create a store at a custom path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load settings, falling back to the built-in defaults when the file is
    /// missing or unreadable. Environment overrides apply afterwards.
    pub fn load(&self) -> Settings {
        let settings = match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|_| Settings::default()),
            Err(_) => Settings::builtin().clone(),
        };
        settings.with_env_overrides()
    }

    /// Save settings.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsStoreError::Io(e.to_string()))?;
        }

        let content = serde_yaml::to_string(settings)
            .map_err(|e| SettingsStoreError::Serialize(e.to_string()))?;

        std::fs::write(&self.path, content).map_err(|e| SettingsStoreError::Io(e.to_string()))?;

        Ok(())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new_default()
    }
}

/// Errors from settings storage operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsStoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

// ============================================================================
// Tests
// ============================================================================

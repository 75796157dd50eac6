use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::JournalError;

/// Top-level application configuration, loaded from TOML.
///
/// Constructed once in `main` and passed explicitly into the store and the
/// question loader; nothing below this layer looks up paths on its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub questions: QuestionsConfig,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Load configuration from the default path (~/.config/moodlog/config.toml),
    /// falling back to defaults if the file doesn't exist.
    pub fn load() -> Result<Self, JournalError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, JournalError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| JournalError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Write current configuration to the default path.
    pub fn save(&self) -> Result<(), JournalError> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| JournalError::Config(e.to_string()))?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    /// Default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("moodlog")
            .join("config.toml")
    }

    /// Data directory for the journal file.
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("moodlog")
    }

    /// Resolved path of the journal file.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("entries.json"))
    }

    /// Resolved path of the questions file, if one is configured or present
    /// at the default location. `None` means use the built-in question set.
    pub fn questions_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.questions.path {
            return Some(path.clone());
        }
        let default = Self::default_path().with_file_name("questions.yml");
        default.exists().then_some(default)
    }
}

/// Journal file persistence configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the journal file (default: data dir / entries.json).
    pub path: Option<PathBuf>,
}

/// Question definition configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionsConfig {
    /// Path of a questions.yml overriding the built-in set.
    pub path: Option<PathBuf>,
}

/// Analysis defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rolling-average window in days.
    pub window: usize,
    /// How many entries `show` prints by default.
    pub show_last: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: 7,
            show_last: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("window = 7"));
        assert!(toml_str.contains("show_last = 10"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.analysis.window, config.analysis.window);
        assert_eq!(parsed.store.path, config.store.path);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = toml::from_str("[analysis]\nwindow = 14\n").unwrap();
        assert_eq!(parsed.analysis.window, 14);
        assert_eq!(parsed.analysis.show_last, 10);
        assert!(parsed.store.path.is_none());
    }

    #[test]
    fn test_store_path_override() {
        let mut config = AppConfig::default();
        config.store.path = Some(PathBuf::from("/tmp/journal.json"));
        assert_eq!(config.store_path(), PathBuf::from("/tmp/journal.json"));
    }

    #[test]
    fn test_malformed_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\nwindow = \"often\"\n").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, JournalError::Config(_)));
    }
}

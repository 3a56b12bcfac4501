//! Configuration settings for Tubeqa.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub ollama: OllamaSettings,
    pub qa: QaSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// YouTube-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct YoutubeSettings {
    /// YouTube Data API key. Falls back to the YOUTUBE_API_KEY
    /// environment variable when unset.
    pub api_key: Option<String>,
    /// Playlist or channel URL used when a command omits one.
    pub default_url: Option<String>,
}


/// Ollama LLM settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaSettings {
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Model used for answer generation.
    pub model: String,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
        }
    }
}

/// Question answering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaSettings {
    /// Maximum playlist videos to include in the answer context.
    pub max_videos: usize,
    /// Maximum channel videos fetched for relevance-ranked questions.
    pub channel_max_videos: usize,
}

impl Default for QaSettings {
    fn default() -> Self {
        Self {
            max_videos: 10,
            channel_max_videos: 20,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TubeqaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tubeqa")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// YouTube API key from config, or the environment as a fallback.
    pub fn youtube_api_key(&self) -> Option<String> {
        self.youtube
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("YOUTUBE_API_KEY").ok().filter(|k| !k.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.ollama.base_url, "http://localhost:11434");
        assert_eq!(settings.ollama.model, "llama3.2");
        assert_eq!(settings.qa.max_videos, 10);
        assert_eq!(settings.qa.channel_max_videos, 20);
        assert!(settings.youtube.api_key.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [ollama]
            model = "mistral"
            "#,
        )
        .unwrap();
        assert_eq!(settings.ollama.model, "mistral");
        assert_eq!(settings.ollama.base_url, "http://localhost:11434");
        assert_eq!(settings.qa.max_videos, 10);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.youtube.api_key = Some("test-key".to_string());
        settings.qa.max_videos = 25;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.youtube.api_key.as_deref(), Some("test-key"));
        assert_eq!(loaded.qa.max_videos, 25);
    }

    #[test]
    fn test_expand_path_plain() {
        let expanded = Settings::expand_path("/tmp/tubeqa.toml");
        assert_eq!(expanded, PathBuf::from("/tmp/tubeqa.toml"));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let path = PathBuf::from("/nonexistent/tubeqa/config.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.ollama.model, "llama3.2");
    }
}

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Capture
    pub capture_backend: String,
    pub phoneme_timeout_ms: u64,
    pub word_timeout_ms: u64,
    pub max_alternatives: usize,
    pub language: String,

    // Retry policy
    pub max_attempts: u32,

    // Prompting
    pub prompter: String,
    pub blend_pause_ms: u64,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture_backend: "typed".to_string(),
            // Isolated phoneme sounds are short; whole words get longer
            phoneme_timeout_ms: 2000,
            word_timeout_ms: 3000,
            max_alternatives: 10,
            language: "en-US".to_string(),
            max_attempts: 2,
            prompter: "console".to_string(),
            blend_pause_ms: 600,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from file or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path (used by tests and `--config`)
    pub fn load_from(config_path: &PathBuf) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            match serde_json::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    // Graceful degradation: log warning and use defaults
                    tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                    let backup_path = config_path.with_extension("json.corrupt");
                    let _ = std::fs::rename(config_path, &backup_path);
                    Ok(Self::default())
                }
            }
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    /// Save config to an explicit path
    pub fn save_to(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }
}

/// Default config file location
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_default()
        .join("wordpets")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.max_attempts, 2);
        assert!(cfg.phoneme_timeout_ms < cfg.word_timeout_ms);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.capture_backend, "typed");
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");

        let mut cfg = Config::default();
        cfg.max_attempts = 3;
        cfg.word_timeout_ms = 5000;
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.max_attempts, 3);
        assert_eq!(loaded.word_timeout_ms, 5000);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").expect("write");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.max_attempts, Config::default().max_attempts);
        assert!(path.with_extension("json.corrupt").exists());
    }
}

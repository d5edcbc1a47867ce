//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for lexocr.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexocrConfig {
    /// Scan orchestration configuration.
    pub scan: ScanConfig,

    /// Recognition engine configuration.
    pub engine: EngineConfig,
}

/// Scan orchestration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Language model identifier passed to the engine.
    pub lang: String,

    /// JPEG quality (0 - 100) for camera captures.
    pub jpeg_quality: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            lang: "fra".to_string(),
            jpeg_quality: 80,
        }
    }
}

/// Recognition engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Path to the engine worker binary.
    pub binary: PathBuf,

    /// Page segmentation mode, if the engine supports one.
    pub page_segmentation_mode: Option<u8>,

    /// Per-recognition worker timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            page_segmentation_mode: None,
            timeout_secs: 120,
        }
    }
}

impl LexocrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_target_french() {
        let config = LexocrConfig::default();
        assert_eq!(config.scan.lang, "fra");
        assert_eq!(config.scan.jpeg_quality, 80);
        assert_eq!(config.engine.binary, PathBuf::from("tesseract"));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = LexocrConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: LexocrConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.scan.lang, config.scan.lang);
        assert_eq!(back.engine.timeout_secs, config.engine.timeout_secs);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: LexocrConfig = serde_json::from_str(r#"{"scan":{"lang":"eng"}}"#).unwrap();
        assert_eq!(config.scan.lang, "eng");
        assert_eq!(config.scan.jpeg_quality, 80);
    }
}

//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{OcrFieldsError, Result};
use crate::recognition::ConfidencePolicy;

/// Main configuration for ocrfields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrFieldsConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Recognition input handling.
    pub input: InputConfig,

    /// Output rendering.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Keep total labels from pairing with amounts on a different page.
    pub isolate_pages: bool,
}

/// How recognition output is turned into blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Reject or repair out-of-range confidence values.
    pub confidence_policy: ConfidencePolicy,

    /// Re-sort blocks by geometry before extraction.
    pub reorder_blocks: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            confidence_policy: ConfidencePolicy::Clamp,
            reorder_blocks: false,
        }
    }
}

/// Output rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl OcrFieldsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| OcrFieldsError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = OcrFieldsConfig::default();
        assert!(!config.extraction.isolate_pages);
        assert_eq!(config.input.confidence_policy, ConfidencePolicy::Clamp);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: OcrFieldsConfig =
            serde_json::from_str(r#"{"extraction": {"isolate_pages": true}}"#).unwrap();
        assert!(config.extraction.isolate_pages);
        assert_eq!(config.input, InputConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = OcrFieldsConfig::default();
        config.input.confidence_policy = ConfidencePolicy::Strict;
        config.save(&path).unwrap();

        assert_eq!(OcrFieldsConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            OcrFieldsConfig::from_file(&path),
            Err(OcrFieldsError::Config(_))
        ));
    }
}

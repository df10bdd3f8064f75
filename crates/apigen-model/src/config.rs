//! Model configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::field::{Definition, DefinitionError, RawField, Strictness};

/// A model description: identifiers, routing segments and the field tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Service identifier, used to build operation ids
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Route segment the model is served under
    pub api: String,

    /// Application segment (becomes the document base path)
    pub app: String,

    /// Port the generated service listens on
    pub port: u16,

    /// Whether list and export routes accept a full-text search parameter
    #[serde(rename = "enableSearchIndex", default)]
    pub enable_search_index: bool,

    /// Root field definitions
    #[serde(default)]
    pub definition: IndexMap<String, RawField>,

    /// Project directory the document is published into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Errors that can occur when loading a model config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read model file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid JSON in model file: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML in model file: {0}")]
    InvalidYaml(String),
}

impl ModelConfig {
    /// Parse a model config from JSON.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(source).map_err(|e| ConfigError::InvalidJson(e.to_string()))
    }

    /// Parse a model config from YAML.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(source).map_err(|e| ConfigError::InvalidYaml(e.to_string()))
    }

    /// Load a model config from disk.
    ///
    /// `.yaml` and `.yml` files are read as YAML, everything else as JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let config = match ext {
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            _ => Self::from_json_str(&content)?,
        };

        tracing::debug!(
            "Loaded model '{}' with {} root fields from {}",
            config.name,
            config.definition.len(),
            path.display()
        );

        Ok(config)
    }

    /// Route base path, always with a leading slash.
    pub fn base_path(&self) -> String {
        if self.api.starts_with('/') {
            self.api.clone()
        } else {
            format!("/{}", self.api)
        }
    }

    /// Typed root definition.
    pub fn typed_definition(&self, strictness: Strictness) -> Result<Definition, DefinitionError> {
        Definition::from_raw(&self.definition, strictness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const MODEL_JSON: &str = r#"{
        "_id": "SRVC2006",
        "name": "Customer Orders",
        "api": "orders",
        "app": "Adam",
        "port": 20010,
        "enableSearchIndex": true,
        "definition": {
            "_id": {"type": "String"},
            "total": {"type": "Number", "properties": {"required": true}}
        }
    }"#;

    #[test]
    fn parses_json_config() {
        let config = ModelConfig::from_json_str(MODEL_JSON).unwrap();

        assert_eq!(config.id, "SRVC2006");
        assert_eq!(config.name, "Customer Orders");
        assert_eq!(config.port, 20010);
        assert!(config.enable_search_index);
        assert_eq!(config.definition.len(), 2);
        assert!(config.path.is_none());
    }

    #[test]
    fn search_index_defaults_to_off() {
        let config = ModelConfig::from_json_str(
            r#"{"_id": "S1", "name": "n", "api": "/n", "app": "a", "port": 1}"#,
        )
        .unwrap();

        assert!(!config.enable_search_index);
        assert!(config.definition.is_empty());
    }

    #[test]
    fn normalizes_base_path() {
        let mut config = ModelConfig::from_json_str(MODEL_JSON).unwrap();
        assert_eq!(config.base_path(), "/orders");

        config.api = "/orders".to_string();
        assert_eq!(config.base_path(), "/orders");
    }

    #[test]
    fn loads_yaml_and_json_by_extension() {
        let temp = tempdir().unwrap();

        let json_path = temp.path().join("model.json");
        fs::write(&json_path, MODEL_JSON).unwrap();
        let from_json = ModelConfig::load(&json_path).unwrap();

        let yaml_path = temp.path().join("model.yaml");
        fs::write(&yaml_path, serde_yaml::to_string(&from_json).unwrap()).unwrap();
        let from_yaml = ModelConfig::load(&yaml_path).unwrap();

        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn errors_on_missing_file() {
        let temp = tempdir().unwrap();
        let result = ModelConfig::load(&temp.path().join("absent.json"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn errors_on_invalid_json() {
        let result = ModelConfig::from_json_str("{\"_id\": ");

        assert!(matches!(result, Err(ConfigError::InvalidJson(_))));
    }
}

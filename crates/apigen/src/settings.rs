//! apigen.toml loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration file structure (apigen.toml).
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub generate: GenerateSettings,
}

#[derive(Debug, Deserialize)]
pub struct ModelSettings {
    /// Model file to generate from
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Project directory; falls back to the model's own `path`, then "."
    pub project: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct GenerateSettings {
    #[serde(default)]
    pub strict: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.json")
}

/// Load settings from `path` if it exists.
/// Returns an error if the file exists but is malformed.
pub fn load(path: &Path) -> Result<Settings> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();

        let settings = load(&temp.path().join("apigen.toml")).unwrap();

        assert_eq!(settings.model.path, PathBuf::from("model.json"));
        assert!(settings.output.project.is_none());
        assert!(!settings.generate.strict);
    }

    #[test]
    fn reads_all_sections() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("apigen.toml");
        fs::write(
            &path,
            "[model]\npath = \"models/orders.yaml\"\n\n[output]\nproject = \"svc\"\n\n[generate]\nstrict = true\n",
        )
        .unwrap();

        let settings = load(&path).unwrap();

        assert_eq!(settings.model.path, PathBuf::from("models/orders.yaml"));
        assert_eq!(settings.output.project, Some(PathBuf::from("svc")));
        assert!(settings.generate.strict);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("apigen.toml");
        fs::write(&path, "[generate]\nstrict = true\n").unwrap();

        let settings = load(&path).unwrap();

        assert_eq!(settings.model.path, PathBuf::from("model.json"));
        assert!(settings.generate.strict);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("apigen.toml");
        fs::write(&path, "[model\npath = ").unwrap();

        assert!(load(&path).is_err());
    }
}

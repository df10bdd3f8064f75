//! Initialize apigen in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    init_in(Path::new("."), yes)
}

fn init_in(root: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing apigen...");

    let config_path = root.join("apigen.toml");
    let model_path = root.join("model.json");

    if (config_path.exists() || model_path.exists()) && !yes {
        tracing::warn!("apigen.toml or model.json already exists. Use --yes to overwrite.");
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write apigen.toml")?;
    tracing::info!("Created apigen.toml");

    fs::write(&model_path, DEFAULT_MODEL).context("Failed to write model.json")?;
    tracing::info!("Created model.json");

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'apigen generate' to write api/swagger/swagger.yaml.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# apigen configuration

[model]
# Model file (JSON or YAML)
path = "model.json"

[output]
# Project directory; swagger.yaml is written to <project>/api/swagger/.
# Defaults to the model's own "path", then the current directory.
# project = "."

[generate]
# Fail on unrecognized field types instead of passing them through
strict = false
"#;

const DEFAULT_MODEL: &str = r#"{
  "_id": "SRVC2001",
  "name": "Customer",
  "api": "/customer",
  "app": "Adam",
  "port": 20001,
  "enableSearchIndex": false,
  "definition": {
    "_id": {
      "type": "String",
      "properties": { "name": "ID" }
    },
    "name": {
      "type": "String",
      "properties": { "name": "Name", "required": true }
    },
    "status": {
      "type": "String",
      "properties": { "name": "Status", "enum": ["active", "inactive"] }
    },
    "address": {
      "type": "Object",
      "definition": {
        "city": { "type": "String" },
        "zip": { "type": "Number" }
      }
    },
    "tags": {
      "type": "Array",
      "definition": {
        "_self": { "type": "String" }
      }
    },
    "credit": {
      "type": "Number"
    }
  }
}
"#;

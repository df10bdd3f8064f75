//! Model validation command.

use std::path::Path;

use anyhow::{Context, Result};
use apigen_model::{ModelConfig, Strictness};
use apigen_schema::{derive_schemas, INCREMENT_OP};
use apigen_swagger::assemble_document;

use crate::commands::generate::strictness;

/// What generating a model would produce.
#[derive(Debug, PartialEq)]
struct Summary {
    root_fields: usize,
    required: usize,
    math_paths: Vec<String>,
    paths: usize,
    operations: usize,
    definitions: usize,
}

/// Run the check command.
pub fn run(model: &Path, strict: bool) -> Result<()> {
    let config = ModelConfig::load(model)
        .with_context(|| format!("Failed to load model {}", model.display()))?;
    let summary = summarize(&config, strictness(strict))
        .with_context(|| format!("Invalid definition in {}", model.display()))?;

    tracing::info!(
        "Model '{}': {} root fields, {} required",
        config.name,
        summary.root_fields,
        summary.required
    );

    if summary.math_paths.is_empty() {
        tracing::info!("No numeric fields, math route disabled");
    } else {
        tracing::info!("Math paths: {}", summary.math_paths.join(", "));
    }

    tracing::info!(
        "Would generate {} paths ({} operations) and {} definitions",
        summary.paths,
        summary.operations,
        summary.definitions
    );

    Ok(())
}

fn summarize(config: &ModelConfig, strictness: Strictness) -> Result<Summary> {
    let definition = config.typed_definition(strictness)?;
    let schemas = derive_schemas(&definition);

    let required = schemas.create.required.len();
    let math_paths = schemas
        .math
        .as_ref()
        .and_then(|math| math.property(INCREMENT_OP))
        .and_then(|inc| inc.properties.as_ref())
        .map(|properties| properties.keys().cloned().collect())
        .unwrap_or_default();

    let document = assemble_document(config, schemas);

    Ok(Summary {
        root_fields: definition.len(),
        required,
        math_paths,
        paths: document.paths.len(),
        operations: document.operation_count(),
        definitions: document.definitions.len(),
    })
}

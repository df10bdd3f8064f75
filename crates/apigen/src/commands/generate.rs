//! Document generation command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use apigen_model::{ModelConfig, Strictness};
use apigen_swagger::Publisher;

/// Resolved options for a generate run.
#[derive(Debug)]
pub struct Options {
    /// Model file
    pub model: PathBuf,
    /// Project directory given on the command line
    pub project: Option<PathBuf>,
    /// Project directory from apigen.toml
    pub default_project: Option<PathBuf>,
    pub strict: bool,
    /// Print instead of writing
    pub stdout: bool,
}

/// Pick the project directory: flag, then apigen.toml, then the model's own path.
fn resolve_project(options: &Options, config: &ModelConfig) -> PathBuf {
    options
        .project
        .clone()
        .or_else(|| options.default_project.clone())
        .or_else(|| config.path.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn strictness(strict: bool) -> Strictness {
    if strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    }
}

/// Run the generate command.
pub async fn run(options: Options) -> Result<()> {
    tracing::info!("Generating from {}...", options.model.display());

    let config = ModelConfig::load(&options.model)
        .with_context(|| format!("Failed to load model {}", options.model.display()))?;
    let publisher = Publisher::new(strictness(options.strict));

    if options.stdout {
        let (_, yaml) = publisher.render(&config)?;
        print!("{}", yaml);
        return Ok(());
    }

    let project = resolve_project(&options, &config);
    let result = publisher.publish(&config, &project).await?;

    tracing::info!(
        "Generated {} paths ({} operations) and {} definitions in {}ms",
        result.paths,
        result.operations,
        result.definitions,
        result.duration_ms
    );
    tracing::info!("Output: {}", result.path.display());

    Ok(())
}

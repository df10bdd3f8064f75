//! apigen CLI - generates API gateway Swagger documents from model definitions.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod settings;

#[derive(Parser)]
#[command(name = "apigen")]
#[command(about = "Generates API gateway Swagger documents from model definitions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to apigen.toml config file
    #[arg(short, long, default_value = "apigen.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter apigen.toml and model file
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate api/swagger/swagger.yaml for a model
    Generate {
        /// Model file (JSON or YAML); defaults to the config value
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Project directory to publish into
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Reject unrecognized field types instead of passing them through
        #[arg(long)]
        strict: bool,

        /// Print the document to stdout instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// Validate a model and summarize the document it would produce
    Check {
        /// Model file (JSON or YAML); defaults to the config value
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Reject unrecognized field types instead of passing them through
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes).await?;
        }
        Commands::Generate {
            model,
            project,
            strict,
            stdout,
        } => {
            let settings = settings::load(&cli.config)?;
            let options = commands::generate::Options {
                model: model.unwrap_or(settings.model.path),
                project,
                default_project: settings.output.project,
                strict: strict || settings.generate.strict,
                stdout,
            };
            commands::generate::run(options).await?;
        }
        Commands::Check { model, strict } => {
            let settings = settings::load(&cli.config)?;
            commands::check::run(
                &model.unwrap_or(settings.model.path),
                strict || settings.generate.strict,
            )?;
        }
    }

    Ok(())
}

//! Serializing and publishing generated documents.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use apigen_model::{ModelConfig, Strictness};

use crate::document::SwaggerDocument;
use crate::generate::{generate_document, GenerateError};

/// Location of the document inside a project directory.
pub fn document_path(project_dir: &Path) -> PathBuf {
    project_dir.join("api").join("swagger").join("swagger.yaml")
}

/// Destination for serialized documents.
pub trait DocumentSink: Send + Sync {
    /// Write `contents` to `path`, replacing any existing file.
    fn write(&self, path: &Path, contents: String) -> impl Future<Output = io::Result<()>> + Send;
}

/// Writes documents to the local filesystem, creating parent directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl DocumentSink for FsSink {
    fn write(&self, path: &Path, contents: String) -> impl Future<Output = io::Result<()>> + Send {
        let path = path.to_path_buf();
        async move {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, contents).await
        }
    }
}

/// Result of a publish operation.
#[derive(Debug)]
pub struct PublishResult {
    /// File the document was written to
    pub path: PathBuf,

    /// Number of route paths
    pub paths: usize,

    /// Number of operations across all paths
    pub operations: usize,

    /// Number of definitions
    pub definitions: usize,

    /// Total time in milliseconds
    pub duration_ms: u64,
}

/// Errors that can occur while publishing.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("Failed to serialize document: {0}")]
    Serialize(String),

    #[error("Publish failed: could not write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Generates a model's document and writes it into a project.
pub struct Publisher<S = FsSink> {
    sink: S,
    strictness: Strictness,
}

impl Publisher<FsSink> {
    /// Create a publisher writing to the filesystem.
    pub fn new(strictness: Strictness) -> Self {
        Self::with_sink(FsSink, strictness)
    }
}

impl<S: DocumentSink> Publisher<S> {
    /// Create a publisher writing through a custom sink.
    pub fn with_sink(sink: S, strictness: Strictness) -> Self {
        Self { sink, strictness }
    }

    /// Generate and serialize the document without writing it.
    pub fn render(&self, config: &ModelConfig) -> Result<(SwaggerDocument, String), PublishError> {
        let document = generate_document(config, self.strictness)?;
        let yaml = document
            .to_yaml()
            .map_err(|e| PublishError::Serialize(e.to_string()))?;
        Ok((document, yaml))
    }

    /// Generate the document and write it to `<project_dir>/api/swagger/swagger.yaml`.
    pub async fn publish(
        &self,
        config: &ModelConfig,
        project_dir: &Path,
    ) -> Result<PublishResult, PublishError> {
        let start = Instant::now();

        let (document, yaml) = self.render(config)?;
        let path = document_path(project_dir);

        self.sink
            .write(&path, yaml)
            .await
            .map_err(|source| PublishError::WriteFailed {
                path: path.clone(),
                source,
            })?;

        tracing::info!(
            "swagger.yaml created for '{}' at {}",
            config.name,
            path.display()
        );

        Ok(PublishResult {
            path,
            paths: document.paths.len(),
            operations: document.operation_count(),
            definitions: document.definitions.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

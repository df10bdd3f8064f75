//! Swagger document generation for apigen.
//!
//! Assembles the route table and schema definitions of a model into a Swagger
//! 2.0 document and publishes it as YAML into a project directory.

pub mod document;
pub mod generate;
pub mod naming;
pub mod parameters;
pub mod publish;
pub mod routes;

pub use document::{
    HttpMethod, Info, Operation, Parameter, ParameterLocation, PathItem, Response,
    SwaggerDocument,
};
pub use generate::{assemble_document, generate_document, GenerateError};
pub use naming::{DefinitionNames, OperationIds, OperationKind};
pub use publish::{document_path, DocumentSink, FsSink, PublishError, PublishResult, Publisher};
pub use routes::RouteTableBuilder;

//! Model configuration and field definitions for apigen.
//!
//! This crate reads model files, which describe a data model as a tree of
//! tagged field nodes, and converts those nodes into a typed [`Definition`].

pub mod config;
pub mod field;

pub use config::{ConfigError, ModelConfig};
pub use field::{
    Definition, DefinitionError, Field, FieldKind, FieldProperties, Primitive, RawField,
    Strictness, ARRAY_ELEMENT_KEY, IDENTITY_FIELD,
};

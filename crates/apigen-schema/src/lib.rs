//! Schema derivation for apigen.
//!
//! Turns a typed field [`Definition`] into the three validation schemas a
//! generated service needs: one for create payloads, one for partial updates,
//! and an optional one for numeric increment/multiply operations.

pub mod derive;
pub mod math;
pub mod schema;

pub use derive::{creation_schema, update_schema};
pub use math::{math_schema, numeric_paths, INCREMENT_OP, MULTIPLY_OP};
pub use schema::{Schema, SchemaType};

use apigen_model::Definition;

/// The schemas derived for one model.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaSet {
    pub create: Schema,
    pub update: Schema,
    pub math: Option<Schema>,
}

/// Derive every schema for a definition.
pub fn derive_schemas(definition: &Definition) -> SchemaSet {
    let create = creation_schema(definition);
    let update = update_schema(&create);
    let paths = numeric_paths(definition);

    tracing::debug!(
        "Derived schemas for {} fields ({} required, {} numeric paths)",
        definition.len(),
        create.required.len(),
        paths.len()
    );

    SchemaSet {
        create,
        update,
        math: math_schema(&paths),
    }
}

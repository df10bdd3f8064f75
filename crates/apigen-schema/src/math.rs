//! Numeric math schema: increment and multiply operations over number fields.

use indexmap::IndexMap;

use apigen_model::{Definition, FieldKind, IDENTITY_FIELD};

use crate::schema::{Schema, SchemaType};

/// Increment-by operator key.
pub const INCREMENT_OP: &str = "$inc";

/// Multiply-by operator key.
pub const MULTIPLY_OP: &str = "$mul";

/// Dotted paths to every numeric leaf reachable through object nesting.
///
/// Arrays and user references are not addressable by path and are skipped.
pub fn numeric_paths(definition: &Definition) -> Vec<String> {
    let mut paths = Vec::new();
    collect_numeric_paths(definition, "", &mut paths);
    paths
}

fn collect_numeric_paths(definition: &Definition, prefix: &str, paths: &mut Vec<String>) {
    for (name, field) in definition.iter() {
        // identity fields are always strings
        if name == IDENTITY_FIELD {
            continue;
        }

        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", prefix, name)
        };

        match &field.kind {
            FieldKind::Object(nested) => collect_numeric_paths(nested, &path, paths),
            _ if field.is_numeric() => paths.push(path),
            _ => {}
        }
    }
}

/// Build the math schema for the given paths, or `None` if there are none.
pub fn math_schema(paths: &[String]) -> Option<Schema> {
    if paths.is_empty() {
        return None;
    }

    let operands: IndexMap<String, Schema> = paths
        .iter()
        .map(|path| (path.clone(), Schema::of_type(SchemaType::single("number"))))
        .collect();

    let mut operations = IndexMap::new();
    operations.insert(INCREMENT_OP.to_string(), Schema::typed_object(operands.clone()));
    operations.insert(MULTIPLY_OP.to_string(), Schema::typed_object(operands));

    Some(Schema::object(operations))
}

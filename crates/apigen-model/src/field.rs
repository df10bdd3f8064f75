//! Field definitions: the raw tagged-node format and its typed form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the identity key. Always typed as a string in generated schemas.
pub const IDENTITY_FIELD: &str = "_id";

/// Key holding an array's element node inside its `definition` mapping.
pub const ARRAY_ELEMENT_KEY: &str = "_self";

/// A field node as it appears in a model file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    /// Type tag (`String`, `Number`, `Object`, `Array`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Nested definition for composite tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<IndexMap<String, RawField>>,

    /// Constraints and metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<FieldProperties>,
}

/// Constraint metadata attached to a field node.
///
/// Only the keys the generator acts on are kept; everything else a model file
/// carries (labels, widths, ...) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldProperties {
    /// Required marker
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    /// Allowed values
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

/// Primitive field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    LargeString,
    Number,
    Boolean,
    Date,
}

impl Primitive {
    /// Parse a primitive from its type tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "String" => Some(Self::String),
            "largeString" => Some(Self::LargeString),
            "Number" => Some(Self::Number),
            "Boolean" => Some(Self::Boolean),
            "Date" => Some(Self::Date),
            _ => None,
        }
    }

    /// Output schema type for this primitive.
    pub fn schema_type(&self) -> &'static str {
        match self {
            Self::String | Self::LargeString | Self::Date => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// The shape of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Primitive(Primitive),
    /// Embedded object
    Object(Definition),
    /// Reference to a user document
    User(Definition),
    /// Array of the boxed element
    Array(Box<Field>),
    /// Tag the generator does not know; the raw tag is kept (empty if missing)
    Unrecognized(String),
}

/// A typed field definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub kind: FieldKind,
    pub required: bool,
    pub enum_values: Vec<serde_json::Value>,
}

impl Field {
    /// Create an optional field of the given kind.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            enum_values: Vec::new(),
        }
    }

    /// Shorthand for a primitive field.
    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(FieldKind::Primitive(primitive))
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Whether this field holds a number.
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, FieldKind::Primitive(Primitive::Number))
    }
}

/// An ordered mapping of field names to typed field definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definition {
    fields: IndexMap<String, Field>,
}

impl Definition {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any previous field of the same name.
    pub fn insert(&mut self, name: impl Into<String>, field: Field) {
        self.fields.insert(name.into(), field);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, field: Field) -> Self {
        self.insert(name, field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert a raw definition mapping into its typed form.
    pub fn from_raw(
        raw: &IndexMap<String, RawField>,
        strictness: Strictness,
    ) -> Result<Self, DefinitionError> {
        convert_definition(raw, "", strictness)
    }
}

/// How to treat nodes the generator cannot interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Keep going: unknown tags become [`FieldKind::Unrecognized`] and missing
    /// nested definitions are treated as empty
    #[default]
    Lenient,
    /// Reject the whole definition
    Strict,
}

/// Errors raised while typing a raw definition in strict mode.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DefinitionError {
    #[error("Field '{path}' has no type tag")]
    MissingTag { path: String },

    #[error("Field '{path}' has unrecognized type '{tag}'")]
    UnrecognizedTag { path: String, tag: String },

    #[error("Field '{path}' of type {tag} has no nested definition")]
    MissingDefinition { path: String, tag: String },
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn convert_definition(
    raw: &IndexMap<String, RawField>,
    parent: &str,
    strictness: Strictness,
) -> Result<Definition, DefinitionError> {
    let mut definition = Definition::new();
    for (name, node) in raw {
        let path = join_path(parent, name);
        definition.insert(name.clone(), convert_field(node, &path, strictness)?);
    }
    Ok(definition)
}

fn convert_field(
    node: &RawField,
    path: &str,
    strictness: Strictness,
) -> Result<Field, DefinitionError> {
    let tag = node.kind.as_deref().unwrap_or("");

    let kind = match tag {
        "Object" | "User" => {
            let nested = match &node.definition {
                Some(nested) => convert_definition(nested, path, strictness)?,
                None => missing_definition(path, tag, strictness)?,
            };
            if tag == "Object" {
                FieldKind::Object(nested)
            } else {
                FieldKind::User(nested)
            }
        }
        "Array" => {
            let element = node
                .definition
                .as_ref()
                .and_then(|nested| nested.get(ARRAY_ELEMENT_KEY));
            match element {
                Some(element) => {
                    let element_path = join_path(path, ARRAY_ELEMENT_KEY);
                    FieldKind::Array(Box::new(convert_field(
                        element,
                        &element_path,
                        strictness,
                    )?))
                }
                None => {
                    missing_definition(path, tag, strictness)?;
                    FieldKind::Array(Box::new(Field::new(FieldKind::Unrecognized(
                        String::new(),
                    ))))
                }
            }
        }
        "" => match strictness {
            Strictness::Strict => {
                return Err(DefinitionError::MissingTag {
                    path: path.to_string(),
                })
            }
            Strictness::Lenient => {
                tracing::warn!("Field '{}' has no type tag", path);
                FieldKind::Unrecognized(String::new())
            }
        },
        other => match Primitive::from_tag(other) {
            Some(primitive) => FieldKind::Primitive(primitive),
            None if strictness == Strictness::Strict => {
                return Err(DefinitionError::UnrecognizedTag {
                    path: path.to_string(),
                    tag: other.to_string(),
                })
            }
            None => {
                tracing::warn!("Field '{}' has unrecognized type '{}'", path, other);
                FieldKind::Unrecognized(other.to_string())
            }
        },
    };

    let properties = node.properties.clone().unwrap_or_default();

    Ok(Field {
        kind,
        required: properties.required,
        enum_values: properties.enum_values.unwrap_or_default(),
    })
}

fn missing_definition(
    path: &str,
    tag: &str,
    strictness: Strictness,
) -> Result<Definition, DefinitionError> {
    match strictness {
        Strictness::Strict => Err(DefinitionError::MissingDefinition {
            path: path.to_string(),
            tag: tag.to_string(),
        }),
        Strictness::Lenient => {
            tracing::warn!("Field '{}' of type {} has no nested definition", path, tag);
            Ok(Definition::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> IndexMap<String, RawField> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_primitives_with_markers() {
        let raw = parse(
            r#"{
                "name": {"type": "String", "properties": {"required": true, "label": "Name"}},
                "status": {"type": "String", "properties": {"enum": ["open", "closed"]}},
                "age": {"type": "Number"}
            }"#,
        );

        let def = Definition::from_raw(&raw, Strictness::Lenient).unwrap();

        let name = def.get("name").unwrap();
        assert_eq!(name.kind, FieldKind::Primitive(Primitive::String));
        assert!(name.required);

        let status = def.get("status").unwrap();
        assert!(!status.required);
        assert_eq!(
            status.enum_values,
            vec![serde_json::json!("open"), serde_json::json!("closed")]
        );

        assert!(def.get("age").unwrap().is_numeric());
    }

    #[test]
    fn parses_nested_objects_and_arrays() {
        let raw = parse(
            r#"{
                "address": {"type": "Object", "definition": {
                    "zip": {"type": "Number"}
                }},
                "tags": {"type": "Array", "definition": {
                    "_self": {"type": "String"}
                }},
                "owner": {"type": "User", "definition": {
                    "_id": {"type": "String"}
                }}
            }"#,
        );

        let def = Definition::from_raw(&raw, Strictness::Strict).unwrap();

        let FieldKind::Object(address) = &def.get("address").unwrap().kind else {
            panic!("address should be an object");
        };
        assert!(address.get("zip").unwrap().is_numeric());

        let FieldKind::Array(element) = &def.get("tags").unwrap().kind else {
            panic!("tags should be an array");
        };
        assert_eq!(element.kind, FieldKind::Primitive(Primitive::String));

        assert!(matches!(def.get("owner").unwrap().kind, FieldKind::User(_)));
    }

    #[test]
    fn preserves_field_order() {
        let raw = parse(r#"{"b": {"type": "String"}, "a": {"type": "String"}, "c": {"type": "Date"}}"#);

        let def = Definition::from_raw(&raw, Strictness::Lenient).unwrap();
        let names: Vec<_> = def.iter().map(|(name, _)| name).collect();

        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn lenient_keeps_unrecognized_tags() {
        let raw = parse(
            r#"{
                "location": {"type": "Geojson", "properties": {"required": true}},
                "blank": {},
                "items": {"type": "Array"}
            }"#,
        );

        let def = Definition::from_raw(&raw, Strictness::Lenient).unwrap();

        assert_eq!(
            def.get("location").unwrap().kind,
            FieldKind::Unrecognized("Geojson".to_string())
        );
        assert_eq!(
            def.get("blank").unwrap().kind,
            FieldKind::Unrecognized(String::new())
        );
        assert!(matches!(def.get("items").unwrap().kind, FieldKind::Array(_)));
    }

    #[test]
    fn strict_rejects_unrecognized_tag_with_path() {
        let raw = parse(
            r#"{"address": {"type": "Object", "definition": {"geo": {"type": "Geojson"}}}}"#,
        );

        let err = Definition::from_raw(&raw, Strictness::Strict).unwrap_err();

        assert_eq!(
            err,
            DefinitionError::UnrecognizedTag {
                path: "address.geo".to_string(),
                tag: "Geojson".to_string(),
            }
        );
    }

    #[test]
    fn strict_rejects_missing_definitions() {
        let raw = parse(r#"{"owner": {"type": "User"}}"#);
        let err = Definition::from_raw(&raw, Strictness::Strict).unwrap_err();
        assert!(matches!(err, DefinitionError::MissingDefinition { .. }));

        let raw = parse(r#"{"list": {"type": "Array", "definition": {}}}"#);
        let err = Definition::from_raw(&raw, Strictness::Strict).unwrap_err();
        assert!(matches!(err, DefinitionError::MissingDefinition { .. }));

        let raw = parse(r#"{"blank": {"properties": {}}}"#);
        let err = Definition::from_raw(&raw, Strictness::Strict).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::MissingTag {
                path: "blank".to_string()
            }
        );
    }

    #[test]
    fn maps_primitives_to_schema_types() {
        assert_eq!(Primitive::from_tag("largeString").unwrap().schema_type(), "string");
        assert_eq!(Primitive::from_tag("Date").unwrap().schema_type(), "string");
        assert_eq!(Primitive::from_tag("Boolean").unwrap().schema_type(), "boolean");
        assert_eq!(Primitive::from_tag("Number").unwrap().schema_type(), "number");
        assert!(Primitive::from_tag("string").is_none());
    }
}

//! Creation and update schema derivation.

use indexmap::IndexMap;

use apigen_model::{Definition, Field, FieldKind, IDENTITY_FIELD};

use crate::schema::{Schema, SchemaType};

/// Derive the creation schema of an object definition.
///
/// Fields carrying the required marker are listed in `required` (omitted when
/// empty). Fields with an unrecognized tag never are.
pub fn creation_schema(definition: &Definition) -> Schema {
    let mut properties = IndexMap::new();
    let mut required = Vec::new();

    for (name, field) in definition.iter() {
        let recognized = !matches!(field.kind, FieldKind::Unrecognized(_));
        if field.required && recognized {
            required.push(name.to_string());
        }

        properties.insert(name.to_string(), property_schema(name, field));
    }

    let mut schema = Schema::object(properties);
    schema.required = required;
    schema
}

/// Derive the update schema from a creation schema.
///
/// Update payloads are always partial, so the result has no required
/// constraints anywhere.
pub fn update_schema(creation: &Schema) -> Schema {
    creation.relaxed()
}

fn property_schema(name: &str, field: &Field) -> Schema {
    if name == IDENTITY_FIELD {
        return leaf_schema("string", field, true);
    }

    match &field.kind {
        FieldKind::Object(nested) | FieldKind::User(nested) => creation_schema(nested),
        FieldKind::Array(element) => Schema::nullable_array(element_schema(element)),
        FieldKind::Primitive(primitive) => leaf_schema(primitive.schema_type(), field, true),
        FieldKind::Unrecognized(tag) if tag.is_empty() => Schema::default(),
        FieldKind::Unrecognized(tag) => leaf_schema(tag, field, false),
    }
}

/// Schema of a property holding a single value.
fn leaf_schema(type_name: &str, field: &Field, enforce_required: bool) -> Schema {
    let schema_type = if field.required && enforce_required {
        SchemaType::single(type_name)
    } else {
        SchemaType::nullable(type_name)
    };

    let mut schema = Schema::of_type(schema_type);
    schema.enum_values = field.enum_values.clone();
    schema
}

/// Schema of an array element.
fn element_schema(element: &Field) -> Schema {
    match &element.kind {
        FieldKind::Object(nested) | FieldKind::User(nested) => creation_schema(nested),
        FieldKind::Array(inner) => Schema::nullable_array(element_schema(inner)),
        FieldKind::Primitive(primitive) => {
            Schema::of_type(SchemaType::single(primitive.schema_type()))
        }
        FieldKind::Unrecognized(tag) if tag.is_empty() => Schema::default(),
        FieldKind::Unrecognized(tag) => Schema::of_type(SchemaType::single(tag.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apigen_model::{Primitive, RawField, Strictness};
    use pretty_assertions::assert_eq;

    fn definition(json: &str) -> Definition {
        let raw: IndexMap<String, RawField> = serde_json::from_str(json).unwrap();
        Definition::from_raw(&raw, Strictness::Lenient).unwrap()
    }

    fn as_json(schema: &Schema) -> serde_json::Value {
        serde_json::to_value(schema).unwrap()
    }

    #[test]
    fn derives_required_and_nullable_primitives() {
        let def = definition(
            r#"{
                "_id": {"type": "String"},
                "name": {"type": "String", "properties": {"required": true}},
                "age": {"type": "Number"}
            }"#,
        );

        let schema = creation_schema(&def);

        assert_eq!(
            as_json(&schema),
            serde_json::json!({
                "properties": {
                    "_id": {"type": ["string", "null"]},
                    "name": {"type": "string"},
                    "age": {"type": ["number", "null"]}
                },
                "required": ["name"]
            })
        );
    }

    #[test]
    fn omits_empty_required_list() {
        let def = definition(r#"{"flag": {"type": "Boolean"}}"#);

        let json = as_json(&creation_schema(&def));

        assert!(json.get("required").is_none());
        assert_eq!(json["properties"]["flag"]["type"], serde_json::json!(["boolean", "null"]));
    }

    #[test]
    fn forces_identity_field_to_string() {
        let def = definition(
            r#"{
                "_id": {"type": "Number", "properties": {"required": true}},
                "child": {"type": "Object", "definition": {
                    "_id": {"type": "Object", "definition": {"x": {"type": "Number"}}}
                }}
            }"#,
        );

        let schema = creation_schema(&def);

        assert_eq!(
            schema.property("_id").unwrap().schema_type,
            Some(SchemaType::single("string"))
        );
        assert_eq!(
            schema.property("child").unwrap().property("_id").unwrap().schema_type,
            Some(SchemaType::nullable("string"))
        );
        assert_eq!(schema.required, vec!["_id".to_string()]);
    }

    #[test]
    fn copies_enum_values() {
        let def = definition(
            r#"{"status": {"type": "String", "properties": {"enum": ["open", "closed"]}}}"#,
        );

        let json = as_json(&creation_schema(&def));

        assert_eq!(json["properties"]["status"]["enum"], serde_json::json!(["open", "closed"]));
    }

    #[test]
    fn recurses_into_objects_and_user_references() {
        let def = definition(
            r#"{
                "address": {"type": "Object", "properties": {"required": true}, "definition": {
                    "city": {"type": "String", "properties": {"required": true}}
                }},
                "owner": {"type": "User", "definition": {
                    "_id": {"type": "String"}
                }}
            }"#,
        );

        let json = as_json(&creation_schema(&def));

        assert_eq!(
            json,
            serde_json::json!({
                "properties": {
                    "address": {
                        "properties": {"city": {"type": "string"}},
                        "required": ["city"]
                    },
                    "owner": {
                        "properties": {"_id": {"type": ["string", "null"]}}
                    }
                },
                "required": ["address"]
            })
        );
    }

    #[test]
    fn wraps_arrays_by_element_kind() {
        let def = definition(
            r#"{
                "tags": {"type": "Array", "definition": {"_self": {"type": "String"}}},
                "lines": {"type": "Array", "definition": {"_self": {"type": "Object", "definition": {
                    "qty": {"type": "Number"}
                }}}},
                "grid": {"type": "Array", "definition": {"_self": {"type": "Array", "definition": {
                    "_self": {"type": "Date"}
                }}}}
            }"#,
        );

        let json = as_json(&creation_schema(&def));

        assert_eq!(
            json["properties"]["tags"],
            serde_json::json!({"type": ["array", "null"], "items": {"type": "string"}})
        );
        assert_eq!(
            json["properties"]["lines"],
            serde_json::json!({
                "type": ["array", "null"],
                "items": {"properties": {"qty": {"type": ["number", "null"]}}}
            })
        );
        assert_eq!(
            json["properties"]["grid"],
            serde_json::json!({
                "type": ["array", "null"],
                "items": {"type": ["array", "null"], "items": {"type": "string"}}
            })
        );
    }

    #[test]
    fn unrecognized_tags_emit_entries_but_are_never_required() {
        let def = definition(
            r#"{
                "location": {"type": "Geojson", "properties": {"required": true}},
                "blank": {"properties": {"required": true}}
            }"#,
        );

        let schema = creation_schema(&def);

        assert!(schema.required.is_empty());
        assert_eq!(
            schema.property("location").unwrap().schema_type,
            Some(SchemaType::nullable("Geojson"))
        );
        assert_eq!(schema.property("blank"), Some(&Schema::default()));
    }

    #[test]
    fn update_schema_is_fully_optional() {
        let def = Definition::new()
            .with("name", Field::primitive(Primitive::String).required())
            .with("age", Field::primitive(Primitive::Number));

        let creation = creation_schema(&def);
        let update = update_schema(&creation);

        assert!(update.required.is_empty());
        assert_eq!(
            update.property("name").unwrap().schema_type,
            Some(SchemaType::nullable("string"))
        );
        assert_eq!(update.property("age"), creation.property("age"));
        assert_eq!(creation.required, vec!["name".to_string()]);
    }

    #[test]
    fn update_schema_accepts_null_for_required_enums() {
        let def = definition(
            r#"{"status": {"type": "String", "properties": {
                "required": true,
                "enum": ["open", "closed"]
            }}}"#,
        );

        let creation = creation_schema(&def);
        let update = update_schema(&creation);

        assert_eq!(
            as_json(&creation)["properties"]["status"],
            serde_json::json!({"type": "string", "enum": ["open", "closed"]})
        );
        assert_eq!(
            as_json(&update)["properties"]["status"],
            serde_json::json!({"type": ["string", "null"], "enum": ["open", "closed", null]})
        );
    }
}

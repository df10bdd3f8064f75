//! Document assembly.

use indexmap::IndexMap;

use apigen_model::{DefinitionError, ModelConfig, Strictness};
use apigen_schema::{derive_schemas, Schema, SchemaSet, SchemaType};

use crate::document::{Info, SwaggerDocument, SWAGGER_VERSION};
use crate::naming::DefinitionNames;
use crate::routes::RouteTableBuilder;

/// Header mapping payload used by the file mapper.
pub const MAPPING_DEFINITION: &str = "mapping";

/// Sheet enrichment payload.
pub const ENRICH_DEFINITION: &str = "enrichData";

/// Bulk create payload.
pub const BULK_CREATE_DEFINITION: &str = "bulkCreateData";

const DOCUMENT_VERSION: &str = "0.0.1";

/// Errors that can occur while generating a document.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Invalid field definition: {0}")]
    Definition(#[from] DefinitionError),
}

/// Generate the Swagger document for a model.
pub fn generate_document(
    config: &ModelConfig,
    strictness: Strictness,
) -> Result<SwaggerDocument, GenerateError> {
    let definition = config.typed_definition(strictness)?;
    Ok(assemble_document(config, derive_schemas(&definition)))
}

/// Assemble the document of a model from already derived schemas.
pub fn assemble_document(config: &ModelConfig, schemas: SchemaSet) -> SwaggerDocument {
    let names = DefinitionNames::new(&config.name);

    let paths = RouteTableBuilder::new(config, &names, schemas.math.is_some()).build();

    let mut definitions = IndexMap::new();
    definitions.insert(names.create.clone(), schemas.create);
    definitions.insert(names.update.clone(), schemas.update);
    if let Some(math) = schemas.math {
        definitions.insert(names.math.clone(), math);
    }
    definitions.extend(support_definitions());

    SwaggerDocument {
        swagger: SWAGGER_VERSION.to_string(),
        info: Info {
            version: DOCUMENT_VERSION.to_string(),
            title: format!("{} API", config.name),
        },
        host: format!("localhost:{}", config.port),
        base_path: format!("/{}", config.app),
        schemes: vec!["http".to_string()],
        consumes: vec![
            "application/json".to_string(),
            "multipart/form-data".to_string(),
        ],
        produces: vec!["application/json".to_string(), "text/plain".to_string()],
        paths,
        definitions,
    }
}

/// Definitions shared by every service, referenced by the file mapper routes.
fn support_definitions() -> Vec<(String, Schema)> {
    let string_list = || Schema::of_type(SchemaType::Union(vec!["string".to_string()]));

    let mut mapping = IndexMap::new();
    mapping.insert("headers".to_string(), string_list());
    mapping.insert("headerMapping".to_string(), string_list());

    let mut enrich = IndexMap::new();
    enrich.insert(
        "sheetData".to_string(),
        Schema {
            schema_type: Some(SchemaType::Union(vec!["array".to_string()])),
            items: Some(Box::new(Schema::of_type(SchemaType::single("object")))),
            ..Default::default()
        },
    );
    enrich.insert(
        "headerMapping".to_string(),
        Schema::of_type(SchemaType::Union(vec!["object".to_string()])),
    );

    let mut bulk_create = IndexMap::new();
    bulk_create.insert("fileId".to_string(), Schema::of_type(SchemaType::single("string")));

    vec![
        (MAPPING_DEFINITION.to_string(), Schema::object(mapping)),
        (ENRICH_DEFINITION.to_string(), Schema::object(enrich)),
        (BULK_CREATE_DEFINITION.to_string(), Schema::object(bulk_create)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(definition: &str) -> ModelConfig {
        ModelConfig::from_json_str(&format!(
            r#"{{
                "_id": "SRVC2006",
                "name": "Customer Orders",
                "api": "orders",
                "app": "Adam",
                "port": 20010,
                "definition": {}
            }}"#,
            definition
        ))
        .unwrap()
    }

    #[test]
    fn fills_document_metadata() {
        let doc = generate_document(&config("{}"), Strictness::Lenient).unwrap();

        assert_eq!(doc.swagger, "2.0");
        assert_eq!(doc.info.title, "Customer Orders API");
        assert_eq!(doc.info.version, "0.0.1");
        assert_eq!(doc.host, "localhost:20010");
        assert_eq!(doc.base_path, "/Adam");
        assert_eq!(doc.schemes, vec!["http"]);
        assert_eq!(doc.consumes, vec!["application/json", "multipart/form-data"]);
        assert_eq!(doc.produces, vec!["application/json", "text/plain"]);
    }

    #[test]
    fn registers_model_and_support_definitions() {
        let doc = generate_document(
            &config(r#"{"_id": {"type": "String"}, "qty": {"type": "Number"}}"#),
            Strictness::Lenient,
        )
        .unwrap();

        let names: Vec<_> = doc.definitions.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec![
                "customerOrders_create",
                "customerOrders_update",
                "customerOrders_math",
                "mapping",
                "enrichData",
                "bulkCreateData",
            ]
        );
        assert!(doc.paths.contains_key("/orders/{id}/math"));
    }

    #[test]
    fn omits_math_without_numeric_fields() {
        let doc = generate_document(
            &config(r#"{"_id": {"type": "String"}, "label": {"type": "String"}}"#),
            Strictness::Lenient,
        )
        .unwrap();

        assert!(!doc.definitions.contains_key("customerOrders_math"));
        assert!(!doc.paths.contains_key("/orders/{id}/math"));
    }

    #[test]
    fn strict_mode_surfaces_definition_errors() {
        let config = config(r#"{"geo": {"type": "Geojson"}}"#);

        assert!(generate_document(&config, Strictness::Lenient).is_ok());
        assert!(matches!(
            generate_document(&config, Strictness::Strict),
            Err(GenerateError::Definition(DefinitionError::UnrecognizedTag { .. }))
        ));
    }
}

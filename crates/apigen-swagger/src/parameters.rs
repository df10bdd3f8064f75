//! Shared parameter templates.
//!
//! Most routes share one of a handful of parameter lists; the route builder
//! starts from these and appends per-route parameters.

use indexmap::IndexMap;
use serde_json::json;

use apigen_schema::{Schema, SchemaType};

use crate::document::{Parameter, ParameterLocation};

impl Parameter {
    fn typed(
        name: &str,
        location: ParameterLocation,
        param_type: &str,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            location,
            param_type: Some(param_type.to_string()),
            required: false,
            description: description.into(),
            default: None,
            schema: None,
        }
    }

    /// Optional query parameter.
    pub fn query(name: &str, param_type: &str, description: impl Into<String>) -> Self {
        Self::typed(name, ParameterLocation::Query, param_type, description)
    }

    /// Optional string header.
    pub fn header(name: &str, description: impl Into<String>) -> Self {
        Self::typed(name, ParameterLocation::Header, "string", description)
    }

    /// Required string path segment.
    pub fn path(name: &str, description: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::typed(name, ParameterLocation::Path, "string", description)
        }
    }

    /// Request body with a schema.
    pub fn body(name: &str, description: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.to_string(),
            location: ParameterLocation::Body,
            param_type: None,
            required: false,
            description: description.into(),
            default: None,
            schema: Some(schema),
        }
    }

    /// Typed body field without a schema (used by the export route).
    pub fn body_field(name: &str, param_type: &str, description: impl Into<String>) -> Self {
        Self::typed(name, ParameterLocation::Body, param_type, description)
    }

    /// Set the default value.
    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self
    }
}

pub fn authorization() -> Parameter {
    Parameter::header("authorization", "The JWT token for req.validation")
}

pub fn expand() -> Parameter {
    Parameter::query("expand", "boolean", "expand document based on relations")
        .with_default(json!(false))
}

pub fn search() -> Parameter {
    Parameter::query("search", "string", "String to search across all field")
}

pub fn total_records() -> Parameter {
    Parameter::query("totalRecords", "integer", "total records")
}

pub fn timezone_offset() -> Parameter {
    Parameter::query("timezone", "integer", "timezone offset")
}

pub fn filter() -> Parameter {
    Parameter::query("filter", "string", "Filter records based on certain fields")
}

pub fn select() -> Parameter {
    Parameter::query("select", "string", "Comma seperated fields to be displayed")
}

pub fn sort() -> Parameter {
    Parameter::query("sort", "string", "sort parameter")
}

pub fn page() -> Parameter {
    Parameter::query("page", "integer", "Page number of the request")
}

pub fn page_size() -> Parameter {
    Parameter::query("count", "integer", "Number of records per page")
}

pub fn file_id() -> Parameter {
    Parameter::path("fileId", "fileId against which we db will be querried")
}

/// Comma separated id list in the query string.
pub fn id_list() -> Parameter {
    Parameter::query("id", "string", "comma separated ids")
}

/// Paging, filtering and projection for list endpoints.
pub fn list() -> Vec<Parameter> {
    vec![
        page(),
        page_size(),
        authorization(),
        filter(),
        select(),
        sort(),
        Parameter::query("forFile", "boolean", "Used in export for secure fields"),
    ]
}

pub fn bulk_show() -> Vec<Parameter> {
    vec![id_list(), select(), sort(), authorization()]
}

pub fn bulk_delete() -> Vec<Parameter> {
    let mut properties = IndexMap::new();
    properties.insert(
        "ids".to_string(),
        Schema {
            schema_type: Some(SchemaType::single("array")),
            items: Some(Box::new(Schema::of_type(SchemaType::single("string")))),
            ..Default::default()
        },
    );

    vec![
        authorization(),
        Parameter::body("ids", "Payload to reset a User", Schema::typed_object(properties)),
    ]
}

pub fn show() -> Vec<Parameter> {
    vec![
        select(),
        Parameter::path("id", "Id of the object to be updated"),
        authorization(),
    ]
}

pub fn hook() -> Vec<Parameter> {
    vec![
        Parameter::query("url", "string", "Url to hit"),
        Parameter::body("data", "data", Schema::of_type(SchemaType::single("object"))),
    ]
}

pub fn experience_hook() -> Vec<Parameter> {
    vec![
        Parameter::query("name", "string", "name of hook to hit"),
        Parameter::body("data", "data", Schema::of_type(SchemaType::single("object"))),
    ]
}

pub fn count() -> Vec<Parameter> {
    vec![filter(), authorization(), expand()]
}

/// Cursor options accepted in the export request body.
pub fn export() -> Vec<Parameter> {
    vec![
        Parameter::body_field("filter", "string", "Filter records based on certain fields"),
        Parameter::body_field("select", "string", "Comma seperated fields to be displayed"),
        Parameter::body_field("sort", "string", "sort parameter"),
        Parameter::body_field("skip", "integer", "Number of records to skip"),
        Parameter::body_field("batchSize", "integer", "Batch size for cursor"),
        authorization(),
    ]
}

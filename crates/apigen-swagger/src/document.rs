//! Swagger 2.0 document types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use apigen_schema::Schema;

/// Swagger version written to every document.
pub const SWAGGER_VERSION: &str = "2.0";

/// Controller every generated route is dispatched to.
pub const ROUTER_CONTROLLER: &str = "controller";

/// A complete Swagger document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerDocument {
    pub swagger: String,
    pub info: Info,
    pub host: String,
    #[serde(rename = "basePath")]
    pub base_path: String,
    pub schemes: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub paths: IndexMap<String, PathItem>,
    pub definitions: IndexMap<String, Schema>,
}

impl SwaggerDocument {
    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Parse a document from YAML.
    pub fn from_yaml_str(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    /// Number of operations across all paths.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.operations().count()).sum()
    }
}

/// Document info block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub version: String,
    pub title: String,
}

/// HTTP verbs a path item can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }
}

/// Operations bound to one route path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(rename = "x-swagger-router-controller")]
    pub controller: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
}

impl Default for PathItem {
    fn default() -> Self {
        Self {
            controller: ROUTER_CONTROLLER.to_string(),
            get: None,
            post: None,
            put: None,
            delete: None,
        }
    }
}

impl PathItem {
    /// Create a path item with no operations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an operation to a verb.
    pub fn with(mut self, method: HttpMethod, operation: Operation) -> Self {
        *self.slot(method) = Some(operation);
        self
    }

    /// Operation bound to a verb, if any.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
        }
    }

    /// Bound operations in verb order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
        ]
        .into_iter()
        .filter_map(|method| self.operation(method).map(|op| (method, op)))
    }

    /// Move the operations of `other` into this item.
    ///
    /// Returns the verbs whose existing operation was replaced.
    pub fn merge(&mut self, other: PathItem) -> Vec<HttpMethod> {
        let incoming = [
            (HttpMethod::Get, other.get),
            (HttpMethod::Post, other.post),
            (HttpMethod::Put, other.put),
            (HttpMethod::Delete, other.delete),
        ];

        let mut replaced = Vec::new();
        for (method, operation) in incoming {
            if let Some(operation) = operation {
                if self.slot(method).replace(operation).is_some() {
                    replaced.push(method);
                }
            }
        }
        replaced
    }

    fn slot(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Delete => &mut self.delete,
        }
    }
}

/// A single operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub description: String,

    #[serde(rename = "operationId")]
    pub operation_id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    pub responses: IndexMap<String, Response>,
}

impl Operation {
    pub fn new(
        description: impl Into<String>,
        operation_id: impl Into<String>,
        parameters: Vec<Parameter>,
        responses: IndexMap<String, Response>,
    ) -> Self {
        Self {
            description: description.into(),
            operation_id: operation_id.into(),
            parameters,
            responses,
        }
    }

    /// Parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// A response table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
}

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Body,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn operation(id: &str) -> Operation {
        Operation::new("op", id, Vec::new(), IndexMap::new())
    }

    #[test]
    fn merge_keeps_distinct_verbs_and_reports_replaced_ones() {
        let mut item = PathItem::new()
            .with(HttpMethod::Get, operation("list"))
            .with(HttpMethod::Post, operation("create"));

        let replaced = item.merge(PathItem::new().with(HttpMethod::Post, operation("bulk")));

        assert_eq!(replaced, vec![HttpMethod::Post]);
        assert_eq!(item.get.as_ref().unwrap().operation_id, "list");
        assert_eq!(item.post.as_ref().unwrap().operation_id, "bulk");
        assert_eq!(HttpMethod::Post.as_str(), "post");
    }
}

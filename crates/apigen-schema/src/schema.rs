//! Output schema tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Type keyword of a schema: a single type or a union such as `[string, null]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Union(Vec<String>),
}

impl SchemaType {
    pub fn single(name: impl Into<String>) -> Self {
        Self::Single(name.into())
    }

    /// `[name, null]`
    pub fn nullable(name: impl Into<String>) -> Self {
        Self::Union(vec![name.into(), "null".to_string()])
    }

    /// Whether `null` is an accepted value.
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Single(name) => name == "null",
            Self::Union(names) => names.iter().any(|n| n == "null"),
        }
    }

    /// Whether the given type name is part of this type.
    pub fn includes(&self, name: &str) -> bool {
        match self {
            Self::Single(single) => single == name,
            Self::Union(names) => names.iter().any(|n| n == name),
        }
    }

    /// The same type with `null` added.
    pub fn to_nullable(&self) -> Self {
        if self.is_nullable() {
            return self.clone();
        }
        match self {
            Self::Single(name) => Self::nullable(name.clone()),
            Self::Union(names) => {
                let mut names = names.clone();
                names.push("null".to_string());
                Self::Union(names)
            }
        }
    }
}

/// A validation schema node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
}

impl Schema {
    /// A schema of the given type.
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    /// A `$ref` to another definition.
    pub fn reference(target: impl Into<String>) -> Self {
        Self {
            reference: Some(target.into()),
            ..Default::default()
        }
    }

    /// A nullable array of `items`.
    pub fn nullable_array(items: Schema) -> Self {
        Self {
            schema_type: Some(SchemaType::nullable("array")),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    /// An object schema with the given properties and no `type` keyword.
    pub fn object(properties: IndexMap<String, Schema>) -> Self {
        Self {
            properties: Some(properties),
            ..Default::default()
        }
    }

    /// A schema with an explicit `type: object` and properties.
    pub fn typed_object(properties: IndexMap<String, Schema>) -> Self {
        Self {
            schema_type: Some(SchemaType::single("object")),
            properties: Some(properties),
            ..Default::default()
        }
    }

    /// Property by name.
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }

    /// Copy of this schema with no required constraints at any depth.
    ///
    /// `required` lists are dropped and every property accepts `null`, in its
    /// type and in its enumeration.
    pub fn relaxed(&self) -> Schema {
        Schema {
            reference: self.reference.clone(),
            schema_type: self.schema_type.clone(),
            items: self.items.as_ref().map(|items| Box::new(items.relaxed())),
            properties: self.properties.as_ref().map(|properties| {
                properties
                    .iter()
                    .map(|(name, property)| {
                        let mut relaxed = property.relaxed();
                        relaxed.allow_null();
                        (name.clone(), relaxed)
                    })
                    .collect()
            }),
            required: Vec::new(),
            enum_values: self.enum_values.clone(),
        }
    }

    /// Accept `null` in both the type and the enumeration, if any.
    fn allow_null(&mut self) {
        self.schema_type = self.schema_type.as_ref().map(SchemaType::to_nullable);
        if !self.enum_values.is_empty() && !self.enum_values.contains(&serde_json::Value::Null) {
            self.enum_values.push(serde_json::Value::Null);
        }
    }

    /// Whether any node in this tree carries a `required` list.
    pub fn has_required(&self) -> bool {
        !self.required.is_empty()
            || self.items.as_ref().is_some_and(|items| items.has_required())
            || self
                .properties
                .as_ref()
                .is_some_and(|p| p.values().any(Schema::has_required))
    }
}

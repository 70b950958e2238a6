//! Declarative flow schemas.
//!
//! A schema lists the fields an object must carry, each with a description
//! that doubles as a hint to the model. The same declaration drives request
//! validation, reply validation, and the JSON schema sent to the provider.

use serde_json::{json, Map, Value};

/// Primitive shape of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Number,
    /// A `data:image/*;base64,...` string.
    ImageDataUri,
    /// An ordered list of objects; `exact_len` pins the item count.
    Array {
        item: Box<ObjectSchema>,
        exact_len: Option<usize>,
    },
}

impl FieldKind {
    /// Human-readable type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String | FieldKind::ImageDataUri => "a string",
            FieldKind::Number => "a number",
            FieldKind::Array { .. } => "an array",
        }
    }
}

/// A single required field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    /// Minimum trimmed character count for request strings.
    pub min_len: usize,
    /// User-facing message shown when the field is missing or too short.
    pub message: Option<&'static str>,
}

impl FieldSpec {
    fn new(name: &'static str, description: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            description,
            kind,
            min_len: 0,
            message: None,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldKind::String)
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldKind::Number)
    }

    pub fn image_data_uri(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldKind::ImageDataUri)
    }

    pub fn array(name: &'static str, description: &'static str, item: ObjectSchema) -> Self {
        Self::new(
            name,
            description,
            FieldKind::Array {
                item: Box::new(item),
                exact_len: None,
            },
        )
    }

    /// Require at least `min_len` characters after trimming.
    pub fn min_len(mut self, min_len: usize, message: &'static str) -> Self {
        self.min_len = min_len;
        self.message = Some(message);
        self
    }

    /// Message used when the field is absent or empty.
    pub fn required_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    /// Pin the item count of an array field. No effect on other kinds.
    pub fn exact_len(mut self, len: usize) -> Self {
        if let FieldKind::Array { exact_len, .. } = &mut self.kind {
            *exact_len = Some(len);
        }
        self
    }

    pub(crate) fn missing_message(&self) -> String {
        self.message
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} is required.", self.name))
    }
}

/// JSON schema flavour expected by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaDialect {
    /// Standard JSON Schema, strict (`additionalProperties: false`).
    JsonSchema,
    /// The OpenAPI subset used by Gemini (`OBJECT`, `STRING`, ...).
    OpenApi,
}

/// An object with a fixed set of required fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl ObjectSchema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Render the schema as a JSON document for the given provider dialect.
    pub fn to_json_schema(&self, dialect: SchemaDialect) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(field.name.to_string(), field_schema(field, dialect));
        }
        let required: Vec<&str> = self.field_names();

        match dialect {
            SchemaDialect::JsonSchema => json!({
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": false,
            }),
            SchemaDialect::OpenApi => json!({
                "type": "OBJECT",
                "properties": properties,
                "required": required,
                "propertyOrdering": required,
            }),
        }
    }
}

fn field_schema(field: &FieldSpec, dialect: SchemaDialect) -> Value {
    let type_name = |json_schema: &'static str, open_api: &'static str| match dialect {
        SchemaDialect::JsonSchema => json_schema,
        SchemaDialect::OpenApi => open_api,
    };

    match &field.kind {
        FieldKind::String | FieldKind::ImageDataUri => json!({
            "type": type_name("string", "STRING"),
            "description": field.description,
        }),
        FieldKind::Number => json!({
            "type": type_name("number", "NUMBER"),
            "description": field.description,
        }),
        FieldKind::Array { item, exact_len } => {
            let mut schema = json!({
                "type": type_name("array", "ARRAY"),
                "description": field.description,
                "items": item.to_json_schema(dialect),
            });
            if let (Some(len), Some(obj)) = (exact_len, schema.as_object_mut()) {
                obj.insert("minItems".to_string(), json!(len));
                obj.insert("maxItems".to_string(), json!(len));
            }
            schema
        }
    }
}

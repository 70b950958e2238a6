//! Structural validation of flow requests and model replies.
//!
//! Both checks are pure functions over `serde_json::Value`. Extra fields are
//! ignored; missing fields and wrong primitive types are not.

use serde_json::Value;

use super::data_uri::{DataUri, DataUriError};
use super::schema_model::{FieldKind, FieldSpec, ObjectSchema};
use crate::errors::{SchemaViolation, ValidationError};

impl ObjectSchema {
    /// Validate a flow request. Fails on the first offending field.
    pub fn validate_input(&self, value: &Value) -> Result<(), ValidationError> {
        let object = value.as_object().ok_or_else(|| {
            ValidationError::InvalidInput(format!(
                "{} must be a JSON object, found {}",
                self.name,
                json_type_name(value)
            ))
        })?;

        for field in &self.fields {
            validate_input_field(field, field.name, object.get(field.name))?;
        }
        Ok(())
    }

    /// Validate a model reply against this schema.
    pub fn validate_output(&self, value: &Value) -> Result<(), SchemaViolation> {
        validate_output_object(self, self.name, "", value)
    }
}

fn validate_input_field(
    field: &FieldSpec,
    path: &str,
    value: Option<&Value>,
) -> Result<(), ValidationError> {
    let missing = || ValidationError::MissingField {
        field: path.to_string(),
        message: field.missing_message(),
    };
    let invalid = |message: String| ValidationError::InvalidField {
        field: path.to_string(),
        message,
    };

    let value = match value {
        None | Some(Value::Null) => return Err(missing()),
        Some(v) => v,
    };

    match &field.kind {
        FieldKind::String => {
            let text = value
                .as_str()
                .ok_or_else(|| invalid(format!("{} must be text.", field.name)))?;
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(missing());
            }
            if trimmed.chars().count() < field.min_len {
                return Err(invalid(field.missing_message()));
            }
        }
        FieldKind::Number => {
            if !value.is_number() {
                return Err(invalid(format!("{} must be a number.", field.name)));
            }
        }
        FieldKind::ImageDataUri => {
            let raw = value
                .as_str()
                .ok_or_else(|| invalid(format!("{} must be a data URI string.", field.name)))?;
            if raw.trim().is_empty() {
                return Err(missing());
            }
            match DataUri::parse_image(raw) {
                Ok(_) => {}
                Err(DataUriError::EmptyPayload) => return Err(invalid(field.missing_message())),
                Err(err) => return Err(invalid(err.to_string())),
            }
        }
        FieldKind::Array { item, exact_len } => {
            let items = value
                .as_array()
                .ok_or_else(|| invalid(format!("{} must be a list.", field.name)))?;
            if let Some(expected) = exact_len {
                if items.len() != *expected {
                    return Err(invalid(format!(
                        "{} must contain exactly {} items.",
                        field.name, expected
                    )));
                }
            }
            for (idx, entry) in items.iter().enumerate() {
                let entry_path = format!("{}[{}]", path, idx);
                let object = entry.as_object().ok_or_else(|| ValidationError::InvalidField {
                    field: entry_path.clone(),
                    message: format!("{} entries must be objects.", field.name),
                })?;
                for nested in &item.fields {
                    let nested_path = format!("{}.{}", entry_path, nested.name);
                    validate_input_field(nested, &nested_path, object.get(nested.name))?;
                }
            }
        }
    }
    Ok(())
}

fn validate_output_object(
    schema: &ObjectSchema,
    schema_name: &str,
    path: &str,
    value: &Value,
) -> Result<(), SchemaViolation> {
    let object = value.as_object().ok_or_else(|| SchemaViolation::NotAnObject {
        schema: schema_name.to_string(),
        path: if path.is_empty() { "$".to_string() } else { path.to_string() },
        found: json_type_name(value),
    })?;

    for field in &schema.fields {
        let field_path = if path.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", path, field.name)
        };

        let value = match object.get(field.name) {
            None | Some(Value::Null) => {
                return Err(SchemaViolation::MissingField {
                    schema: schema_name.to_string(),
                    path: field_path,
                })
            }
            Some(v) => v,
        };

        let type_ok = match &field.kind {
            FieldKind::String | FieldKind::ImageDataUri => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Array { .. } => value.is_array(),
        };
        if !type_ok {
            return Err(SchemaViolation::WrongType {
                schema: schema_name.to_string(),
                path: field_path,
                expected: field.kind.type_name(),
                found: json_type_name(value),
            });
        }

        if let (FieldKind::Array { item, exact_len }, Some(items)) = (&field.kind, value.as_array())
        {
            if let Some(expected) = exact_len {
                if items.len() != *expected {
                    return Err(SchemaViolation::WrongLength {
                        schema: schema_name.to_string(),
                        path: field_path,
                        expected: *expected,
                        found: items.len(),
                    });
                }
            }
            for (idx, entry) in items.iter().enumerate() {
                let entry_path = format!("{}[{}]", field_path, idx);
                validate_output_object(item, schema_name, &entry_path, entry)?;
            }
        }
    }
    Ok(())
}

/// JSON type name with article, for messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

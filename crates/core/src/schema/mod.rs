//! Flow schema declarations and their validation.

mod data_uri;
mod schema_model;
mod schema_validation;

pub use data_uri::{DataUri, DataUriError};
pub use schema_model::{FieldKind, FieldSpec, ObjectSchema, SchemaDialect};

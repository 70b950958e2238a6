//! Parsing for `data:<mime-type>;base64,<payload>` media strings.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// Why a string could not be accepted as an embedded media payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataUriError {
    #[error("Expected a data URI starting with 'data:'")]
    NotADataUri,

    #[error("Data URI is missing its MIME type")]
    MissingMimeType,

    #[error("Data URI must use base64 encoding")]
    NotBase64Encoded,

    #[error("Data URI payload is empty")]
    EmptyPayload,

    #[error("Data URI payload is not valid base64")]
    InvalidBase64,

    #[error("Unsupported media type '{0}'")]
    UnsupportedMediaType(String),
}

/// A decoded-on-demand media attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataUri {
    pub mime_type: String,
    /// Base64 payload exactly as supplied.
    pub data: String,
}

impl DataUri {
    /// Parse and check a data URI. The payload must decode to at least one byte.
    pub fn parse(raw: &str) -> Result<Self, DataUriError> {
        let rest = raw
            .trim()
            .strip_prefix(DATA_PREFIX)
            .ok_or(DataUriError::NotADataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUriError::NotBase64Encoded)?;

        let mime_type = header
            .strip_suffix(BASE64_MARKER)
            .ok_or(DataUriError::NotBase64Encoded)?;
        // Parameters such as `;name=leaf.png` may sit between the type and the marker.
        let mime_type = mime_type.split(';').next().unwrap_or_default().trim();
        if mime_type.is_empty() || !mime_type.contains('/') {
            return Err(DataUriError::MissingMimeType);
        }

        if payload.is_empty() {
            return Err(DataUriError::EmptyPayload);
        }
        let bytes = BASE64
            .decode(payload.as_bytes())
            .map_err(|_| DataUriError::InvalidBase64)?;
        if bytes.is_empty() {
            return Err(DataUriError::EmptyPayload);
        }

        Ok(Self {
            mime_type: mime_type.to_ascii_lowercase(),
            data: payload.to_string(),
        })
    }

    /// Parse a data URI and require an `image/*` MIME type.
    pub fn parse_image(raw: &str) -> Result<Self, DataUriError> {
        let uri = Self::parse(raw)?;
        if !uri.is_image() {
            return Err(DataUriError::UnsupportedMediaType(uri.mime_type));
        }
        Ok(uri)
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Decoded payload bytes.
    pub fn bytes(&self) -> Result<Vec<u8>, DataUriError> {
        BASE64
            .decode(self.data.as_bytes())
            .map_err(|_| DataUriError::InvalidBase64)
    }

    /// Re-assemble the `data:` form, e.g. for providers that take the URI whole.
    pub fn to_uri_string(&self) -> String {
        format!("{}{}{},{}", DATA_PREFIX, self.mime_type, BASE64_MARKER, self.data)
    }
}

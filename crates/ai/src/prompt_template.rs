//! Prompt templates for flows.
//!
//! A template is plain text with two kinds of placeholder:
//!
//! - `{{{field}}}` is replaced by the request field's text, verbatim.
//! - `{{media url=field}}` marks the media attachment taken from a data-URI
//!   field. The placeholder is dropped from the text and the decoded URI is
//!   carried next to it, so providers can send it as a separate part.
//!
//! There is no conditional or looping syntax.

use kisan_core::schema::DataUri;
use serde_json::Value;

use crate::error::AiError;

const FIELD_OPEN: &str = "{{{";
const FIELD_CLOSE: &str = "}}}";
const MEDIA_OPEN: &str = "{{media url=";
const MEDIA_CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(String),
    Media(String),
}

/// A parsed prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

/// Output of [`PromptTemplate::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub text: String,
    pub media: Option<DataUri>,
}

impl RenderedPrompt {
    /// Text-only prompt, mostly useful in tests.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            media: None,
        }
    }
}

impl PromptTemplate {
    /// Parse a template. At most one media placeholder is allowed.
    pub fn parse(source: &str) -> Result<Self, AiError> {
        let mut segments = Vec::new();
        let mut has_media = false;
        let mut rest = source;

        loop {
            let next = match (rest.find(FIELD_OPEN), rest.find(MEDIA_OPEN)) {
                (None, None) => None,
                (Some(f), Some(m)) if m < f => Some((m, true)),
                (Some(f), _) => Some((f, false)),
                (None, Some(m)) => Some((m, true)),
            };
            let Some((start, is_media)) = next else {
                if !rest.is_empty() {
                    segments.push(Segment::Text(rest.to_string()));
                }
                break;
            };

            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let (open, close) = if is_media {
                (MEDIA_OPEN, MEDIA_CLOSE)
            } else {
                (FIELD_OPEN, FIELD_CLOSE)
            };
            let after = &rest[start + open.len()..];
            let end = after
                .find(close)
                .ok_or_else(|| AiError::internal(format!("Unclosed placeholder '{}'", open)))?;
            let name = after[..end].trim();
            if !is_field_name(name) {
                return Err(AiError::internal(format!(
                    "Invalid placeholder name '{}'",
                    name
                )));
            }

            if is_media {
                if has_media {
                    return Err(AiError::internal(
                        "A template may embed at most one media attachment",
                    ));
                }
                has_media = true;
                segments.push(Segment::Media(name.to_string()));
            } else {
                segments.push(Segment::Field(name.to_string()));
            }
            rest = &after[end + close.len()..];
        }

        Ok(Self { segments })
    }

    /// Names of the text fields substituted by this template, in order.
    pub fn text_fields(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Field(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Name of the field carrying the media attachment, if any.
    pub fn media_field(&self) -> Option<&str> {
        self.segments.iter().find_map(|s| match s {
            Segment::Media(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Substitute `input` fields into the template.
    ///
    /// `input` must already have passed schema validation; a placeholder
    /// naming an absent field is reported as an internal error.
    pub fn render(&self, input: &Value) -> Result<RenderedPrompt, AiError> {
        let mut text = String::new();
        let mut media = None;

        for segment in &self.segments {
            match segment {
                Segment::Text(literal) => text.push_str(literal),
                Segment::Field(name) => match lookup(input, name)? {
                    Value::String(s) => text.push_str(s),
                    other => text.push_str(&other.to_string()),
                },
                Segment::Media(name) => {
                    let raw = lookup(input, name)?.as_str().ok_or_else(|| {
                        AiError::internal(format!("Media field '{}' is not a string", name))
                    })?;
                    let uri = DataUri::parse(raw).map_err(|e| {
                        AiError::internal(format!("Media field '{}': {}", name, e))
                    })?;
                    media = Some(uri);
                }
            }
        }

        let trimmed_len = text.trim_end().len();
        text.truncate(trimmed_len);
        Ok(RenderedPrompt { text, media })
    }
}

fn lookup<'a>(input: &'a Value, name: &str) -> Result<&'a Value, AiError> {
    match input.get(name) {
        Some(Value::Null) | None => Err(AiError::internal(format!(
            "Template field '{}' missing from input",
            name
        ))),
        Some(value) => Ok(value),
    }
}

fn is_field_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ExtractionError;

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

pub type ExtractFn = dyn Fn(&[u8]) -> Result<String, ExtractionError> + Send + Sync;

/// Turns a successful response body into a short snippet for the report
#[derive(Clone, Default)]
pub enum Extractor {
    /// Body is ignored; the snippet is the status line
    #[default]
    None,
    /// Whole body as compact JSON, keys in the order the service sent them
    JsonVerbatim,
    /// A string field of a JSON object, optionally truncated to `limit` chars
    JsonField { field: String, limit: Option<usize> },
    /// Number of items in a JSON array, either bare or under `data`
    Count { noun: String },
    Custom(Arc<ExtractFn>),
}

impl Extractor {
    pub fn field(field: impl Into<String>) -> Self {
        Extractor::JsonField {
            field: field.into(),
            limit: None,
        }
    }

    pub fn field_truncated(field: impl Into<String>, limit: usize) -> Self {
        Extractor::JsonField {
            field: field.into(),
            limit: Some(limit),
        }
    }

    pub fn count(noun: impl Into<String>) -> Self {
        Extractor::Count { noun: noun.into() }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[u8]) -> Result<String, ExtractionError> + Send + Sync + 'static,
    {
        Extractor::Custom(Arc::new(f))
    }

    pub fn extract(&self, status: u16, body: &[u8]) -> Result<String, ExtractionError> {
        match self {
            Extractor::None => Ok(format!("status {}", status)),
            Extractor::JsonVerbatim => {
                let value: Value = serde_json::from_slice(body)?;
                Ok(serde_json::to_string(&value)?)
            }
            Extractor::JsonField { field, limit } => {
                let value: Value = serde_json::from_slice(body)?;
                let text = value
                    .get(field)
                    .ok_or_else(|| ExtractionError::MissingField(field.clone()))?
                    .as_str()
                    .ok_or_else(|| ExtractionError::NotAString(field.clone()))?;
                Ok(match limit {
                    Some(limit) => truncate(text, *limit),
                    None => text.to_string(),
                })
            }
            Extractor::Count { noun } => {
                let value: Value = serde_json::from_slice(body)?;
                let items = match &value {
                    Value::Array(items) => items,
                    Value::Object(map) => match map.get("data") {
                        Some(Value::Array(items)) => items,
                        _ => return Err(ExtractionError::NotAnArray),
                    },
                    _ => return Err(ExtractionError::NotAnArray),
                };
                Ok(format!("Found {} {}", items.len(), noun))
            }
            Extractor::Custom(f) => f(body),
        }
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extractor::None => write!(f, "None"),
            Extractor::JsonVerbatim => write!(f, "JsonVerbatim"),
            Extractor::JsonField { field, limit } => f
                .debug_struct("JsonField")
                .field("field", field)
                .field("limit", limit)
                .finish(),
            Extractor::Count { noun } => f.debug_struct("Count").field("noun", noun).finish(),
            Extractor::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Cut `text` to at most `limit` chars. Truncated output ends with
/// [`ELLIPSIS`], which counts towards the limit.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let marker = ELLIPSIS.chars().count();
    if limit <= marker {
        return text.chars().take(limit).collect();
    }
    let mut out: String = text.chars().take(limit - marker).collect();
    out.push_str(ELLIPSIS);
    out
}

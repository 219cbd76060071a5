//! Catalog document model.
//!
//! A message catalog is a JSON object whose values are nested objects,
//! strings, or other scalars. `Document` keeps that shape as a tagged tree so
//! the walker can match on it exhaustively instead of probing JSON types.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One node of a message catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Ordered key/value entries (key order is preserved verbatim)
    Mapping(Vec<(String, Document)>),
    /// A translatable leaf
    String(String),
    /// Numbers, booleans, null and arrays; carried through untouched
    Scalar(Value),
}

/// Errors raised while reading or writing catalog files.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to load {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("failed to write {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },

    #[error("{} has no top-level key '{key}'", .path.display())]
    MissingSubtree { path: PathBuf, key: String },

    #[error("{}: top level is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf },
}

impl Document {
    /// Create an empty mapping.
    pub fn empty() -> Self {
        Document::Mapping(Vec::new())
    }

    /// Parse a JSON string into a document.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(input)?;
        Ok(Document::from(value))
    }

    /// Serialize as 2-space indented JSON with a trailing newline.
    ///
    /// Non-ASCII text is written as-is, never `\u` escaped.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut output = serde_json::to_string_pretty(&Value::from(self.clone()))?;
        output.push('\n');
        Ok(output)
    }

    /// Load a catalog file. The top level must be a JSON object.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let load_error = |reason: String| DocumentError::Load {
            path: path.to_path_buf(),
            reason,
        };

        let contents = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let document =
            Document::from_json_str(&contents).map_err(|e| load_error(format!("invalid JSON: {}", e)))?;

        if !document.is_mapping() {
            return Err(DocumentError::NotAnObject {
                path: path.to_path_buf(),
            });
        }

        Ok(document)
    }

    /// Look up a direct child of a mapping.
    pub fn get(&self, key: &str) -> Option<&Document> {
        match self {
            Document::Mapping(entries) => entries
                .iter()
                .find(|(entry_key, _)| entry_key == key)
                .map(|(_, value)| value),
            Document::String(_) | Document::Scalar(_) => None,
        }
    }

    /// Top-level keys in document order (empty for leaves).
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Document::Mapping(entries) => entries.iter().map(|(key, _)| key.as_str()).collect(),
            Document::String(_) | Document::Scalar(_) => Vec::new(),
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Document::Mapping(_))
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Document::Mapping(
                map.into_iter()
                    .map(|(key, child)| (key, Document::from(child)))
                    .collect(),
            ),
            Value::String(text) => Document::String(text),
            other => Document::Scalar(other),
        }
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        match document {
            Document::Mapping(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, child)| (key, Value::from(child)))
                    .collect::<Map<String, Value>>(),
            ),
            Document::String(text) => Value::String(text),
            Document::Scalar(value) => value,
        }
    }
}

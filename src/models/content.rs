//! Content document types
//!
//! A content document is a generic YAML mapping discriminated by its `type`
//! field. Only `challenge` and `quiz` are recognised.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Kinds of content the pipeline knows how to validate and store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Challenge,
    Quiz,
}

impl ContentType {
    /// Parse the exact value of a document's `type` field
    pub fn from_type_field(type_field: &str) -> Option<Self> {
        match type_field {
            "challenge" => Some(ContentType::Challenge),
            "quiz" => Some(ContentType::Quiz),
            _ => None,
        }
    }

    /// Schema file describing this content type
    pub fn schema_filename(&self) -> &'static str {
        match self {
            ContentType::Challenge => "challenge_schema.json",
            ContentType::Quiz => "quiz_schema.json",
        }
    }

    /// Database collection documents of this type are stored in
    pub fn collection(&self) -> &'static str {
        match self {
            ContentType::Challenge => "challenges",
            ContentType::Quiz => "quizzes",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ContentType::Challenge => "Challenge",
            ContentType::Quiz => "Quiz",
        }
    }

    pub fn all() -> [ContentType; 2] {
        [ContentType::Challenge, ContentType::Quiz]
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Challenge => write!(f, "challenge"),
            ContentType::Quiz => write!(f, "quiz"),
        }
    }
}

/// Outcome of reading the `type` discriminator of a parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeField {
    /// The document is not a mapping at all
    NotAMapping,
    /// No `type` key, or a null/empty value
    Missing,
    /// A `type` value that is not a recognised content type
    Unknown(String),
    Known(ContentType),
}

/// Read the `type` discriminator from a parsed document
pub fn type_field(document: &JsonValue) -> TypeField {
    let Some(map) = document.as_object() else {
        return TypeField::NotAMapping;
    };

    match map.get("type") {
        None | Some(JsonValue::Null) => TypeField::Missing,
        Some(JsonValue::String(s)) if s.is_empty() => TypeField::Missing,
        Some(JsonValue::String(s)) => match ContentType::from_type_field(s) {
            Some(content_type) => TypeField::Known(content_type),
            None => TypeField::Unknown(s.clone()),
        },
        Some(JsonValue::Bool(false)) => TypeField::Missing,
        Some(other) => TypeField::Unknown(other.to_string()),
    }
}

/// Human-facing title of a document, `Unknown` when absent
pub fn document_title(document: &JsonValue) -> String {
    document
        .get("title")
        .and_then(|t| t.as_str())
        .unwrap_or("Unknown")
        .to_string()
}

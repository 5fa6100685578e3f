//! JSON Schema Validation for Content Documents
//!
//! Validates parsed YAML content against the schema for its `type`.

use crate::models::{ContentType, IssueCategory, ValidationIssue};
use anyhow::{Context, Result};
use jsonschema::Validator;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Path shown when the offending value is the document itself
pub const ROOT_PATH: &str = "[root]";

/// Name of the directory holding the JSON Schemas
pub const SCHEMAS_DIR_NAME: &str = "schemas";

/// First schema violation found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Dotted path to the offending field, e.g. `nodes.0.id`
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn to_issue(&self) -> ValidationIssue {
        ValidationIssue::new(IssueCategory::Schema, "schema", self.message.clone())
            .with_path(self.path.clone())
    }
}

/// Schema validator for content documents
pub struct SchemaValidator {
    schemas_dir: PathBuf,
    /// Cached compiled validators
    validators: HashMap<ContentType, Validator>,
}

impl SchemaValidator {
    /// Create a new schema validator
    ///
    /// # Arguments
    /// * `schemas_dir` - Directory containing `challenge_schema.json` and `quiz_schema.json`
    pub fn new(schemas_dir: impl Into<PathBuf>) -> Self {
        Self {
            schemas_dir: schemas_dir.into(),
            validators: HashMap::new(),
        }
    }

    /// Schemas used when no directory is given
    ///
    /// Looks for `schemas/` next to the executable, then in the current
    /// directory, and falls back to the copy in the source tree.
    pub fn default_schemas_dir() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let cwd = std::env::current_dir().ok();

        let roots: Vec<PathBuf> = exe_dir.into_iter().chain(cwd).collect();
        resolve_schemas_dir(&roots)
    }

    /// Path of the schema file for a content type
    pub fn schema_path(&self, content_type: ContentType) -> PathBuf {
        self.schemas_dir.join(content_type.schema_filename())
    }

    /// Load and compile a schema for a content type
    fn get_validator(&mut self, content_type: ContentType) -> Result<&Validator> {
        if !self.validators.contains_key(&content_type) {
            let schema_path = self.schema_path(content_type);
            let schema_content = std::fs::read_to_string(&schema_path)
                .with_context(|| format!("Schema not found: {}", schema_path.display()))?;

            let schema: JsonValue = serde_json::from_str(&schema_content)
                .with_context(|| format!("Failed to parse schema: {}", schema_path.display()))?;

            let validator = Validator::new(&schema).map_err(|e| {
                anyhow::anyhow!("Failed to compile schema {}: {}", schema_path.display(), e)
            })?;

            tracing::debug!(schema = %schema_path.display(), "compiled schema");
            self.validators.insert(content_type, validator);
        }

        self.validators
            .get(&content_type)
            .context("compiled schema missing from cache")
    }

    /// Load every schema up front, failing on the first unusable one
    pub fn preload(&mut self) -> Result<()> {
        for content_type in ContentType::all() {
            self.get_validator(content_type)?;
        }
        Ok(())
    }

    /// Check a document against the schema for its type
    ///
    /// Returns the first violation, or `None` when the document conforms.
    /// Errors only when the schema itself cannot be loaded.
    pub fn check(
        &mut self,
        content_type: ContentType,
        document: &JsonValue,
    ) -> Result<Option<SchemaViolation>> {
        let validator = self.get_validator(content_type)?;

        let violation = validator.iter_errors(document).next().map(|error| SchemaViolation {
            path: dotted_path(&error.instance_path.to_string()),
            message: error.to_string(),
        });

        Ok(violation)
    }
}

/// First `<root>/schemas` directory that exists, else the source tree copy
pub fn resolve_schemas_dir(roots: &[PathBuf]) -> PathBuf {
    roots
        .iter()
        .map(|root| root.join(SCHEMAS_DIR_NAME))
        .find(|dir| dir.is_dir())
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join(SCHEMAS_DIR_NAME))
}

/// Convert a JSON pointer (`/nodes/0/id`) into a dotted path (`nodes.0.id`)
pub fn dotted_path(pointer: &str) -> String {
    let segments: Vec<String> = pointer
        .split('/')
        .skip(1)
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect();

    if segments.is_empty() {
        ROOT_PATH.to_string()
    } else {
        segments.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_dotted_path() {
        assert_eq!(dotted_path(""), "[root]");
        assert_eq!(dotted_path("/nodes/0/id"), "nodes.0.id");
        assert_eq!(dotted_path("/a~1b/c~0d"), "a/b.c~d");
    }

    #[test]
    fn test_missing_schema_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut validator = SchemaValidator::new(temp.path());
        let err = validator
            .check(ContentType::Quiz, &json!({"type": "quiz"}))
            .unwrap_err();
        assert!(err.to_string().contains("quiz_schema.json"));
    }

    #[test]
    fn test_invalid_schema_json_is_an_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("quiz_schema.json"), "{ not json").unwrap();
        let mut validator = SchemaValidator::new(temp.path());
        assert!(validator.check(ContentType::Quiz, &json!({})).is_err());
    }

    #[test]
    fn test_first_violation_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("quiz_schema.json"),
            r#"{
                "type": "object",
                "required": ["title"],
                "properties": {
                    "questions": {"type": "array", "items": {"type": "object", "required": ["question"]}}
                }
            }"#,
        )
        .unwrap();
        let mut validator = SchemaValidator::new(temp.path());

        let violation = validator
            .check(ContentType::Quiz, &json!({"type": "quiz"}))
            .unwrap()
            .unwrap();
        assert_eq!(violation.path, "[root]");
        assert!(violation.message.contains("title"));

        let violation = validator
            .check(ContentType::Quiz, &json!({"title": "t", "questions": [{}]}))
            .unwrap()
            .unwrap();
        assert_eq!(violation.path, "questions.0");

        assert!(validator
            .check(ContentType::Quiz, &json!({"title": "t"}))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_resolve_schemas_dir_order() {
        let exe_dir = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let roots = vec![exe_dir.path().to_path_buf(), cwd.path().to_path_buf()];
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas");

        assert_eq!(resolve_schemas_dir(&roots), bundled);

        std::fs::create_dir(cwd.path().join("schemas")).unwrap();
        assert_eq!(resolve_schemas_dir(&roots), cwd.path().join("schemas"));

        std::fs::create_dir(exe_dir.path().join("schemas")).unwrap();
        assert_eq!(resolve_schemas_dir(&roots), exe_dir.path().join("schemas"));
    }

    #[test]
    fn test_bundled_schemas_compile() {
        let mut validator = SchemaValidator::new(SchemaValidator::default_schemas_dir());
        validator.preload().unwrap();
    }
}

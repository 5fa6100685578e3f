//! Content File Validation
//!
//! Runs the full check for one content file: parse, type detection, JSON
//! Schema, then (for challenges) the node graph rules. Schema violations stop
//! the run before graph checks since the graph rules assume a conforming
//! document.

use super::graph::GraphValidator;
use super::schema::SchemaValidator;
use crate::models::{
    type_field, ContentType, IssueCategory, TypeField, ValidationIssue, ValidationReport,
};
use crate::parser::{load_document, LoadError};
use anyhow::Result;
use serde_json::Value as JsonValue;
use std::path::Path;

/// Options for content validation
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOptions {
    /// Enable strict graph checks (duplicate ids, end reachability)
    pub strict: bool,
}

impl ValidateOptions {
    fn graph_validator(&self) -> GraphValidator {
        if self.strict {
            GraphValidator::strict()
        } else {
            GraphValidator::new()
        }
    }
}

/// Validate a content file on disk
///
/// A missing or unreadable file is an error. Parse failures and every
/// content problem are reported as issues on the returned report.
pub fn validate_file(
    file_path: &Path,
    schemas: &mut SchemaValidator,
    options: &ValidateOptions,
) -> Result<ValidationReport> {
    let document = match load_document(file_path) {
        Ok(doc) => doc,
        Err(e @ (LoadError::NotFound(_) | LoadError::Read { .. })) => return Err(e.into()),
        Err(e) => {
            let mut report = ValidationReport::new(file_path);
            report.push(ValidationIssue::new(
                IssueCategory::Structure,
                "parse_error",
                format!("Failed to parse YAML file '{}': {}", report.file_name(), e),
            ));
            return Ok(report);
        }
    };

    validate_document(&document, file_path, schemas, options)
}

/// Validate an already parsed content document
pub fn validate_document(
    document: &JsonValue,
    file_path: &Path,
    schemas: &mut SchemaValidator,
    options: &ValidateOptions,
) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(file_path);

    let content_type = match type_field(document) {
        TypeField::Known(content_type) => content_type,
        TypeField::NotAMapping => {
            report.push(ValidationIssue::new(
                IssueCategory::Structure,
                "not_a_mapping",
                format!("File '{}' does not contain a YAML mapping", report.file_name()),
            ));
            return Ok(report);
        }
        TypeField::Missing | TypeField::Unknown(_) => {
            report.push(
                ValidationIssue::new(
                    IssueCategory::Structure,
                    "invalid_type",
                    format!(
                        "File '{}' has no 'type' field or its value is not 'challenge' or 'quiz'",
                        report.file_name()
                    ),
                )
                .with_path("type"),
            );
            return Ok(report);
        }
    };
    report.content_type = Some(content_type);

    if let Some(violation) = schemas.check(content_type, document)? {
        report.push(violation.to_issue());
        return Ok(report);
    }

    if content_type == ContentType::Challenge {
        if let Err(violations) = options.graph_validator().validate(document) {
            report.issues.extend(violations.iter().map(|v| v.to_issue()));
        }
    }

    tracing::debug!(
        file = %file_path.display(),
        issues = report.issues.len(),
        "validated content file"
    );

    Ok(report)
}

use super::content::ContentType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Stage of validation an issue was raised by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// Unparseable YAML, missing or unknown `type`
    Structure,
    /// JSON Schema violation
    Schema,
    /// Challenge node graph inconsistency
    Graph,
}

impl IssueCategory {
    /// Get display symbol for category
    pub fn symbol(&self) -> &'static str {
        match self {
            IssueCategory::Structure => "🧱",
            IssueCategory::Schema => "📐",
            IssueCategory::Graph => "🔗",
        }
    }

    /// Get display name for category
    pub fn name(&self) -> &'static str {
        match self {
            IssueCategory::Structure => "STRUCTURE",
            IssueCategory::Schema => "SCHEMA",
            IssueCategory::Graph => "GRAPH",
        }
    }
}

/// A single problem found in a content file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub category: IssueCategory,
    /// Stable machine-readable kind, e.g. `dangling_reference`
    pub kind: String,
    /// Dotted path of the offending field, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        category: IssueCategory,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            kind: kind.into(),
            path: None,
            message: message.into(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Format issue for display
    pub fn format(&self) -> String {
        match &self.path {
            Some(path) => format!(
                "{} [{}] {} - {}",
                self.category.symbol(),
                self.category.name(),
                path,
                self.message
            ),
            None => format!(
                "{} [{}] {}",
                self.category.symbol(),
                self.category.name(),
                self.message
            ),
        }
    }
}

/// Result of validating one content file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub file: PathBuf,
    /// Detected content type, if the `type` field was readable
    pub content_type: Option<ContentType>,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            content_type: None,
            issues: Vec::new(),
        }
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count_by_category(&self, category: IssueCategory) -> usize {
        self.issues.iter().filter(|i| i.category == category).count()
    }

    /// File name for messages, falling back to the full path
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.display().to_string())
    }

    /// Format all issues for display
    pub fn format_issues(&self) -> String {
        self.issues
            .iter()
            .map(|i| i.format())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json_output(&self) -> ValidationJsonOutput {
        ValidationJsonOutput {
            valid: self.is_valid(),
            file: self.file.display().to_string(),
            content_type: self.content_type,
            issues: self.issues.clone(),
        }
    }
}

/// JSON output format for `validate --json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationJsonOutput {
    pub valid: bool,
    pub file: String,
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub issues: Vec<ValidationIssue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_format() {
        let issue = ValidationIssue::new(
            IssueCategory::Schema,
            "schema",
            "'title' is a required property",
        )
        .with_path("[root]");
        assert_eq!(
            issue.format(),
            "📐 [SCHEMA] [root] - 'title' is a required property"
        );

        let issue = ValidationIssue::new(IssueCategory::Graph, "missing_end", "no end node");
        assert_eq!(issue.format(), "🔗 [GRAPH] no end node");
    }

    #[test]
    fn test_report_validity_and_counts() {
        let mut report = ValidationReport::new("content/intro.yaml");
        assert!(report.is_valid());
        assert_eq!(report.file_name(), "intro.yaml");

        report.push(ValidationIssue::new(IssueCategory::Graph, "missing_start", "a"));
        report.push(ValidationIssue::new(IssueCategory::Graph, "missing_end", "b"));
        assert!(!report.is_valid());
        assert_eq!(report.count_by_category(IssueCategory::Graph), 2);
        assert_eq!(report.count_by_category(IssueCategory::Schema), 0);
        assert_eq!(report.format_issues().lines().count(), 2);
    }

    #[test]
    fn test_json_output() {
        let mut report = ValidationReport::new("a.yaml");
        report.content_type = Some(ContentType::Challenge);
        let json = serde_json::to_value(report.to_json_output()).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["type"], "challenge");
        assert!(json.get("issues").is_none());
    }
}

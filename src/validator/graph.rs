//! Challenge Graph Validator
//!
//! Cross-field checks over a challenge's `nodes`, run after the document has
//! passed its JSON Schema:
//! - every `next` (on a node, or on an option of a question node) names an
//!   existing node id
//! - a node with id `start` exists
//! - at least one node of type `end` exists
//!
//! Every violation is collected; nothing stops at the first one. These are
//! shallow checks only. Reachability and duplicate ids are checked in strict
//! mode, which is opt-in.

use crate::models::{ChallengeGraph, IssueCategory, ValidationIssue, START_NODE_ID};
use serde_json::Value as JsonValue;
use std::fmt;

/// A graph consistency problem in a challenge document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphViolation {
    /// A `next` reference names no existing node
    DanglingReference { target: String, source: String },
    /// No node has id `start`
    MissingStart,
    /// No node has type `end`
    MissingEnd,
    /// Strict mode: an id is declared by more than one node
    DuplicateNodeId { id: String },
    /// Strict mode: no `end` node can be reached from `start`
    EndUnreachable,
    /// `nodes` could not be read as a list of node mappings
    MalformedGraph { detail: String },
}

impl GraphViolation {
    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            GraphViolation::DanglingReference { .. } => "dangling_reference",
            GraphViolation::MissingStart => "missing_start",
            GraphViolation::MissingEnd => "missing_end",
            GraphViolation::DuplicateNodeId { .. } => "duplicate_node_id",
            GraphViolation::EndUnreachable => "end_unreachable",
            GraphViolation::MalformedGraph { .. } => "malformed_graph",
        }
    }

    /// Dotted path locating the problem, where one applies
    pub fn path(&self) -> Option<String> {
        match self {
            GraphViolation::MalformedGraph { .. } => Some("nodes".to_string()),
            _ => None,
        }
    }

    pub fn to_issue(&self) -> ValidationIssue {
        let issue = ValidationIssue::new(IssueCategory::Graph, self.kind(), self.to_string());
        match self.path() {
            Some(path) => issue.with_path(path),
            None => issue,
        }
    }
}

impl fmt::Display for GraphViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphViolation::DanglingReference { target, source } => write!(
                f,
                "Invalid node reference: 'next' on node '{}' points to '{}', which is not a node id",
                source, target
            ),
            GraphViolation::MissingStart => write!(
                f,
                "A node with id '{}' is required as the entry point",
                START_NODE_ID
            ),
            GraphViolation::MissingEnd => write!(f, "At least one node of type 'end' is required"),
            GraphViolation::DuplicateNodeId { id } => {
                write!(f, "Node id '{}' is declared more than once", id)
            }
            GraphViolation::EndUnreachable => write!(
                f,
                "No 'end' node can be reached from '{}'",
                START_NODE_ID
            ),
            GraphViolation::MalformedGraph { detail } => {
                write!(f, "Cannot read challenge nodes: {}", detail)
            }
        }
    }
}

/// Graph validator for challenge documents
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphValidator {
    strict: bool,
}

impl GraphValidator {
    /// Referential integrity plus start/end presence
    pub fn new() -> Self {
        Self::default()
    }

    /// Also flag duplicate ids and graphs with no `end` reachable from `start`
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Validate a parsed challenge document
    pub fn validate(&self, document: &JsonValue) -> Result<(), Vec<GraphViolation>> {
        let graph = ChallengeGraph::from_document(document).map_err(|e| {
            vec![GraphViolation::MalformedGraph {
                detail: e.to_string(),
            }]
        })?;

        let violations = self.check(&graph);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Run every check over an already built graph
    pub fn check(&self, graph: &ChallengeGraph) -> Vec<GraphViolation> {
        let mut violations = Vec::new();
        let node_ids = graph.node_ids();

        for (target, source) in graph.references() {
            if !node_ids.contains(target) {
                violations.push(GraphViolation::DanglingReference {
                    target: target.to_string(),
                    source: source.to_string(),
                });
            }
        }

        let has_start = graph.has_start();
        if !has_start {
            violations.push(GraphViolation::MissingStart);
        }

        let has_end = graph.has_end();
        if !has_end {
            violations.push(GraphViolation::MissingEnd);
        }

        if self.strict {
            for id in graph.duplicate_ids() {
                violations.push(GraphViolation::DuplicateNodeId { id: id.to_string() });
            }

            if has_start && has_end && !graph.end_reachable_from_start() {
                violations.push(GraphViolation::EndUnreachable);
            }
        }

        violations
    }
}

/// Validate a challenge document with the default (non-strict) rules
pub fn validate_graph(document: &JsonValue) -> Result<(), Vec<GraphViolation>> {
    GraphValidator::new().validate(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario_a() -> JsonValue {
        json!({
            "type": "challenge",
            "nodes": [
                {"id": "start", "type": "message", "next": "q1"},
                {"id": "q1", "type": "question", "options": [{"text": "a", "next": "end1"}]},
                {"id": "end1", "type": "end"}
            ]
        })
    }

    #[test]
    fn test_valid_graph() {
        assert_eq!(validate_graph(&scenario_a()), Ok(()));
    }

    #[test]
    fn test_dangling_option_reference() {
        let mut doc = scenario_a();
        doc["nodes"][1]["options"][0]["next"] = json!("missing");

        let violations = validate_graph(&doc).unwrap_err();
        // end1 still exists, so only the dangling reference is reported
        assert_eq!(
            violations,
            vec![GraphViolation::DanglingReference {
                target: "missing".to_string(),
                source: "q1".to_string(),
            }]
        );
        assert!(violations[0].to_string().contains("'missing'"));
    }

    #[test]
    fn test_dangling_node_reference() {
        let mut doc = scenario_a();
        doc["nodes"][0]["next"] = json!("q2");

        let violations = validate_graph(&doc).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind(), "dangling_reference");
    }

    #[test]
    fn test_missing_start() {
        let mut doc = scenario_a();
        doc["nodes"][0]["id"] = json!("begin");
        assert_eq!(validate_graph(&doc), Err(vec![GraphViolation::MissingStart]));
    }

    #[test]
    fn test_missing_end() {
        let doc = json!({
            "type": "challenge",
            "nodes": [
                {"id": "start", "type": "message", "next": "q1"},
                {"id": "q1", "type": "question", "options": [{"text": "a"}]}
            ]
        });
        assert_eq!(validate_graph(&doc), Err(vec![GraphViolation::MissingEnd]));
    }

    #[test]
    fn test_all_violations_are_collected() {
        let doc = json!({
            "type": "challenge",
            "nodes": [
                {"id": "intro", "type": "message", "next": "ghost"},
                {"id": "q", "type": "question", "options": [{"next": "phantom"}, {"next": "ghost"}]}
            ]
        });

        let violations = validate_graph(&doc).unwrap_err();
        let kinds: Vec<_> = violations.iter().map(|v| v.kind()).collect();
        assert_eq!(
            kinds,
            vec!["dangling_reference", "dangling_reference", "missing_start", "missing_end"]
        );
    }

    #[test]
    fn test_dead_end_option_is_not_an_error() {
        let mut doc = scenario_a();
        doc["nodes"][1]["options"] = json!([{"text": "a", "next": "end1"}, {"text": "walk away"}]);
        assert!(validate_graph(&doc).is_ok());
    }

    #[test]
    fn test_options_on_message_node_are_ignored() {
        let mut doc = scenario_a();
        doc["nodes"][0]["options"] = json!([{"next": "nowhere"}]);
        assert!(validate_graph(&doc).is_ok());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut doc = scenario_a();
        doc["nodes"][0]["id"] = json!("begin");
        assert_eq!(validate_graph(&doc), validate_graph(&doc));
        assert_eq!(validate_graph(&scenario_a()), validate_graph(&scenario_a()));
    }

    #[test]
    fn test_malformed_nodes() {
        let doc = json!({"type": "challenge", "nodes": [{"id": "start"}]});
        let violations = validate_graph(&doc).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind(), "malformed_graph");
        assert_eq!(violations[0].to_issue().path.as_deref(), Some("nodes"));
    }

    #[test]
    fn test_null_next_is_malformed() {
        let mut doc = scenario_a();
        doc["nodes"][0]["next"] = JsonValue::Null;
        let violations = validate_graph(&doc).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind(), "malformed_graph");

        let mut doc = scenario_a();
        doc["nodes"][1]["options"][0]["next"] = JsonValue::Null;
        let violations = validate_graph(&doc).unwrap_err();
        assert_eq!(violations[0].kind(), "malformed_graph");
    }

    #[test]
    fn test_default_mode_ignores_duplicates_and_reachability() {
        let doc = json!({
            "type": "challenge",
            "nodes": [
                {"id": "start", "type": "message", "next": "start"},
                {"id": "start", "type": "message"},
                {"id": "done", "type": "end"}
            ]
        });
        assert!(validate_graph(&doc).is_ok());

        let violations = GraphValidator::strict().validate(&doc).unwrap_err();
        assert_eq!(
            violations,
            vec![
                GraphViolation::DuplicateNodeId { id: "start".to_string() },
                GraphViolation::EndUnreachable,
            ]
        );
    }

    #[test]
    fn test_strict_mode_accepts_reachable_end() {
        assert!(GraphValidator::strict().validate(&scenario_a()).is_ok());
    }

    #[test]
    fn test_strict_mode_skips_reachability_without_start() {
        let mut doc = scenario_a();
        doc["nodes"][0]["id"] = json!("begin");
        let violations = GraphValidator::strict().validate(&doc).unwrap_err();
        assert_eq!(violations, vec![GraphViolation::MissingStart]);
    }
}

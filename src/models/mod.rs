pub mod config;
pub mod content;
pub mod graph;
pub mod validation;

pub use config::{ConfigError, StoreConfig};
pub use content::{document_title, type_field, ContentType, TypeField};
pub use graph::{ChallengeGraph, GraphBuildError, Node, NodeKind, NodeOption, START_NODE_ID};
pub use validation::{IssueCategory, ValidationIssue, ValidationJsonOutput, ValidationReport};

// simcontent - Content pipeline utilities
// Validate, import and prune challenge/quiz YAML content

pub mod cli;
pub mod models;
pub mod parser;
pub mod services;
pub mod store;
pub mod validator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use models::{ChallengeGraph, ContentType, StoreConfig, ValidationReport};
pub use store::{DocumentStore, MemoryStore, MongoStore};
pub use validator::{validate_graph, GraphValidator, GraphViolation, SchemaValidator};

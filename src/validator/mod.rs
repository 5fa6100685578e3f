pub mod content;
pub mod graph;
pub mod schema;

pub use content::{validate_document, validate_file, ValidateOptions};
pub use graph::{validate_graph, GraphValidator, GraphViolation};
pub use schema::{dotted_path, resolve_schemas_dir, SchemaValidator, SchemaViolation};

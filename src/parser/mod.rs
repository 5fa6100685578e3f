pub mod document;

pub use document::{load_document, normalize_content, parse_document_str, LoadError};

pub mod drop;
pub mod import;
pub mod validate;

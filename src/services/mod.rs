pub mod import_service;
pub mod prune_service;

//! Import service - Bulk load of YAML content files into the document store
//!
//! Files are processed one at a time. A file that fails (bad YAML, missing
//! `type`, insert error) is reported and skipped; it never aborts the batch.

use crate::models::{document_title, type_field, ContentType, TypeField};
use crate::parser::{load_document, LoadError};
use crate::store::DocumentStore;
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Directory imported when none is given
pub const DEFAULT_IMPORT_DIR: &str = "data/sample";

/// Why a single file was not imported
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Document is not a YAML mapping")]
    NotAMapping,

    #[error("No 'type' field")]
    MissingType,

    #[error("Unknown type '{0}'")]
    UnknownType(String),

    #[error("{0:#}")]
    Store(anyhow::Error),
}

/// A document that was stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedDocument {
    pub content_type: ContentType,
    pub title: String,
    /// Generated `id` field
    pub id: String,
}

/// Result of importing one file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: std::result::Result<ImportedDocument, ImportError>,
}

impl FileOutcome {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Totals for a batch import
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl ImportSummary {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

/// Document counts per content collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentStats {
    pub challenges: u64,
    pub quizzes: u64,
}

/// Find `*.yaml` and `*.yml` files directly inside `dir`, sorted by path
pub fn find_yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }

    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let mut files = Vec::new();

    for ext in ["yaml", "yml"] {
        let pattern = format!("{}/*.{}", escaped, ext);
        let entries =
            glob::glob(&pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;
        for entry in entries {
            let path = entry.context("Failed to read directory entry")?;
            if path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Stamp a parsed document with a fresh `id` and `created_at`
///
/// Any existing `id` is replaced.
pub fn prepare_document(
    document: JsonValue,
    id: &Uuid,
    now: DateTime<Utc>,
) -> std::result::Result<(ContentType, JsonValue), ImportError> {
    let content_type = match type_field(&document) {
        TypeField::Known(content_type) => content_type,
        TypeField::NotAMapping => return Err(ImportError::NotAMapping),
        TypeField::Missing => return Err(ImportError::MissingType),
        TypeField::Unknown(value) => return Err(ImportError::UnknownType(value)),
    };

    let mut document = document;
    if let Some(map) = document.as_object_mut() {
        map.insert("id".to_string(), JsonValue::String(id.to_string()));
        map.insert("created_at".to_string(), JsonValue::String(now.to_rfc3339()));
    }

    Ok((content_type, document))
}

/// Load one file and insert it into its content collection
pub async fn import_file(
    path: &Path,
    store: &dyn DocumentStore,
) -> std::result::Result<ImportedDocument, ImportError> {
    let document = load_document(path)?;
    let id = Uuid::new_v4();
    let (content_type, document) = prepare_document(document, &id, Utc::now())?;
    let title = document_title(&document);

    store
        .insert(content_type.collection(), document)
        .await
        .map_err(ImportError::Store)?;

    tracing::debug!(
        file = %path.display(),
        collection = content_type.collection(),
        %id,
        "imported document"
    );

    Ok(ImportedDocument {
        content_type,
        title,
        id: id.to_string(),
    })
}

/// Import files in order, calling `on_outcome` as each one finishes
pub async fn import_files<F>(
    files: &[PathBuf],
    store: &dyn DocumentStore,
    mut on_outcome: F,
) -> ImportSummary
where
    F: FnMut(&FileOutcome),
{
    let mut summary = ImportSummary::default();

    for path in files {
        let result = import_file(path, store).await;
        if let Err(e) = &result {
            tracing::debug!(file = %path.display(), error = %e, "import failed");
        }

        let outcome = FileOutcome {
            path: path.clone(),
            result,
        };
        on_outcome(&outcome);

        summary.attempted += 1;
        if outcome.is_success() {
            summary.succeeded += 1;
        }
        summary.outcomes.push(outcome);
    }

    summary
}

/// Count documents in the challenge and quiz collections
pub async fn content_stats(store: &dyn DocumentStore) -> Result<ContentStats> {
    Ok(ContentStats {
        challenges: store.count(ContentType::Challenge.collection()).await?,
        quizzes: store.count(ContentType::Quiz.collection()).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_document_stamps_fields() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let (content_type, doc) =
            prepare_document(json!({"type": "quiz", "id": "old", "title": "T"}), &id, now).unwrap();

        assert_eq!(content_type, ContentType::Quiz);
        assert_eq!(doc["id"], id.to_string());
        assert_eq!(doc["created_at"], now.to_rfc3339());
        assert_eq!(doc["title"], "T");
        assert!(DateTime::parse_from_rfc3339(doc["created_at"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_prepare_document_rejects() {
        let id = Uuid::new_v4();
        assert!(matches!(
            prepare_document(json!({"title": "T"}), &id, Utc::now()),
            Err(ImportError::MissingType)
        ));
        assert!(matches!(
            prepare_document(json!({"type": "survey"}), &id, Utc::now()),
            Err(ImportError::UnknownType(t)) if t == "survey"
        ));
        assert!(matches!(
            prepare_document(JsonValue::Null, &id, Utc::now()),
            Err(ImportError::NotAMapping)
        ));
    }

    #[test]
    fn test_find_yaml_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("b.yml"), "type: quiz").unwrap();
        std::fs::write(temp.path().join("a.yaml"), "type: quiz").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "x").unwrap();
        std::fs::create_dir(temp.path().join("nested.yaml")).unwrap();

        let files = find_yaml_files(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.yml"]);
    }

    #[test]
    fn test_find_yaml_files_missing_dir() {
        let temp = TempDir::new().unwrap();
        let err = find_yaml_files(&temp.path().join("nope")).unwrap_err();
        assert!(err.to_string().starts_with("Directory not found"));
    }

    #[tokio::test]
    async fn test_import_file_routes_by_type() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("c.yaml");
        std::fs::write(&path, "type: challenge\ntitle: Tailgate\nnodes: []\n").unwrap();

        let store = MemoryStore::new();
        let imported = import_file(&path, &store).await.unwrap();

        assert_eq!(imported.content_type, ContentType::Challenge);
        assert_eq!(imported.title, "Tailgate");
        let docs = store.documents("challenges").await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["id"], imported.id);
    }

    #[tokio::test]
    async fn test_content_stats() {
        let store = MemoryStore::new();
        store.insert("quizzes", json!({})).await.unwrap();
        store.insert("challenges", json!({})).await.unwrap();
        store.insert("challenges", json!({})).await.unwrap();

        let stats = content_stats(&store).await.unwrap();
        assert_eq!(stats, ContentStats { challenges: 2, quizzes: 1 });
    }
}

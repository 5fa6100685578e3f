use crate::models::StoreConfig;
use crate::services::import_service::{content_stats, find_yaml_files, import_files, FileOutcome};
use crate::store::{DocumentStore, MemoryStore, MongoStore};
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Run import command
///
/// `config` is required unless `dry_run` is set, in which case documents go
/// to an in-memory store and nothing is written.
pub async fn run(dir: &Path, config: Option<&StoreConfig>, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("{}", "🧪 Dry run: documents will not be written".yellow());
        let store = MemoryStore::new();
        return import_into(dir, &store).await;
    }

    let config = config.ok_or_else(|| anyhow::anyhow!("Database configuration is missing"))?;
    let store = MongoStore::connect(config).await?;
    let result = import_into(dir, &store).await;
    store.shutdown().await;
    result
}

/// Import every YAML file in `dir` into `store` and print a summary
pub async fn import_into(dir: &Path, store: &dyn DocumentStore) -> Result<()> {
    let files = find_yaml_files(dir)?;
    if files.is_empty() {
        anyhow::bail!("No YAML files found in {}", dir.display());
    }

    println!();
    println!("{}", format!("🔍 Found {} YAML files", files.len()).cyan());
    println!();

    let summary = import_files(&files, store, print_outcome).await;

    println!();
    let line = format!("Imported {}/{} files", summary.succeeded, summary.attempted);
    if summary.failed() == 0 {
        println!("{}", format!("✅ {}", line).green().bold());
    } else {
        println!("{}", format!("⚠️  {}", line).yellow().bold());
    }
    println!();

    match content_stats(store).await {
        Ok(stats) => {
            println!("{}", "📊 Database stats:".cyan());
            println!("   Challenges: {}", stats.challenges);
            println!("   Quizzes: {}", stats.quizzes);
        }
        Err(e) => {
            println!("{}", format!("⚠️  Could not read database stats: {:#}", e).yellow());
        }
    }

    Ok(())
}

fn print_outcome(outcome: &FileOutcome) {
    match &outcome.result {
        Ok(doc) => println!(
            "{} {}: {}",
            "✅".green(),
            doc.content_type.display_name(),
            doc.title
        ),
        Err(e) => println!(
            "{} {}: {}",
            "❌".red(),
            outcome.file_name(),
            e.to_string().red()
        ),
    }
}

use crate::models::StoreConfig;
use crate::services::prune_service::{drop_collections, DropOutcome, COLLECTIONS_TO_DROP};
use crate::store::{DocumentStore, MongoStore};
use crate::Result;
use colored::Colorize;

/// Run drop command
pub async fn run(config: &StoreConfig) -> Result<()> {
    println!(
        "{}",
        format!("🔗 Connecting to MongoDB at: {}", config.connection_url).cyan()
    );
    let store = MongoStore::connect(config).await?;

    println!(
        "{}",
        format!("🗑️  Dropping collections from database '{}'...", store.database_name()).cyan()
    );

    let result = drop_all(&store).await;
    store.shutdown().await;
    result
}

/// Drop the fixed content collections from `store` and print a summary
pub async fn drop_all(store: &dyn DocumentStore) -> Result<()> {
    let summary = drop_collections(store, &COLLECTIONS_TO_DROP, print_outcome).await?;

    println!();
    println!(
        "{}",
        format!(
            "✨ Done. {}/{} collections dropped.",
            summary.dropped, summary.total
        )
        .green()
        .bold()
    );

    Ok(())
}

fn print_outcome(name: &str, outcome: &DropOutcome) {
    match outcome {
        DropOutcome::Dropped => {
            println!("{} Collection '{}' dropped.", "✅".green(), name)
        }
        DropOutcome::Missing => println!(
            "{}",
            format!("➡️  Collection '{}' not found, skipped.", name).bright_black()
        ),
        DropOutcome::Failed(reason) => println!(
            "{} Collection '{}' could not be dropped: {}",
            "❌".red(),
            name,
            reason.red()
        ),
    }
}

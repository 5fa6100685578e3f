//! Prune service - Drops the content collections before a fresh seed

use crate::store::DocumentStore;
use crate::Result;
use anyhow::Context;

/// Collections removed by `drop`
pub const COLLECTIONS_TO_DROP: [&str; 3] = ["challenges", "quizzes", "simulations"];

/// What happened to one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Dropped,
    /// Collection did not exist; nothing to do
    Missing,
    Failed(String),
}

/// Totals for a prune run
#[derive(Debug, Default)]
pub struct PruneSummary {
    pub dropped: usize,
    pub total: usize,
    pub outcomes: Vec<(String, DropOutcome)>,
}

/// Drop each named collection that exists
///
/// The collection list is read once up front; if that fails the store is
/// unusable and the whole run fails. Individual drop failures are recorded
/// and the remaining collections are still processed.
pub async fn drop_collections<F>(
    store: &dyn DocumentStore,
    names: &[&str],
    mut on_outcome: F,
) -> Result<PruneSummary>
where
    F: FnMut(&str, &DropOutcome),
{
    let existing = store
        .collection_names()
        .await
        .with_context(|| format!("Cannot list collections on {}", store.name()))?;

    let mut summary = PruneSummary {
        total: names.len(),
        ..Default::default()
    };

    for &name in names {
        let outcome = if !existing.iter().any(|e| e == name) {
            DropOutcome::Missing
        } else {
            match store.drop_collection(name).await {
                Ok(()) => DropOutcome::Dropped,
                Err(e) => {
                    tracing::debug!(collection = %name, error = %e, "drop failed");
                    DropOutcome::Failed(format!("{:#}", e))
                }
            }
        };

        on_outcome(name, &outcome);
        if outcome == DropOutcome::Dropped {
            summary.dropped += 1;
        }
        summary.outcomes.push((name.to_string(), outcome));
    }

    Ok(summary)
}

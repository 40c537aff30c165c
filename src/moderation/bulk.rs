/// Bulk operation coordinator
///
/// Applies one lifecycle transition to a set of account ids with bounded
/// fan-out. Each id is visited exactly once; a failure on one id is recorded
/// and never aborts or rolls back the others. There is no cross-account
/// transaction.
use super::{Actor, LifecycleEngine, TransitionKind};
use crate::error::ErrorKind;
use crate::metrics;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Per-id failure record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: String,
    pub kind: ErrorKind,
    pub message: String,
}

/// Outcome of a bulk operation. Ephemeral: reported to the caller, never
/// persisted. The caller decides how to surface the aggregate counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub requested: Vec<String>,
    pub succeeded: Vec<String>,
    pub failed: Vec<BulkFailure>,
}

impl BulkOutcome {
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

#[derive(Clone)]
pub struct BulkOperationCoordinator {
    engine: Arc<LifecycleEngine>,
    concurrency: usize,
}

impl BulkOperationCoordinator {
    pub fn new(engine: Arc<LifecycleEngine>, concurrency: usize) -> Self {
        Self {
            engine,
            concurrency: concurrency.max(1),
        }
    }

    /// Apply `kind` to every id, collecting per-id outcomes. Transitions on
    /// different ids run concurrently up to the configured bound; the result
    /// lists follow the requested order for deterministic reporting.
    pub async fn apply(
        &self,
        ids: &[String],
        kind: TransitionKind,
        actor: &Actor,
        reason: Option<&str>,
    ) -> BulkOutcome {
        let reason = reason.map(str::to_owned);

        let mut results: Vec<(usize, String, Result<(), BulkFailure>)> =
            stream::iter(ids.iter().cloned().enumerate())
                .map(|(idx, id)| {
                    let engine = Arc::clone(&self.engine);
                    let actor = actor.clone();
                    let reason = reason.clone();
                    async move {
                        let outcome = engine
                            .apply(&id, kind, &actor, reason.as_deref())
                            .await
                            .map(|_| ())
                            .map_err(|e| BulkFailure {
                                id: id.clone(),
                                kind: e.kind(),
                                message: e.to_string(),
                            });
                        (idx, id, outcome)
                    }
                })
                .buffer_unordered(self.concurrency)
                .collect()
                .await;

        results.sort_by_key(|(idx, _, _)| *idx);

        let mut outcome = BulkOutcome {
            requested: ids.to_vec(),
            succeeded: Vec::new(),
            failed: Vec::new(),
        };

        for (_, id, result) in results {
            let label = match &result {
                Ok(()) => "succeeded",
                Err(_) => "failed",
            };
            metrics::BULK_OUTCOMES_TOTAL
                .with_label_values(&[kind.as_str(), label])
                .inc();

            match result {
                Ok(()) => outcome.succeeded.push(id),
                Err(failure) => outcome.failed.push(failure),
            }
        }

        info!(
            action = kind.as_str(),
            actor = %actor.id,
            requested = outcome.requested.len(),
            succeeded = outcome.succeeded_count(),
            failed = outcome.failed_count(),
            "bulk operation finished"
        );

        outcome
    }
}

//! Batch fan-out: one task per product/farmer pair
//!
//! Pairs are independent, so they run concurrently on a `JoinSet`. Results
//! are put back in input order before returning; a failing pair is reported
//! by index and never aborts the rest of the batch.
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shamba_core::{FarmerRecord, ProductRecord, TraceConfig};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::task::{Id, JoinError, JoinSet};
use tracing::{debug, warn};

use crate::builder::build_product_payload_at;
use crate::summary::ProductPayload;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub product: ProductRecord,
    pub farmer: FarmerRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    /// Position of the pair in the request
    pub index: usize,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// Successful payloads, in input order
    pub payloads: Vec<ProductPayload>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn requested(&self) -> usize {
        self.payloads.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Build product payloads for every pair. All identifiers share one issue time.
pub async fn build_product_batch(items: Vec<BatchItem>, config: Arc<TraceConfig>) -> BatchOutcome {
    let now = Utc::now();
    let requested = items.len();

    let jobs: Vec<_> = items
        .into_iter()
        .map(|item| {
            let config = Arc::clone(&config);
            async move { build_product_payload_at(&item.product, &item.farmer, &config, now) }
        })
        .collect();

    let mut payloads = Vec::with_capacity(requested);
    let mut failures = Vec::new();

    for (index, joined) in join_indexed(jobs).await {
        match joined {
            Ok(Ok(payload)) => payloads.push(payload),
            Ok(Err(err)) => {
                warn!(index, error = %err, "batch item rejected");
                failures.push(BatchFailure {
                    index,
                    code: err.code().to_string(),
                    message: err.to_string(),
                });
            }
            Err(join_err) => {
                warn!(index, error = %join_err, "batch task did not complete");
                failures.push(BatchFailure {
                    index,
                    code: "TASK".to_string(),
                    message: join_err.to_string(),
                });
            }
        }
    }

    debug!(requested, built = payloads.len(), failed = failures.len(), "product batch finished");

    BatchOutcome { payloads, failures }
}

/// Run every future on a `JoinSet` and return the results in input order,
/// each paired with its input index. A task that panics or is cancelled keeps
/// its index through the task id.
async fn join_indexed<F, T>(futures: Vec<F>) -> Vec<(usize, Result<T, JoinError>)>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let mut tasks = JoinSet::new();
    let mut indices: HashMap<Id, usize> = HashMap::with_capacity(futures.len());

    for (index, future) in futures.into_iter().enumerate() {
        let handle = tasks.spawn(future);
        indices.insert(handle.id(), index);
    }

    let mut joined = Vec::with_capacity(indices.len());
    while let Some(next) = tasks.join_next_with_id().await {
        let (id, result) = match next {
            Ok((id, value)) => (id, Ok(value)),
            Err(err) => (err.id(), Err(err)),
        };
        if let Some(index) = indices.remove(&id) {
            joined.push((index, result));
        }
    }

    joined.sort_by_key(|(index, _)| *index);
    joined
}

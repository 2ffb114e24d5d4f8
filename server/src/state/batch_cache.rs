use std::sync::Arc;

use tokio::sync::RwLock;

use crate::model::BatchClassificationResult;

/// Single-slot store for the most recent batch classification.
///
/// Last writer wins. Nothing is persisted.
#[derive(Clone, Default)]
pub struct BatchCache {
    last_batch: Arc<RwLock<Option<BatchClassificationResult>>>,
}

impl BatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn store(&self, batch: BatchClassificationResult) {
        let mut slot = self.last_batch.write().await;
        *slot = Some(batch);
    }

    /// The stored batch, only if it was computed for exactly `emails`.
    pub async fn matching(&self, emails: &[String]) -> Option<BatchClassificationResult> {
        let slot = self.last_batch.read().await;
        slot.as_ref()
            .filter(|batch| batch.matches_emails(emails))
            .cloned()
    }

    #[cfg(test)]
    pub async fn clear(&self) {
        self.last_batch.write().await.take();
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.last_batch.read().await.is_none()
    }
}

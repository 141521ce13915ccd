use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;

use crate::models::vote_record_models::VoteRecord;
use crate::utils::error::{AppError, AppResult, StorageError};

pub mod connection;
pub mod memory;
pub mod mongo;
pub mod supabase;

/// Append-only vote storage.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn insert(&self, record: &VoteRecord) -> Result<(), StorageError>;

    /// Whether a record matches `bot` and `user` exactly. With `since`, only
    /// records whose timestamp is strictly greater count.
    async fn exists(&self, bot: &str, user: &str, since: Option<i64>)
        -> Result<bool, StorageError>;
}

/// Write-once handle to the active backend, shared by ingestion and queries.
#[derive(Clone, Default)]
pub struct BackendSlot {
    inner: Arc<OnceCell<Arc<dyn StorageBackend>>>,
}

impl BackendSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&Arc<dyn StorageBackend>> {
        self.inner.get()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.get().is_some()
    }

    pub fn fill(&self, backend: Arc<dyn StorageBackend>) -> AppResult<()> {
        self.inner
            .set(backend)
            .map_err(|_| AppError::AlreadyConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryBackend;

    #[test]
    fn slot_fills_once() {
        let slot = BackendSlot::new();
        assert!(!slot.is_ready());

        slot.fill(Arc::new(MemoryBackend::new())).unwrap();
        assert!(slot.is_ready());

        let shared = slot.clone();
        assert!(matches!(
            shared.fill(Arc::new(MemoryBackend::new())),
            Err(AppError::AlreadyConnected)
        ));
    }
}

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::StorageBackend;
use crate::models::vote_record_models::VoteRecord;
use crate::utils::error::StorageError;

/// In-process vote storage with the same matching rules as the database adapters.
#[derive(Default)]
pub struct MemoryBackend {
    records: RwLock<Vec<VoteRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn records(&self) -> Vec<VoteRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, record: &VoteRecord) -> Result<(), StorageError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn exists(
        &self,
        bot: &str,
        user: &str,
        since: Option<i64>,
    ) -> Result<bool, StorageError> {
        let records = self.records.read().await;

        Ok(records.iter().any(|record| {
            record.bot == bot
                && record.user == user
                && since.map_or(true, |since| record.timestamp > since)
        }))
    }
}

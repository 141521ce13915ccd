use std::sync::Arc;

use tracing::info;

use super::{mongo::MongoBackend, supabase::SupabaseBackend, StorageBackend};
use crate::models::config_models::StorageConfig;
use crate::utils::error::StorageError;

/// Opens the adapter selected by the configuration.
pub async fn connect_backend(
    config: &StorageConfig,
) -> Result<Arc<dyn StorageBackend>, StorageError> {
    let backend: Arc<dyn StorageBackend> = match config {
        StorageConfig::Mongo(mongo) => {
            info!("Connecting to MongoDB database {}", mongo.db);
            Arc::new(MongoBackend::connect(mongo).await?)
        }
        StorageConfig::Supabase(supabase) => {
            info!("Using Supabase table {}", supabase.table);
            Arc::new(SupabaseBackend::connect(supabase)?)
        }
    };

    Ok(backend)
}

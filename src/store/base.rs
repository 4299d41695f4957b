use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::memory_store::MemoryStore;
use super::repository::PromptRepository;
use super::rest_kv_store::RestKvStore;
use super::StoreError;
use crate::config::StoreConfig;
use crate::models::Prompt;

/// The PromptStore trait abstracts where the prompt blob lives. Stores
/// always hand back and accept the whole collection.
#[async_trait]
pub trait PromptStore: Send + Sync {
    fn get_name(&self) -> &str;
    async fn load(&self) -> Result<Vec<Prompt>, StoreError>;
    async fn save(&self, prompts: &[Prompt]) -> Result<(), StoreError>;
}

/// Builds the prompt repository described by the StoreConfig.
/// Without a `rest` backend everything lives in memory.
pub fn create_repository(config: &StoreConfig) -> Arc<PromptRepository> {
    match &config.rest {
        Some(rest) => {
            let remote: Arc<dyn PromptStore> = Arc::new(RestKvStore::new(rest, &config.key));
            let fallback = config.fallback_to_memory.then(MemoryStore::seeded);
            Arc::new(PromptRepository::new(remote, fallback))
        }
        None => {
            info!("No remote KV store configured. Using in-memory prompt store.");
            Arc::new(PromptRepository::new(Arc::new(MemoryStore::seeded()), None))
        }
    }
}

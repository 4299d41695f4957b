use async_trait::async_trait;
use tokio::sync::RwLock;

use super::seed::seed_prompts;
use super::{PromptStore, StoreError};
use crate::models::Prompt;

/// Keeps the collection in process memory. Used when no remote store is
/// configured and as the fallback when the remote store fails.
pub struct MemoryStore {
    prompts: RwLock<Vec<Prompt>>,
}

impl MemoryStore {
    pub fn new(prompts: Vec<Prompt>) -> Self {
        Self {
            prompts: RwLock::new(prompts),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_prompts())
    }
}

#[async_trait]
impl PromptStore for MemoryStore {
    fn get_name(&self) -> &str {
        "memory"
    }

    async fn load(&self) -> Result<Vec<Prompt>, StoreError> {
        Ok(self.prompts.read().await.clone())
    }

    async fn save(&self, prompts: &[Prompt]) -> Result<(), StoreError> {
        *self.prompts.write().await = prompts.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_from_seed_and_keeps_writes() {
        let store = MemoryStore::seeded();
        let mut prompts = store.load().await.unwrap();
        assert_eq!(prompts.len(), 4);

        prompts.truncate(1);
        store.save(&prompts).await.unwrap();
        assert_eq!(store.load().await.unwrap(), prompts);
    }
}

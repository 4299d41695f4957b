use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{error, info};

use super::memory_store::MemoryStore;
use super::{PromptStore, StoreError};
use crate::collection::{self, PromptFilter};
use crate::models::{Prompt, PromptDraft};

/// Prompt operations on top of a store.
///
/// Mutations are read-modify-write over the whole blob and are serialized
/// within this process. When a `fallback` is set, a failing primary store is
/// replaced by the in-memory copy for that call; the next call tries the
/// primary again and nothing is reconciled.
pub struct PromptRepository {
    primary: Arc<dyn PromptStore>,
    fallback: Option<MemoryStore>,
    write_lock: Mutex<()>,
}

impl PromptRepository {
    pub fn new(primary: Arc<dyn PromptStore>, fallback: Option<MemoryStore>) -> Self {
        Self {
            primary,
            fallback,
            write_lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> Result<Vec<Prompt>, StoreError> {
        let mut prompts = match (self.primary.load().await, &self.fallback) {
            (Ok(prompts), _) => prompts,
            (Err(e), Some(fallback)) => {
                error!(
                    event_name = "store.read.fallback",
                    store = self.primary.get_name(),
                    "Read from prompt store failed: {}. Falling back to in-memory store.",
                    e
                );
                fallback.load().await?
            }
            (Err(e), None) => return Err(e),
        };
        collection::sort_prompts(&mut prompts);
        Ok(prompts)
    }

    async fn write(&self, prompts: &[Prompt]) -> Result<(), StoreError> {
        match (self.primary.save(prompts).await, &self.fallback) {
            (Ok(()), _) => Ok(()),
            (Err(e), Some(fallback)) => {
                error!(
                    event_name = "store.write.fallback",
                    store = self.primary.get_name(),
                    "Write to prompt store failed: {}. Falling back to in-memory store.",
                    e
                );
                fallback.save(prompts).await
            }
            (Err(e), None) => Err(e),
        }
    }

    /// All prompts in display order.
    pub async fn list(&self) -> Result<Vec<Prompt>, StoreError> {
        self.read().await
    }

    pub async fn list_filtered(&self, filter: &PromptFilter) -> Result<Vec<Prompt>, StoreError> {
        let mut prompts = self.read().await?;
        prompts.retain(|p| filter.matches(p));
        Ok(prompts)
    }

    /// Inserts or replaces a prompt and returns it as stored.
    pub async fn save(&self, draft: PromptDraft) -> Result<Prompt, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut prompts = self.read().await?;
        let saved = collection::upsert(&mut prompts, draft, Utc::now());
        self.write(&prompts).await?;
        info!(prompt_id = saved.id.as_str(), sort_order = saved.sort_order, "Saved prompt");
        Ok(saved)
    }

    /// Returns false when no prompt has this id; nothing is written then.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut prompts = self.read().await?;
        if !collection::remove(&mut prompts, id) {
            return Ok(false);
        }
        self.write(&prompts).await?;
        info!(prompt_id = id, "Deleted prompt");
        Ok(true)
    }

    /// Applies a new order and returns the full collection.
    pub async fn reorder(&self, ids: &[String]) -> Result<Vec<Prompt>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let prompts = collection::reorder(self.read().await?, ids);
        self.write(&prompts).await?;
        info!(requested = ids.len(), total = prompts.len(), "Reordered prompts");
        Ok(prompts)
    }
}

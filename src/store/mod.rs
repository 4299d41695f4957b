pub mod base;
pub mod error;
pub mod memory_store;
pub mod repository;
pub mod rest_kv_store;
pub mod seed;

// Re-export the primary store items so code outside can do
// "use crate::store::{PromptStore, create_repository};"
pub use base::{create_repository, PromptStore};
pub use error::StoreError;
pub use repository::PromptRepository;

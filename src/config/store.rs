use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::store::rest_kv_store::RestKvConfig;

pub const DEFAULT_PROMPTS_KEY: &str = "promptlib:prompts";

/// Where the prompt collection lives:
/// - key: the blob key holding the whole JSON array.
/// - fallback_to_memory: degrade to the in-memory copy when the remote store fails.
/// - rest: the remote KV backend; without it everything stays in memory.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_key")]
    pub key: String,
    #[serde(default = "default_fallback")]
    pub fallback_to_memory: bool,
    pub rest: Option<RestKvConfig>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            fallback_to_memory: default_fallback(),
            rest: None,
        }
    }
}

fn default_key() -> String {
    DEFAULT_PROMPTS_KEY.to_string()
}

fn default_fallback() -> bool {
    true
}

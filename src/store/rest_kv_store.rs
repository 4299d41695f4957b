use async_trait::async_trait;
use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::seed::seed_prompts;
use super::{PromptStore, StoreError};
use crate::collection::normalize;
use crate::models::prompt::StoredPrompt;
use crate::models::Prompt;

/// Connection details for a KV store speaking the Upstash REST dialect.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct RestKvConfig {
    pub url: String,
    pub token: String,
}

/// Envelope returned by every REST KV call.
#[derive(Deserialize, Debug)]
struct KvResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

/// Stores the whole collection as one JSON blob under a single key.
///
/// Writes replace the blob wholesale; there is no compare-and-swap, so the
/// last writer wins across processes.
pub struct RestKvStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
    key: String,
}

impl RestKvStore {
    pub fn new(config: &RestKvConfig, key: &str) -> Self {
        info!("Using REST KV store at {} with key '{}'", config.url, key);
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            key: key.to_string(),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, StoreError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: KvResponse = response.json().await?;
        match envelope.error {
            Some(error) => Err(StoreError::Remote(error)),
            None => Ok(envelope.result),
        }
    }

    /// Fetches the raw blob. `None` when the key is unset.
    async fn get_blob(&self) -> Result<Option<Value>, StoreError> {
        let url = format!("{}/get/{}", self.base_url, self.key);
        debug!("Fetching prompt blob from {}", url);
        let result = self.send(self.client.get(&url)).await?;

        Ok(match result {
            Value::Null => None,
            // Values are stored as JSON text; decode them when possible.
            Value::String(text) => Some(serde_json::from_str(&text).unwrap_or(Value::String(text))),
            other => Some(other),
        })
    }
}

/// Reads a blob as a prompt collection. `None` for anything that is not a
/// non-empty array of well-formed records.
fn parse_blob(blob: Value) -> Option<Vec<Prompt>> {
    let stored: Vec<StoredPrompt> = serde_json::from_value(blob).ok()?;
    if stored.is_empty() {
        return None;
    }
    Some(normalize(stored, Utc::now()))
}

#[async_trait]
impl PromptStore for RestKvStore {
    fn get_name(&self) -> &str {
        "rest-kv"
    }

    /// Loads the collection, writing the seed set first when the blob is
    /// missing, empty, or unreadable.
    async fn load(&self) -> Result<Vec<Prompt>, StoreError> {
        if let Some(prompts) = self.get_blob().await?.and_then(parse_blob) {
            return Ok(prompts);
        }

        warn!(
            event_name = "store.rest_kv.seeded",
            key = self.key.as_str(),
            "Prompt blob missing or invalid, writing seed prompts"
        );
        let seeds = seed_prompts();
        self.save(&seeds).await?;
        Ok(seeds)
    }

    async fn save(&self, prompts: &[Prompt]) -> Result<(), StoreError> {
        let url = format!("{}/set/{}", self.base_url, self.key);
        let body = serde_json::to_string(prompts)?;
        self.send(self.client.post(&url).body(body)).await?;
        debug!("Wrote {} prompts to {}", prompts.len(), url);
        Ok(())
    }
}

use thiserror::Error;

/// Failures talking to a prompt store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to KV store failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("KV store answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("KV store reported an error: {0}")]
    Remote(String),
    #[error("failed to encode prompts: {0}")]
    Encode(#[from] serde_json::Error),
}

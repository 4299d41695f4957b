use serde::{Deserialize, Serialize};

/// A freshly issued admin session token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub token: String,
    /// Expiry in epoch milliseconds.
    pub expires_at: i64,
}

/// What the verify endpoint hands back to the client, which keeps it until
/// `expires_at` passes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub token: String,
    pub expires_at: i64,
    pub expires_in_ms: i64,
    pub admin_name: String,
}

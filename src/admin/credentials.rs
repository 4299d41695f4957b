use axum::http::HeaderMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::TokenService;

/// Admin credentials carried in a mutation request body.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredentials {
    #[serde(default, deserialize_with = "string_only")]
    pub access_key: Option<String>,
    #[serde(default, deserialize_with = "string_only")]
    pub token: Option<String>,
}

/// Non-string credential fields count as absent rather than failing the body.
fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Some(value),
        _ => None,
    })
}

/// Extracts the token from an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get("authorization")?.to_str().ok()?;
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}

impl TokenService {
    /// A request is authorized by a valid session token (body or bearer
    /// header) or by the raw access key. Empty access keys never match.
    pub fn authorize(&self, credentials: &AdminCredentials, bearer: Option<&str>) -> bool {
        let token_is_valid = credentials
            .token
            .as_deref()
            .into_iter()
            .chain(bearer)
            .any(|token| self.verify(token));
        if token_is_valid {
            return true;
        }

        let key_is_valid = credentials
            .access_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .is_some_and(|key| self.verify_access_key(key));
        if !key_is_valid {
            warn!(
                event_name = "admin.authorize.denied",
                has_token = credentials.token.is_some() || bearer.is_some(),
                has_access_key = credentials.access_key.is_some(),
                "Rejected admin request"
            );
        }
        key_is_valid
    }
}

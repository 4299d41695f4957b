use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

use super::secret::resolve_secret;
use crate::config::ConfigV1;
use crate::models::SessionToken;

type HmacSha256 = Hmac<Sha256>;

#[derive(Serialize, Deserialize)]
struct SessionClaims {
    exp: i64,
}

/// Signs and verifies admin session tokens.
///
/// A token is `base64url(json {"exp": <epoch ms>}) + "." + base64url(hmac)`,
/// where the HMAC-SHA256 is computed over the encoded payload with the shared
/// secret. There is no revocation: a token is good until `exp`.
pub struct TokenService {
    secret: Option<String>,
    ttl_ms: i64,
}

impl TokenService {
    pub fn new(secret: Option<String>, ttl_secs: u64) -> Self {
        let ttl_ms = i64::try_from(ttl_secs.saturating_mul(1000)).unwrap_or(i64::MAX);
        Self { secret, ttl_ms }
    }

    pub fn from_config(config: &ConfigV1) -> Self {
        Self::new(
            resolve_secret(&config.admin, config.environment),
            config.admin.session_ttl_secs,
        )
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    pub fn session_ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Issues a token expiring one session TTL from now.
    pub fn issue(&self) -> Option<SessionToken> {
        self.issue_at(Utc::now().timestamp_millis())
    }

    pub fn issue_at(&self, now_ms: i64) -> Option<SessionToken> {
        let secret = self.secret.as_deref()?;
        let expires_at = now_ms.saturating_add(self.ttl_ms);
        let claims = serde_json::to_vec(&SessionClaims { exp: expires_at }).ok()?;
        let payload = URL_SAFE_NO_PAD.encode(claims);
        let signature = URL_SAFE_NO_PAD.encode(sign(secret, &payload)?);

        Some(SessionToken {
            token: format!("{}.{}", payload, signature),
            expires_at,
        })
    }

    pub fn verify(&self, token: &str) -> bool {
        self.verify_at(token, Utc::now().timestamp_millis())
    }

    /// Fails closed on anything unexpected.
    pub fn verify_at(&self, token: &str, now_ms: i64) -> bool {
        let Some(secret) = self.secret.as_deref() else {
            return false;
        };

        let mut parts = token.split('.');
        let (Some(payload), Some(signature), None) = (parts.next(), parts.next(), parts.next())
        else {
            debug!("Session token is not two dot-separated parts");
            return false;
        };
        if payload.is_empty() || signature.is_empty() {
            return false;
        }

        let Ok(signature) = URL_SAFE_NO_PAD.decode(signature) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            return false;
        };
        mac.update(payload.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            debug!("Session token signature mismatch");
            return false;
        }

        let Ok(raw) = URL_SAFE_NO_PAD.decode(payload) else {
            return false;
        };
        match serde_json::from_slice::<SessionClaims>(&raw) {
            Ok(claims) => claims.exp > now_ms,
            Err(_) => false,
        }
    }

    /// Compares a raw access key (surrounding whitespace ignored) with the
    /// secret in constant time.
    pub fn verify_access_key(&self, access_key: &str) -> bool {
        let Some(secret) = self.secret.as_deref() else {
            return false;
        };
        access_key
            .trim()
            .as_bytes()
            .ct_eq(secret.as_bytes())
            .into()
    }
}

fn sign(secret: &str, payload: &str) -> Option<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(payload.as_bytes());
    Some(mac.finalize().into_bytes().to_vec())
}

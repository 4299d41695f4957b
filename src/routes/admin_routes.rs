//! Admin session endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::AdminSession;
use crate::state::AppState;
use crate::utils::http_helpers::{json_body, HTTPError};

/// Registers admin routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/admin/verify", post(verify))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest {
    #[serde(default)]
    access_key: Option<String>,
    #[serde(default)]
    admin_name: Option<String>,
}

/// Exchanges the access key for a session token.
async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<AdminSession>, HTTPError> {
    if !state.admin.is_configured() {
        return Err(HTTPError::internal(
            "Admin password is not configured for this deployment.",
        ));
    }

    let body = json_body(payload)?;
    let admin_name = body
        .admin_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| HTTPError::bad_request("Admin name is required."))?;

    let key_is_valid = body
        .access_key
        .as_deref()
        .is_some_and(|key| state.admin.verify_access_key(key));
    if !key_is_valid {
        warn!(
            event_name = "admin.verify.denied",
            admin_name, "Access key verification failed"
        );
        return Err(HTTPError::unauthorized("Invalid access key."));
    }

    let session = state
        .admin
        .issue()
        .ok_or_else(|| HTTPError::internal("Failed to issue admin session."))?;

    info!(
        event_name = "admin.verify.issued",
        admin_name,
        expires_at = session.expires_at,
        "Issued admin session"
    );

    Ok(Json(AdminSession {
        token: session.token,
        expires_at: session.expires_at,
        expires_in_ms: state.admin.session_ttl_ms(),
        admin_name: admin_name.to_string(),
    }))
}

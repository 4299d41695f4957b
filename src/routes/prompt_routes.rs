//! Prompt listing and admin mutation endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::admin::{bearer_token, AdminCredentials};
use crate::collection::PromptFilter;
use crate::models::{Prompt, PromptDraft};
use crate::state::AppState;
use crate::utils::http_helpers::{json_body, store_failure, HTTPError};

/// Registers prompt routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/prompts", get(list_prompts))
        .route("/api/save", post(save_prompt))
        .route("/api/delete", post(delete_prompt))
        .route("/api/reorder", post(reorder_prompts))
}

#[derive(Deserialize)]
struct ListQuery {
    category: Option<String>,
    q: Option<String>,
}

#[derive(Deserialize)]
struct SaveRequest {
    #[serde(default)]
    prompt: Option<Value>,
    #[serde(flatten)]
    credentials: AdminCredentials,
}

#[derive(Deserialize)]
struct DeleteRequest {
    #[serde(default)]
    id: Option<String>,
    #[serde(flatten)]
    credentials: AdminCredentials,
}

#[derive(Deserialize)]
struct ReorderRequest {
    #[serde(default)]
    ids: Option<Value>,
    #[serde(flatten)]
    credentials: AdminCredentials,
}

#[derive(Serialize)]
struct PromptsResponse {
    prompts: Vec<Prompt>,
}

#[derive(Serialize)]
struct PromptResponse {
    prompt: Prompt,
}

#[derive(Serialize)]
struct DeleteResponse {
    id: String,
}

fn require_admin(
    state: &AppState,
    headers: &HeaderMap,
    credentials: &AdminCredentials,
) -> Result<(), HTTPError> {
    if state.admin.authorize(credentials, bearer_token(headers)) {
        Ok(())
    } else {
        Err(HTTPError::unauthorized("Unauthorized: admin key required."))
    }
}

/// Public listing, optionally filtered by `category` and search text `q`.
async fn list_prompts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PromptsResponse>, HTTPError> {
    let filter = PromptFilter::new(query.category.as_deref(), query.q.as_deref());
    let prompts = state
        .prompts
        .list_filtered(&filter)
        .await
        .map_err(store_failure("Failed to load prompts."))?;
    Ok(Json(PromptsResponse { prompts }))
}

async fn save_prompt(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<PromptResponse>, HTTPError> {
    let body = json_body(payload)?;
    let draft = body
        .prompt
        .and_then(|prompt| serde_json::from_value::<PromptDraft>(prompt).ok())
        .filter(|draft| !draft.id.trim().is_empty())
        .ok_or_else(|| HTTPError::bad_request("Prompt data is malformed."))?;

    require_admin(&state, &headers, &body.credentials)?;

    let prompt = state
        .prompts
        .save(draft)
        .await
        .map_err(store_failure("Failed to save prompt."))?;
    Ok(Json(PromptResponse { prompt }))
}

async fn delete_prompt(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<DeleteResponse>, HTTPError> {
    let body = json_body(payload)?;
    let id = body
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| HTTPError::bad_request("Prompt id is required."))?;

    require_admin(&state, &headers, &body.credentials)?;

    let deleted = state
        .prompts
        .delete(&id)
        .await
        .map_err(store_failure("Failed to delete prompt."))?;
    if !deleted {
        return Err(HTTPError::not_found("Prompt not found."));
    }
    Ok(Json(DeleteResponse { id }))
}

async fn reorder_prompts(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<PromptsResponse>, HTTPError> {
    let body = json_body(payload)?;
    let ids = body
        .ids
        .and_then(|ids| serde_json::from_value::<Vec<String>>(ids).ok())
        .ok_or_else(|| HTTPError::bad_request("Reorder ids must be a list of strings."))?;

    require_admin(&state, &headers, &body.credentials)?;

    let prompts = state
        .prompts
        .reorder(&ids)
        .await
        .map_err(store_failure("Failed to save the new order."))?;
    Ok(Json(PromptsResponse { prompts }))
}

//! HTTP route definitions and handlers.
//!
//! Routes are grouped into admin session, prompt, and health endpoints.

mod admin_routes;
mod health_routes;
mod prompt_routes;

use crate::state::AppState;
use axum::Router;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(admin_routes::routes())
        .merge(prompt_routes::routes())
        .merge(health_routes::routes())
        .with_state(state)
}

//! Shared application state.
//!
//! Contains the state that is shared across all request handlers:
//! configuration, the admin token service, and the prompt repository.

use crate::admin::TokenService;
use crate::config::ConfigV1;
use crate::store::PromptRepository;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Issues and checks admin session tokens and access keys.
    pub admin: Arc<TokenService>,
    /// The prompt collection and its backing store.
    pub prompts: Arc<PromptRepository>,
}

impl AppState {
    /// Wires the admin service and prompt store from configuration.
    pub fn from_config(config: Arc<ConfigV1>) -> Self {
        let admin = Arc::new(TokenService::from_config(&config));
        let prompts = crate::store::create_repository(&config.store);
        AppState {
            config,
            admin,
            prompts,
        }
    }
}

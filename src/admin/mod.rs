//! Admin access: the shared secret, session tokens, and request authorization.

pub mod credentials;
pub mod secret;
pub mod token_service;

pub use credentials::{bearer_token, AdminCredentials};
pub use secret::{resolve_secret, DEV_ACCESS_KEY};
pub use token_service::TokenService;

use tracing::{error, warn};

use crate::config::{AdminConfig, Environment};

/// Access key used when nothing is configured outside production.
pub const DEV_ACCESS_KEY: &str = "promptlib-dev-key";

/// Resolves the shared admin secret.
///
/// A configured, non-blank password always wins. Otherwise development
/// deployments get [`DEV_ACCESS_KEY`] and production gets nothing, which locks
/// every admin endpoint.
pub fn resolve_secret(admin: &AdminConfig, environment: Environment) -> Option<String> {
    if let Some(configured) = admin
        .password
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        return Some(configured.to_string());
    }

    match environment {
        Environment::Development => {
            warn!(
                event_name = "admin.secret.dev_fallback",
                "No admin password configured, using the development access key"
            );
            Some(DEV_ACCESS_KEY.to_string())
        }
        Environment::Production => {
            error!(
                event_name = "admin.secret.missing",
                "No admin password configured in production; admin endpoints are locked"
            );
            None
        }
    }
}

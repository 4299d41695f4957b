use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::store::StoreConfig;

/// Environment variable that points at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "PROMPTLIB_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ConfigV1 {
    pub bind_address: String,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Deployment environment. Production refuses to fall back to the
/// development access key.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Admin access settings.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct AdminConfig {
    /// Shared access key. Also read from `ADMIN_PASSWORD`.
    pub password: Option<String>,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: None,
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

fn default_session_ttl_secs() -> u64 {
    6 * 60 * 60
}

/// Builds the figment used at startup: the YAML file, then `PROMPTLIB_*`
/// overrides, then the legacy variable names the hosted deployment uses.
pub fn figment_for(path: impl AsRef<Path>) -> Figment {
    Figment::new()
        .merge(Yaml::file(path.as_ref()))
        .merge(Env::prefixed("PROMPTLIB_").ignore(&["CONFIG"]).split("__"))
        .merge(
            Env::raw()
                .only(&["ADMIN_PASSWORD"])
                .map(|_| "admin.password".into()),
        )
        .merge(
            Env::raw()
                .only(&["KV_REST_API_URL", "KV_REST_API_TOKEN"])
                .map(|key| {
                    if key.as_str().eq_ignore_ascii_case("KV_REST_API_URL") {
                        "store.rest.url".into()
                    } else {
                        "store.rest.token".into()
                    }
                }),
        )
}

/// Extracts a versioned configuration from any figment.
pub fn extract_config(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load config from `$PROMPTLIB_CONFIG`, or "config.yaml" in the current directory.
pub fn load_config() -> Result<ConfigV1, figment::Error> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    extract_config(figment_for(path))
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    const MINIMAL: &str = r#"
version: "1.0.0"
bind_address: 127.0.0.1:3000
"#;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = extract_config(Figment::new().merge(Yaml::string(MINIMAL))).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.admin.password, None);
        assert_eq!(config.admin.session_ttl_secs, 21600);
        assert_eq!(config.store.key, "promptlib:prompts");
        assert!(config.store.fallback_to_memory);
        assert!(config.store.rest.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn unknown_version_is_rejected() {
        let yaml = "version: \"2.0.0\"\nbind_address: 127.0.0.1:3000\n";
        assert!(extract_config(Figment::new().merge(Yaml::string(yaml))).is_err());
    }

    #[test]
    fn environment_overrides_file_values() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", MINIMAL)?;
            jail.set_env("PROMPTLIB_ENVIRONMENT", "production");
            jail.set_env("ADMIN_PASSWORD", "from-env");
            jail.set_env("KV_REST_API_URL", "https://kv.example.com");
            jail.set_env("KV_REST_API_TOKEN", "kv-token");

            let config = extract_config(figment_for("config.yaml"))?;
            assert_eq!(config.environment, Environment::Production);
            assert_eq!(config.admin.password.as_deref(), Some("from-env"));
            let rest = config.store.rest.expect("rest store configured");
            assert_eq!(rest.url, "https://kv.example.com");
            assert_eq!(rest.token, "kv-token");
            Ok(())
        });
    }
}

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

/// Server configuration, loaded from a YAML file with environment overrides
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on
    #[serde(default = "default_listen")]
    pub listen: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    /// Database connection URL, e.g. `sqlite://bloglist.db`
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign identity tokens
    pub token_secret: String,
    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
}

fn default_listen() -> String {
    "0.0.0.0:3003".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_token_ttl_secs() -> i64 {
    3600
}

/// Load configuration from the given YAML file, then apply environment
/// variable overrides of the form `BLOGLIST__DB__URL`.
pub fn load_config(path: &str) -> anyhow::Result<ServerConfig> {
    let settings = Config::builder()
        .add_source(File::new(path, FileFormat::Yaml))
        .add_source(
            Environment::with_prefix("BLOGLIST")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("Failed to build config from: {}", path))?;

    settings
        .try_deserialize()
        .with_context(|| format!("Failed to parse config from: {}", path))
}

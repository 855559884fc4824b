use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use contact_models::email_address::EmailAddress;
use serde::Deserialize;

mod duration;

pub use duration::Duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Loads and merges the given TOML config files, later paths overriding
/// earlier ones.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub email: EmailConfig,
    pub auth: AuthConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Header carrying the original client address when running behind a
    /// reverse proxy.
    pub real_ip_header: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// Bearer token expected on the read endpoints.
    pub api_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Recipient of the follow-up notification email.
    pub notification_email: EmailAddress,
    /// When true, `POST /mail` persists synchronously instead of publishing
    /// to the topic.
    #[serde(default)]
    pub synchronous_create: bool,
}

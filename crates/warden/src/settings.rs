//! Configuration management for Warden.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use warden_common::WardenError;
use warden_common::constants::{
    DEFAULT_AUTH_MECHANISM, DEFAULT_AUTH_SOURCE, DEFAULT_DATABASE, DEFAULT_PORT,
    INIT_RECONFIG_ATTEMPTS, INIT_RECONFIG_INTERVAL_MS,
};

/// Environment variable prefix (e.g. `WARDEN_PORT`, `WARDEN_TLS__ENABLED`)
pub const ENV_PREFIX: &str = "WARDEN";

/// Connection and bootstrap settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Database port on every member
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database named in the connection URI
    #[serde(default = "default_database")]
    pub database: String,

    /// Username (authentication is skipped when unset)
    #[serde(default)]
    pub username: Option<String>,

    /// Password for `username`
    #[serde(default)]
    pub password: Option<String>,

    /// Authentication database
    #[serde(default = "default_auth_source")]
    pub auth_source: String,

    /// Authentication mechanism
    #[serde(default = "default_auth_mechanism")]
    pub auth_mechanism: String,

    /// This set stores cluster metadata
    #[serde(default)]
    pub is_config_server: bool,

    /// TLS configuration
    #[serde(default)]
    pub tls: TlsSettings,

    /// Bootstrap retry configuration
    #[serde(default)]
    pub init_retry: RetrySettings,
}

/// TLS-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TlsSettings {
    /// Connect over TLS
    #[serde(default)]
    pub enabled: bool,

    /// Client certificate path
    #[serde(default)]
    pub cert_path: Option<String>,

    /// Client private key path
    #[serde(default)]
    pub key_path: Option<String>,

    /// CA bundle path
    #[serde(default)]
    pub ca_path: Option<String>,

    /// Certificate revocation list path
    #[serde(default)]
    pub crl_path: Option<String>,

    /// Private key passphrase
    #[serde(default)]
    pub password: Option<String>,

    /// Verify the server hostname against its certificate
    #[serde(default = "default_true")]
    pub check_server_identity: bool,
}

impl Default for TlsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            cert_path: None,
            key_path: None,
            ca_path: None,
            crl_path: None,
            password: None,
            check_server_identity: true,
        }
    }
}

/// Fixed-interval retry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    /// Total attempts, including the first
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Delay between attempts in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl RetrySettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            interval_ms: default_interval_ms(),
        }
    }
}

// Default value functions
fn default_port() -> u16 { DEFAULT_PORT }
fn default_database() -> String { DEFAULT_DATABASE.to_string() }
fn default_auth_source() -> String { DEFAULT_AUTH_SOURCE.to_string() }
fn default_auth_mechanism() -> String { DEFAULT_AUTH_MECHANISM.to_string() }
fn default_true() -> bool { true }
fn default_attempts() -> u32 { INIT_RECONFIG_ATTEMPTS }
fn default_interval_ms() -> u64 { INIT_RECONFIG_INTERVAL_MS }

impl Settings {
    /// Load settings from an optional file, then `WARDEN_*` environment overrides.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn load(config_path: Option<&str>) -> warden_common::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_sources(config_path, None)
    }

    /// Like [`load`](Self::load), with `env` standing in for the process
    /// environment when given.
    pub fn from_sources(
        config_path: Option<&str>,
        env: Option<config::Map<String, String>>,
    ) -> warden_common::Result<Self> {
        Self::build(config_path, env).map_err(|e| WardenError::Config(format!("{:#}", e)))
    }

    fn build(config_path: Option<&str>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(config::File::with_name(path));
            } else {
                tracing::warn!(path = %path, "Config file not found, using defaults");
            }
        }

        // Values stay strings; serde converts the numeric and boolean fields.
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .context("Failed to load settings")?;

        settings
            .try_deserialize()
            .context("Failed to parse settings")
    }

    /// Paths of every configured TLS file, in load order
    pub fn tls_paths(&self) -> [Option<&str>; 4] {
        [
            self.tls.cert_path.as_deref(),
            self.tls.key_path.as_deref(),
            self.tls.ca_path.as_deref(),
            self.tls.crl_path.as_deref(),
        ]
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: default_port(),
            database: default_database(),
            username: None,
            password: None,
            auth_source: default_auth_source(),
            auth_mechanism: default_auth_mechanism(),
            is_config_server: false,
            tls: TlsSettings::default(),
            init_retry: RetrySettings::default(),
        }
    }
}

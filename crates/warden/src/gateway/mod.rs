//! Connection seam between Warden and the database driver.
//!
//! Warden never talks to the network itself. A driver adapter implements
//! [`ConnectionGateway`] to open sessions and [`AdminSession`] to run admin
//! commands; everything above this module only sees those two traits.
//!
//! Implements:
//! - Connection URI construction (percent-encoded credentials)
//! - Process-wide, load-once TLS material
//! - The connect request handed to the driver

mod tls;
mod uri;

pub use tls::{TlsMaterial, TlsMaterialCache};
pub use uri::connection_uri;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use warden_common::Result;

use crate::settings::Settings;

/// An open, authenticated session to one cluster endpoint
#[async_trait]
pub trait AdminSession: Send + Sync {
    /// Runs a command against the admin database and returns the reply document.
    ///
    /// A rejected command fails with `WardenError::AdminCommand`.
    async fn run_admin_command(&self, command: Value) -> Result<Value>;

    /// Releases the session
    async fn close(&self);
}

/// Opens sessions to cluster endpoints
#[async_trait]
pub trait ConnectionGateway: Send + Sync {
    /// Opens a session, failing with `WardenError::Connection` when the
    /// endpoint cannot be reached or authenticated.
    async fn connect(&self, request: &ConnectRequest) -> Result<Box<dyn AdminSession>>;
}

/// Everything a driver needs to open one session
#[derive(Debug, Clone)]
pub struct ConnectRequest {
    /// `mongodb://[user:pass@]host:port/database`
    pub uri: String,
    /// Authentication database
    pub auth_source: String,
    /// Set only when credentials are configured
    pub auth_mechanism: Option<String>,
    /// Present when TLS is enabled
    pub tls: Option<Arc<TlsMaterial>>,
    /// Private key passphrase
    pub tls_password: Option<String>,
    /// Verify the server hostname against its certificate
    pub check_server_identity: bool,
}

impl ConnectRequest {
    /// Build a request for `host` (loopback when `None`), loading TLS material
    /// through `tls_cache` on first use.
    pub async fn build(
        settings: &Settings,
        tls_cache: &TlsMaterialCache,
        host: Option<&str>,
    ) -> Result<Self> {
        let tls = if settings.tls.enabled {
            Some(tls_cache.get_or_load(settings).await?)
        } else {
            None
        };

        Ok(Self {
            uri: connection_uri(settings, host),
            auth_source: settings.auth_source.clone(),
            auth_mechanism: settings
                .username
                .as_ref()
                .map(|_| settings.auth_mechanism.clone()),
            tls,
            tls_password: settings.tls.password.clone(),
            check_server_identity: settings.tls.check_server_identity,
        })
    }
}

//! Replica set bootstrap.
//!
//! `replSetInitiate` produces a single-member set whose member reports a
//! hostname other nodes usually cannot resolve. The controller rewrites that
//! host to the externally reachable address and submits the fix, retrying
//! while the new node is still settling into the primary role.

use serde_json::{Value, json};

use warden_common::constants::commands;
use warden_common::{Result, WardenError};

use crate::gateway::AdminSession;
use crate::settings::RetrySettings;
use crate::store;

/// Initiate a replica set on `session` and advertise it as `address`.
///
/// The corrected configuration is submitted up to `retry.attempts` times,
/// `retry.interval` apart. Each attempt submits a fresh copy so the version
/// sent is always one above the initiated version.
pub async fn init(
    session: &dyn AdminSession,
    address: &str,
    is_config_server: bool,
    retry: &RetrySettings,
) -> Result<Value> {
    tracing::info!(address = %address, config_server = is_config_server, "Initiating replica set");

    session
        .run_admin_command(json!({ (commands::INITIATE): {} }))
        .await?;

    let mut config = store::get_config(session).await?;
    tracing::debug!(config = ?config, "Initial replica set config");

    let first = config.members.first_mut().ok_or_else(|| {
        WardenError::MalformedResponse("initiated config has no members".to_string())
    })?;
    first.host = address.to_string();
    config.is_config_server = is_config_server;

    let attempts = retry.attempts.max(1);
    let mut attempt = 1;

    loop {
        let mut candidate = config.clone();
        match store::reconfigure(session, &mut candidate, false).await {
            Ok(reply) => {
                tracing::info!(
                    address = %address,
                    version = candidate.version,
                    attempt = attempt,
                    "Replica set initialized"
                );
                return Ok(reply);
            }
            Err(e) if attempt >= attempts => {
                tracing::error!(attempts = attempts, error = %e, "Replica set initialization timed out");
                return Err(WardenError::InitializationTimeout {
                    attempts,
                    last_error: Box::new(e),
                });
            }
            Err(e) => {
                tracing::warn!(
                    attempt = attempt,
                    error = %e,
                    "Bootstrap reconfigure rejected, retrying"
                );
                tokio::time::sleep(retry.interval()).await;
                attempt += 1;
            }
        }
    }
}

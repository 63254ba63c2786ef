//! Reads and replaces the replica set configuration document.
//!
//! Nothing here retries; callers choose their own policy.

use serde_json::{Value, json};

use warden_common::constants::commands;
use warden_common::{ReplicaSetConfig, Result, WardenError};

use crate::gateway::AdminSession;

/// Fetch the current configuration (`replSetGetConfig`)
pub async fn get_config(session: &dyn AdminSession) -> Result<ReplicaSetConfig> {
    let mut reply = session
        .run_admin_command(json!({ (commands::GET_CONFIG): 1 }))
        .await?;

    let config = reply
        .get_mut("config")
        .map(Value::take)
        .ok_or_else(|| WardenError::MalformedResponse("reply has no config field".to_string()))?;

    serde_json::from_value(config)
        .map_err(|e| WardenError::MalformedResponse(format!("invalid replica set config: {}", e)))
}

/// Fetch replica set status (`replSetGetStatus`), passed through as-is
pub async fn get_status(session: &dyn AdminSession) -> Result<Value> {
    session
        .run_admin_command(json!({ (commands::GET_STATUS): {} }))
        .await
}

/// Bump `config.version` by one and submit it (`replSetReconfig`).
///
/// The version is bumped even when the backend rejects the submission; a
/// caller that wants to try again must re-fetch.
pub async fn reconfigure(
    session: &dyn AdminSession,
    config: &mut ReplicaSetConfig,
    force: bool,
) -> Result<Value> {
    config.version += 1;

    tracing::info!(
        version = config.version,
        members = ?config.hosts(),
        force = force,
        "Submitting replica set reconfiguration"
    );

    let document = serde_json::to_value(&*config)
        .map_err(|e| WardenError::MalformedResponse(format!("unencodable config: {}", e)))?;

    session
        .run_admin_command(json!({ (commands::RECONFIG): document, "force": force }))
        .await
        .map_err(|e| WardenError::Reconfigure {
            version: config.version,
            message: match e {
                WardenError::AdminCommand { message, .. } => message,
                other => other.to_string(),
            },
        })
}

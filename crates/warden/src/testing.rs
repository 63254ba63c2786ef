//! In-memory replica set backend for tests.
//!
//! Enforces the same version rule as the real backend: a reconfiguration
//! must carry a version greater than the stored one.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use warden_common::constants::commands;
use warden_common::{Member, ReplicaSetConfig, Result, WardenError};

use crate::gateway::{AdminSession, ConnectRequest, ConnectionGateway};

/// Hostname a freshly initiated node reports for itself
pub const SELF_REPORTED_HOST: &str = "mongo-0.local:27017";

#[derive(Default)]
struct ClusterState {
    config: Option<ReplicaSetConfig>,
    failing_reconfigs: u32,
    reconfig_attempts: u32,
    last_force: Option<bool>,
    commands: Vec<String>,
}

/// Shared handle to one fake cluster endpoint
#[derive(Clone, Default)]
pub struct FakeCluster {
    state: Arc<Mutex<ClusterState>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl FakeCluster {
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Initialized set with ids 0..n in the given host order
    pub fn with_members(version: u64, hosts: &[&str]) -> Self {
        let members = hosts
            .iter()
            .enumerate()
            .map(|(id, host)| Member::new(id as u32, *host))
            .collect();
        Self::with_config(ReplicaSetConfig::new(version, members))
    }

    pub fn with_config(mut config: ReplicaSetConfig) -> Self {
        config.extra.insert("_id".to_string(), json!("rs0"));
        let cluster = Self::default();
        cluster.state.lock().unwrap().config = Some(config);
        cluster
    }

    /// Reject the next `count` reconfigurations as if no primary were elected yet
    pub fn fail_reconfigs(&self, count: u32) {
        self.state.lock().unwrap().failing_reconfigs = count;
    }

    pub fn session(&self) -> FakeSession {
        self.opened.fetch_add(1, Ordering::SeqCst);
        FakeSession {
            cluster: self.clone(),
        }
    }

    pub fn config(&self) -> Option<ReplicaSetConfig> {
        self.state.lock().unwrap().config.clone()
    }

    pub fn reconfig_attempts(&self) -> u32 {
        self.state.lock().unwrap().reconfig_attempts
    }

    pub fn last_force(&self) -> Option<bool> {
        self.state.lock().unwrap().last_force
    }

    /// Names of every command received, in order
    pub fn commands(&self) -> Vec<String> {
        self.state.lock().unwrap().commands.clone()
    }

    pub fn open_sessions(&self) -> usize {
        self.opened.load(Ordering::SeqCst) - self.closed.load(Ordering::SeqCst)
    }

    fn handle(&self, command: &Value) -> Result<Value> {
        let mut state = self.state.lock().unwrap();

        let name = [
            commands::GET_CONFIG,
            commands::GET_STATUS,
            commands::INITIATE,
            commands::RECONFIG,
        ]
        .into_iter()
        .find(|name| command.get(*name).is_some())
        .ok_or_else(|| rejected("unknown", "no such command"))?;
        state.commands.push(name.to_string());

        match name {
            commands::GET_CONFIG => match &state.config {
                Some(config) => Ok(json!({ "config": config, "ok": 1 })),
                None => Err(rejected(name, "no replset config has been received")),
            },
            commands::GET_STATUS => match &state.config {
                Some(config) => {
                    let members: Vec<Value> = config
                        .members
                        .iter()
                        .map(|m| json!({ "_id": m.id, "name": m.host, "health": 1 }))
                        .collect();
                    Ok(json!({ "set": "rs0", "members": members, "ok": 1 }))
                }
                None => Err(rejected(name, "no replset config has been received")),
            },
            commands::INITIATE => {
                if state.config.is_some() {
                    return Err(rejected(name, "already initialized"));
                }
                let mut config =
                    ReplicaSetConfig::new(1, vec![Member::new(0, SELF_REPORTED_HOST)]);
                config.extra.insert("_id".to_string(), json!("rs0"));
                state.config = Some(config);
                Ok(json!({ "ok": 1 }))
            }
            _ => {
                state.reconfig_attempts += 1;
                if state.failing_reconfigs > 0 {
                    state.failing_reconfigs -= 1;
                    return Err(rejected(name, "node is not in primary or recovering state"));
                }

                let submitted: ReplicaSetConfig = serde_json::from_value(command[name].clone())
                    .map_err(|e| rejected(name, &e.to_string()))?;
                let current = state
                    .config
                    .as_ref()
                    .ok_or_else(|| rejected(name, "no replset config has been received"))?;

                if submitted.version <= current.version {
                    return Err(rejected(
                        name,
                        &format!(
                            "version field value of {} is out of date; current version is {}",
                            submitted.version, current.version
                        ),
                    ));
                }

                state.last_force = command["force"].as_bool();
                state.config = Some(submitted);
                Ok(json!({ "ok": 1 }))
            }
        }
    }
}

fn rejected(command: &str, message: &str) -> WardenError {
    WardenError::AdminCommand {
        command: command.to_string(),
        message: message.to_string(),
    }
}

pub struct FakeSession {
    cluster: FakeCluster,
}

#[async_trait]
impl AdminSession for FakeSession {
    async fn run_admin_command(&self, command: Value) -> Result<Value> {
        self.cluster.handle(&command)
    }

    async fn close(&self) {
        self.cluster.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Routes connections to fake clusters by endpoint; unknown endpoints are unreachable
#[derive(Clone, Default)]
pub struct FakeGateway {
    clusters: HashMap<String, FakeCluster>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: &str, cluster: FakeCluster) -> Self {
        self.clusters.insert(endpoint.to_string(), cluster);
        self
    }

    /// URIs of every connect attempt, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// `host:port` portion of a connection URI
fn endpoint_of(uri: &str) -> &str {
    let rest = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    let rest = rest.rsplit_once('@').map_or(rest, |(_, rest)| rest);
    rest.split('/').next().unwrap_or(rest)
}

#[async_trait]
impl ConnectionGateway for FakeGateway {
    async fn connect(&self, request: &ConnectRequest) -> Result<Box<dyn AdminSession>> {
        self.requests.lock().unwrap().push(request.uri.clone());

        let endpoint = endpoint_of(&request.uri);
        match self.clusters.get(endpoint) {
            Some(cluster) => Ok(Box::new(cluster.session())),
            None => Err(WardenError::Connection(format!(
                "connection refused: {}",
                endpoint
            ))),
        }
    }
}

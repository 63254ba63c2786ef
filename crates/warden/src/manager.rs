//! Entry point for schedulers and CLIs.
//!
//! Bundles the settings, the driver gateway and the process-wide TLS cache
//! behind the operations an outer control loop needs.

use serde_json::Value;
use std::sync::Arc;

use warden_common::{MembershipChangeRequest, Result};

use crate::gateway::{AdminSession, ConnectRequest, ConnectionGateway, TlsMaterialCache};
use crate::probe::{self, ProbeOutcome};
use crate::reconcile::{self, ReconcileOutcome};
use crate::settings::Settings;
use crate::{init, store};

/// Replica set membership manager
pub struct ReplicaSetManager {
    settings: Settings,
    gateway: Arc<dyn ConnectionGateway>,
    tls: TlsMaterialCache,
}

impl ReplicaSetManager {
    pub fn new(settings: Settings, gateway: Arc<dyn ConnectionGateway>) -> Self {
        Self {
            settings,
            gateway,
            tls: TlsMaterialCache::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Open a session to `address`, or the loopback address when `None`.
    ///
    /// The caller owns the returned session and must close it.
    pub async fn connect(&self, address: Option<&str>) -> Result<Box<dyn AdminSession>> {
        let request = ConnectRequest::build(&self.settings, &self.tls, address).await?;
        self.gateway.connect(&request).await
    }

    /// Replica set status document
    pub async fn get_status(&self, session: &dyn AdminSession) -> Result<Value> {
        store::get_status(session).await
    }

    /// Initiate a new set advertised as `address`
    pub async fn init(
        &self,
        session: &dyn AdminSession,
        address: &str,
        is_config_server: bool,
    ) -> Result<Value> {
        init::init(session, address, is_config_server, &self.settings.init_retry).await
    }

    /// Run one reconciliation cycle
    pub async fn reconcile<S: AsRef<str> + Sync>(
        &self,
        session: &dyn AdminSession,
        to_add: &[S],
        to_remove: &[S],
        force: bool,
    ) -> Result<ReconcileOutcome> {
        reconcile::reconcile(session, to_add, to_remove, force).await
    }

    /// Run one reconciliation cycle for a discovery snapshot
    pub async fn apply(
        &self,
        session: &dyn AdminSession,
        request: &MembershipChangeRequest,
    ) -> Result<ReconcileOutcome> {
        reconcile::reconcile_request(session, request).await
    }

    /// Probe `address`, keeping the reason it is not a member
    pub async fn probe(&self, address: &str) -> ProbeOutcome {
        match ConnectRequest::build(&self.settings, &self.tls, Some(address)).await {
            Ok(request) => probe::probe(self.gateway.as_ref(), &request).await,
            Err(e) => ProbeOutcome::NotMember(e),
        }
    }

    /// Check whether `address` already belongs to an initialized replica set.
    ///
    /// Every failure counts as `false`; use [`probe`](Self::probe) to tell
    /// "not initialized" from "unreachable".
    pub async fn is_member(&self, address: &str) -> bool {
        let outcome = self.probe(address).await;
        if let Some(reason) = outcome.reason() {
            tracing::debug!(address = %address, reason = %reason, "Address is not a replica set member");
        }
        outcome.is_member()
    }
}

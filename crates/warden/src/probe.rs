//! Replica set membership probing.
//!
//! Decides bootstrap-vs-join: an endpoint that answers `replSetGetConfig`
//! already belongs to an initialized set.

use warden_common::WardenError;

use crate::gateway::{ConnectRequest, ConnectionGateway};
use crate::store;

/// Result of probing one endpoint
#[derive(Debug)]
pub enum ProbeOutcome {
    /// Endpoint returned a replica set configuration
    Member,
    /// Endpoint could not be reached, authenticated, or has no configuration
    NotMember(WardenError),
}

impl ProbeOutcome {
    pub fn is_member(&self) -> bool {
        matches!(self, Self::Member)
    }

    /// Why the endpoint was not counted as a member
    pub fn reason(&self) -> Option<&WardenError> {
        match self {
            Self::Member => None,
            Self::NotMember(e) => Some(e),
        }
    }
}

/// Open a fresh session and try to read the configuration.
///
/// The session is closed on every path.
pub async fn probe(gateway: &dyn ConnectionGateway, request: &ConnectRequest) -> ProbeOutcome {
    let session = match gateway.connect(request).await {
        Ok(session) => session,
        Err(e) => return ProbeOutcome::NotMember(e),
    };

    let result = store::get_config(session.as_ref()).await;
    session.close().await;

    match result {
        Ok(_) => ProbeOutcome::Member,
        Err(e) => ProbeOutcome::NotMember(e),
    }
}

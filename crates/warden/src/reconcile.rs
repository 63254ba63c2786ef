//! One membership reconciliation cycle: fetch, edit, submit.
//!
//! Conflicts are not retried here. A caller running on a fixed interval
//! picks the change up again on its next cycle against a fresh config.

use serde::Serialize;

use warden_common::constants::{FORCED_CHANGE_LIMIT, UNFORCED_CHANGE_LIMIT};
use warden_common::{MembershipChangeRequest, Result};

use crate::editor;
use crate::gateway::AdminSession;
use crate::store;

/// What one reconciliation cycle submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    /// Members removed
    pub removed: usize,
    /// Members added
    pub added: usize,
    /// Version of the submitted configuration
    pub version: u64,
}

/// Changes allowed in a single reconfiguration
pub fn change_limit(force: bool) -> usize {
    if force {
        FORCED_CHANGE_LIMIT
    } else {
        UNFORCED_CHANGE_LIMIT
    }
}

/// Apply one bounded step toward the requested membership and submit it.
///
/// Removals go first. Without `force`, a cycle that removed anything
/// submits no additions.
pub async fn reconcile<S: AsRef<str> + Sync>(
    session: &dyn AdminSession,
    to_add: &[S],
    to_remove: &[S],
    force: bool,
) -> Result<ReconcileOutcome> {
    let mut config = store::get_config(session).await?;
    let limit = change_limit(force);

    let removed = editor::remove_members(&mut config, to_remove, limit);
    let added = if force || removed == 0 {
        editor::add_members(&mut config, to_add, limit)
    } else {
        0
    };

    tracing::debug!(removed = removed, added = added, force = force, "Membership edits computed");

    store::reconfigure(session, &mut config, force).await?;

    Ok(ReconcileOutcome {
        removed,
        added,
        version: config.version,
    })
}

/// [`reconcile`] driven by a discovery snapshot
pub async fn reconcile_request(
    session: &dyn AdminSession,
    request: &MembershipChangeRequest,
) -> Result<ReconcileOutcome> {
    reconcile(session, &request.add, &request.remove, request.force).await
}

//! Membership edits on an in-memory configuration snapshot.
//!
//! No I/O happens here. Both edits are bounded by `limit` so that one
//! reconfiguration never carries more change than the caller allows.

use warden_common::{Member, ReplicaSetConfig};

/// Append members for `addresses`, at most `limit` of them.
///
/// New ids continue from the highest existing id. An address that is
/// already a member is skipped: the discovery snapshot that produced
/// `addresses` may predate a concurrent add.
///
/// Returns the number of members added.
pub fn add_members<S: AsRef<str>>(
    config: &mut ReplicaSetConfig,
    addresses: &[S],
    limit: usize,
) -> usize {
    if addresses.is_empty() {
        return 0;
    }

    let mut next_id = config.max_member_id();
    let mut added = 0;

    for address in addresses {
        if added == limit {
            break;
        }

        let address = address.as_ref();
        if config.contains_host(address) {
            tracing::info!(host = %address, "Host already in replica set, not adding");
            continue;
        }

        next_id += 1;
        config.members.push(Member::new(next_id, address));
        added += 1;
    }

    added
}

/// Remove the first member matching each of `addresses`, at most `limit` of them.
///
/// Returns the number of members removed.
pub fn remove_members<S: AsRef<str>>(
    config: &mut ReplicaSetConfig,
    addresses: &[S],
    limit: usize,
) -> usize {
    if addresses.is_empty() {
        return 0;
    }

    let mut removed = 0;

    for address in addresses {
        if removed == limit {
            break;
        }

        let address = address.as_ref();
        // Position is looked up per address; earlier removals shift indices.
        if let Some(index) = config.members.iter().position(|m| m.host == address) {
            config.members.remove(index);
            removed += 1;
        }
    }

    removed
}

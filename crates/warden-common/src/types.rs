//! Replica set configuration documents shared across Warden components.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Replica set configuration document as returned by `replSetGetConfig`.
///
/// Only the fields membership management touches are typed. Everything
/// else (set name, `protocolVersion`, `settings`, ...) is carried in
/// `extra` so a fetched document can be submitted back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicaSetConfig {
    /// Configuration version, bumped by one on every reconfigure
    pub version: u64,

    /// Set stores cluster metadata rather than user data
    #[serde(rename = "configsvr", default)]
    pub is_config_server: bool,

    /// Current members, in document order
    #[serde(default)]
    pub members: Vec<Member>,

    /// Fields Warden does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReplicaSetConfig {
    pub fn new(version: u64, members: Vec<Member>) -> Self {
        Self {
            version,
            is_config_server: false,
            members,
            extra: Map::new(),
        }
    }

    /// Highest member id, or 0 for an empty member list
    pub fn max_member_id(&self) -> u32 {
        self.members.iter().map(|m| m.id).max().unwrap_or(0)
    }

    /// Check whether a member with this host is present
    pub fn contains_host(&self, host: &str) -> bool {
        self.members.iter().any(|m| m.host == host)
    }

    /// Member hosts, in document order
    pub fn hosts(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.host.as_str()).collect()
    }
}

/// A single replica set member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Member id, never reused within a set
    #[serde(rename = "_id")]
    pub id: u32,

    /// Address in "ip:port" form
    pub host: String,

    /// Per-member options (priority, votes, tags, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Member {
    pub fn new(id: u32, host: impl Into<String>) -> Self {
        Self {
            id,
            host: host.into(),
            extra: Map::new(),
        }
    }
}

/// Desired membership delta produced by an external discovery process.
///
/// This is a snapshot; members may have changed by the time it is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipChangeRequest {
    /// Addresses that should join the set
    #[serde(default)]
    pub add: Vec<String>,

    /// Addresses that should leave the set
    #[serde(default)]
    pub remove: Vec<String>,

    /// Allow large and quorum-less reconfigurations
    #[serde(default)]
    pub force: bool,
}

//! # Warden - Replica Set Membership Core
//!
//! Bootstraps new replica sets and converges the member list of running ones
//! toward the addresses an external discovery process reports.
//!
//! ## Architecture
//! ```text
//! scheduler / CLI
//!       ↓
//! ReplicaSetManager ── probe ──→ ConnectionGateway (driver)
//!       ↓                              ↓
//! init / reconcile ── editor      AdminSession
//!       ↓                              ↑
//!     store ───────────────────────────┘
//! ```
//!
//! Every operation re-fetches the configuration before editing it and relies
//! on the backend's version check to reject submissions built on a stale copy.
//! Several Warden instances may reconcile the same set concurrently.

pub mod editor;
pub mod gateway;
pub mod init;
pub mod manager;
pub mod probe;
pub mod reconcile;
pub mod settings;
pub mod store;

#[cfg(test)]
mod testing;

pub use gateway::{AdminSession, ConnectRequest, ConnectionGateway, TlsMaterial, TlsMaterialCache};
pub use manager::ReplicaSetManager;
pub use probe::ProbeOutcome;
pub use reconcile::ReconcileOutcome;
pub use settings::Settings;
pub use warden_common::{Member, MembershipChangeRequest, ReplicaSetConfig, Result, WardenError};

//! # Warden Common
//!
//! Shared types, errors, and constants used across Warden components.
//!
//! ## Modules
//! - `types` - Replica set configuration documents (ReplicaSetConfig, Member, etc.)
//! - `error` - Common error types
//! - `constants` - Defaults, limits, and admin command names

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Result, WardenError};
pub use types::*;

//! Shared constants for Warden components.

/// Host used when no address is supplied (reachable from a sidecar)
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default database port
pub const DEFAULT_PORT: u16 = 27017;

/// Default database named in the connection URI
pub const DEFAULT_DATABASE: &str = "local";

/// Default authentication database
pub const DEFAULT_AUTH_SOURCE: &str = "admin";

/// Default authentication mechanism when credentials are configured
pub const DEFAULT_AUTH_MECHANISM: &str = "SCRAM-SHA-1";

/// Connection URI scheme
pub const URI_SCHEME: &str = "mongodb";

/// Membership changes per unforced reconfiguration
pub const UNFORCED_CHANGE_LIMIT: usize = 1;

/// Membership changes per forced reconfiguration
pub const FORCED_CHANGE_LIMIT: usize = 50;

/// Reconfiguration attempts after initiating a new set
pub const INIT_RECONFIG_ATTEMPTS: u32 = 20;

/// Delay between bootstrap reconfiguration attempts (milliseconds)
pub const INIT_RECONFIG_INTERVAL_MS: u64 = 500;

/// Admin command names
pub mod commands {
    /// Read the current replica set configuration
    pub const GET_CONFIG: &str = "replSetGetConfig";

    /// Read replica set status
    pub const GET_STATUS: &str = "replSetGetStatus";

    /// Initiate a new single-node replica set
    pub const INITIATE: &str = "replSetInitiate";

    /// Replace the replica set configuration
    pub const RECONFIG: &str = "replSetReconfig";
}

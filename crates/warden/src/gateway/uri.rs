//! Connection URI construction.

use warden_common::constants::{DEFAULT_HOST, URI_SCHEME};

use crate::settings::Settings;

/// Build `mongodb://[user:pass@]host:port/database` for `host`.
///
/// Credentials are percent-encoded. `None` targets the loopback address.
/// A host that already carries a port (`10.0.0.5:27017`, `[::1]:27018`) is
/// used as given; bare IPv6 literals are bracketed before the port is added.
pub fn connection_uri(settings: &Settings, host: Option<&str>) -> String {
    let host = host.unwrap_or(DEFAULT_HOST);
    let endpoint = if has_port(host) {
        host.to_string()
    } else if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, settings.port)
    } else {
        format!("{}:{}", host, settings.port)
    };

    let credentials = match settings.username.as_deref() {
        Some(username) => format!(
            "{}:{}@",
            urlencoding::encode(username),
            urlencoding::encode(settings.password.as_deref().unwrap_or_default())
        ),
        None => String::new(),
    };

    format!(
        "{}://{}{}/{}",
        URI_SCHEME, credentials, endpoint, settings.database
    )
}

fn has_port(host: &str) -> bool {
    let tail = match host.strip_prefix('[') {
        Some(bracketed) => match bracketed.split_once(']') {
            Some((_, rest)) => rest.strip_prefix(':'),
            None => None,
        },
        None => match host.rsplit_once(':') {
            Some((name, port)) if !name.contains(':') => Some(port),
            _ => None,
        },
    };

    tail.is_some_and(|port| port.parse::<u16>().is_ok())
}

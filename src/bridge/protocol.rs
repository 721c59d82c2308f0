// ABOUTME: Wire protocol for the remote shell WebSocket: connection states,
// resize control frames, and endpoint URL construction

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SessionTarget;

/// Connection state of one bridge instance. No buffering or replay state is
/// modeled; bytes are relayed, never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Open,
    Closed,
    Errored,
}

impl ConnectionState {
    pub fn is_open(self) -> bool {
        self == ConnectionState::Open
    }

    /// Terminal states: the socket is gone and only a fresh user-initiated
    /// connect can produce a new one.
    pub fn is_terminal(self) -> bool {
        matches!(self, ConnectionState::Closed | ConnectionState::Errored)
    }
}

/// Structured client→server messages, distinguished from raw terminal data
/// by being JSON text frames. Resize is the only defined type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlMessage {
    Resize { cols: u16, rows: u16 },
}

impl ControlMessage {
    pub fn resize(cols: u16, rows: u16) -> Self {
        ControlMessage::Resize { cols, rows }
    }

    /// Encode as the text frame payload sent on the wire.
    pub fn to_frame(self) -> String {
        // A two-field struct with numeric values cannot fail to serialize
        serde_json::to_string(&self).unwrap_or_default()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("unsupported platform URL scheme in {0}, expected http(s) or ws(s)")]
    UnsupportedScheme(String),
    #[error("platform URL {0} has no host")]
    MissingHost(String),
    #[error("target is not fully specified: empty {0}")]
    IncompleteTarget(&'static str),
}

/// Build the WebSocket endpoint for a target from the platform base URL.
///
/// The scheme maps `http→ws` and `https→wss`; `ws`/`wss` pass through. The
/// path identifies the shell attach point and the shell command and optional
/// OS user travel as url-encoded query parameters:
///
/// `wss://<host>/ws/exec/<project>/<env>/<service>/<container>/?cmd=<shell>&user=<user>`
pub fn endpoint_url(base: &str, target: &SessionTarget) -> Result<String, EndpointError> {
    for (field, value) in [
        ("project", &target.project),
        ("environment", &target.environment),
        ("service", &target.service),
        ("container", &target.container),
        ("shell", &target.shell),
    ] {
        if value.trim().is_empty() {
            return Err(EndpointError::IncompleteTarget(field));
        }
    }

    let (scheme, rest) = split_scheme(base)?;
    let ws_scheme = match scheme {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
    };

    let host = rest
        .split('/')
        .next()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| EndpointError::MissingHost(base.to_string()))?;

    let mut url = format!(
        "{}://{}/ws/exec/{}/{}/{}/{}/?cmd={}",
        ws_scheme,
        host,
        target.project,
        target.environment,
        target.service,
        target.container,
        urlencoding::encode(&target.shell),
    );
    if let Some(user) = target.user.as_deref().filter(|u| !u.trim().is_empty()) {
        url.push_str("&user=");
        url.push_str(&urlencoding::encode(user));
    }

    Ok(url)
}

fn split_scheme(base: &str) -> Result<(&str, &str), EndpointError> {
    base.split_once("://")
        .ok_or_else(|| EndpointError::UnsupportedScheme(base.to_string()))
}

// ABOUTME: Terminal bridge pairing a local display surface with a remote
// WebSocket byte stream: protocol, client task, surface, resize, lifecycle

pub mod client;
pub mod protocol;
pub mod resize;
pub mod session;
pub mod surface;

pub use client::{BridgeEvent, TerminalBridge};
pub use protocol::{endpoint_url, ConnectionState, ControlMessage, EndpointError};
pub use resize::ResizeNotifier;
pub use session::{BridgeSession, SessionError, SessionPhase};
pub use surface::TerminalSurface;

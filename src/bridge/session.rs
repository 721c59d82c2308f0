// ABOUTME: Session lifecycle controller owning one bridge, surface, and notifier
// connecting → open → {closed | errored}; re-entry is a fresh user-initiated session

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::bridge::client::{BridgeEvent, TerminalBridge};
use crate::bridge::protocol::{endpoint_url, EndpointError};
use crate::bridge::resize::ResizeNotifier;
use crate::bridge::surface::TerminalSurface;
use crate::models::SessionTarget;

/// Where one session is in its life. The app models "idle" as the absence
/// of a session; a constructed session starts out connecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Connecting,
    Open,
    Closed,
    Errored,
}

impl SessionPhase {
    pub fn is_open(self) -> bool {
        self == SessionPhase::Open
    }

    /// The socket is gone; only a fresh connect produces a new one.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Closed | SessionPhase::Errored)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot connect: {0}")]
    Endpoint(#[from] EndpointError),
}

/// Owns the socket task, the display surface, and the resize notifier for
/// exactly one connection. The target is immutable here; attaching to a
/// different replica or shell means dropping this session and building a
/// new one, which re-validates the target and endpoint.
pub struct BridgeSession {
    id: Uuid,
    target: SessionTarget,
    phase: SessionPhase,
    bridge: Option<TerminalBridge>,
    events: mpsc::UnboundedReceiver<BridgeEvent>,
    surface: Option<TerminalSurface>,
    notifier: ResizeNotifier,
}

impl BridgeSession {
    /// Validate the target, build the endpoint, and start connecting.
    pub fn connect(
        base_url: &str,
        target: SessionTarget,
        cols: u16,
        rows: u16,
        max_scrollback: usize,
    ) -> Result<Self, SessionError> {
        let url = endpoint_url(base_url, &target)?;
        info!("opening session to {}", url);

        let mut surface = TerminalSurface::new(cols, rows, max_scrollback);
        surface.set_title(target.describe());

        let (bridge, events) = TerminalBridge::connect(url, cols, rows);

        Ok(Self {
            id: Uuid::new_v4(),
            target,
            phase: SessionPhase::Connecting,
            bridge: Some(bridge),
            events,
            surface: Some(surface),
            notifier: ResizeNotifier::after_initial(cols, rows),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn target(&self) -> &SessionTarget {
        &self.target
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether the reconnect control should be enabled again.
    pub fn can_reconnect(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn surface(&self) -> Option<&TerminalSurface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut TerminalSurface> {
        self.surface.as_mut()
    }

    /// Apply pending bridge events to the surface and the phase. Transport
    /// errors and closes end here as styled transcript lines; nothing
    /// propagates further up the view tree.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                BridgeEvent::Opened => {
                    self.phase = SessionPhase::Open;
                }
                BridgeEvent::Output(bytes) => {
                    if let Some(surface) = self.surface.as_mut() {
                        surface.process_output(&bytes);
                    }
                }
                BridgeEvent::Closed { code } => {
                    if let Some(surface) = self.surface.as_mut() {
                        surface.append_notice("Disconnected");
                    }
                    info!("session {} disconnected (code {:?})", self.id, code);
                    self.phase = SessionPhase::Closed;
                }
                BridgeEvent::Error(message) => {
                    // An abnormal close is both an error and a disconnect;
                    // the transcript shows the pair, like a 1006 close
                    if let Some(surface) = self.surface.as_mut() {
                        surface.append_error(&format!("WebSocket error: {}", message));
                        surface.append_notice("Disconnected");
                    }
                    self.phase = SessionPhase::Errored;
                }
            }
        }
    }

    /// Observe the terminal container's geometry. The surface is fitted
    /// even while disconnected; the remote is only notified while open.
    pub async fn observe_geometry(&mut self, cols: u16, rows: u16) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        match self.bridge.as_ref() {
            Some(bridge) => self.notifier.observe(surface, bridge, cols, rows).await,
            None => {
                surface.fit(cols, rows);
                false
            }
        }
    }

    /// Forward raw keystroke bytes. Dropped silently unless the connection
    /// is open; returns whether the bytes were forwarded.
    pub async fn send_input(&self, bytes: Vec<u8>) -> bool {
        match self.bridge.as_ref() {
            Some(bridge) => bridge.send_input(bytes).await,
            None => false,
        }
    }

    /// Release the socket and the surface. Runs the close handshake and the
    /// surface disposal at most once each, on every exit path.
    pub async fn teardown(&mut self) {
        if let Some(bridge) = self.bridge.take() {
            bridge.shutdown().await;
        }
        if self.surface.take().is_some() {
            info!("session {} surface released", self.id);
        }
        if !self.phase.is_terminal() {
            self.phase = SessionPhase::Closed;
        }
    }
}

// ABOUTME: Resize notifier observing the display surface geometry
// Fits the surface first, then tells the remote side about column/row changes

use tracing::debug;

use crate::bridge::client::TerminalBridge;
use crate::bridge::protocol::ControlMessage;
use crate::bridge::surface::TerminalSurface;

/// Watches the surface's geometry and keeps the remote pseudo-terminal in
/// step. One notification per observed change, never while disconnected.
#[derive(Debug, Default)]
pub struct ResizeNotifier {
    notified: Option<(u16, u16)>,
}

impl ResizeNotifier {
    /// A notifier for a session whose initial geometry was already sent in
    /// the on-open resize frame.
    pub fn after_initial(cols: u16, rows: u16) -> Self {
        Self {
            notified: Some((cols, rows)),
        }
    }

    /// Observe the container box. The surface is fitted before the
    /// column/row count is computed, so the notification always reflects
    /// post-layout geometry. Returns whether a resize frame was sent.
    pub async fn observe(
        &mut self,
        surface: &mut TerminalSurface,
        bridge: &TerminalBridge,
        cols: u16,
        rows: u16,
    ) -> bool {
        surface.fit(cols, rows);
        let (cols, rows) = surface.size();

        if self.notified == Some((cols, rows)) {
            return false;
        }
        if !bridge.is_open().await {
            return false;
        }
        if bridge.send_control(ControlMessage::resize(cols, rows)).await {
            debug!("notified remote of resize to {}x{}", cols, rows);
            self.notified = Some((cols, rows));
            true
        } else {
            false
        }
    }
}

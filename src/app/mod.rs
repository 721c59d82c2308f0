// ABOUTME: Application root wiring state, events, and the active session

pub mod events;
pub mod keys;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use keys::encode_key;
pub use state::{AppState, PendingAction, PickerColumn, View};

use crossterm::event::KeyEvent;
use tracing::{info, warn};

use crate::bridge::BridgeSession;

/// The application: UI state plus at most one live bridge session. Idle is
/// modeled as `session == None`; connect builds a session, and switching
/// targets always goes through teardown-and-recreate so the old socket is
/// never mutated in place.
pub struct App {
    pub state: AppState,
    pub session: Option<BridgeSession>,
    geometry: (u16, u16),
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            session: None,
            geometry: (80, 24),
        }
    }

    /// Route one key press: view actions first, then raw forwarding to the
    /// remote shell when the terminal view has the keyboard.
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if let Some(event) = EventHandler::handle_key_event(key, &self.state) {
            match event {
                AppEvent::ScrollUp => self.scroll(|s| s.scroll_up(10)),
                AppEvent::ScrollDown => self.scroll(|s| s.scroll_down(10)),
                AppEvent::ScrollBottom => self.scroll(|s| s.scroll_to_bottom()),
                other => EventHandler::process_event(other, &mut self.state),
            }
            return;
        }

        if self.state.current_view == View::Terminal {
            if let (Some(bytes), Some(session)) = (encode_key(key), self.session.as_ref()) {
                // Dropped by the send gate unless the connection is open
                session.send_input(bytes).await;
            }
        }
    }

    fn scroll(&mut self, op: impl FnOnce(&mut crate::bridge::TerminalSurface)) {
        if let Some(surface) = self.session.as_mut().and_then(BridgeSession::surface_mut) {
            op(surface);
        }
    }

    /// Drive pending actions and absorb bridge events. Called once per
    /// event-loop pass.
    pub async fn tick(&mut self) {
        if let Some(action) = self.state.pending_action.take() {
            match action {
                PendingAction::Connect | PendingAction::Reconnect => {
                    self.end_session(View::Terminal).await;
                    self.start_session();
                }
                PendingAction::Disconnect => {
                    self.end_session(View::TargetPicker).await;
                }
            }
        }

        let terminal_has_focus = self.state.current_view == View::Terminal;
        if let Some(session) = self.session.as_mut() {
            session.drain_events();
            self.state.session_phase = Some(session.phase());
            if let Some(surface) = session.surface_mut() {
                surface.set_focused(terminal_has_focus);
            }
        }
    }

    /// Record the terminal container geometry and let the notifier fit the
    /// surface and inform the remote of changes.
    pub async fn observe_geometry(&mut self, cols: u16, rows: u16) {
        self.geometry = (cols, rows);
        if let Some(session) = self.session.as_mut() {
            session.observe_geometry(cols, rows).await;
        }
    }

    fn start_session(&mut self) {
        let Some(target) = self.state.draft.resolve() else {
            // The connect control is disabled before this can happen
            self.state.status = Some("select a replica and shell first".to_string());
            return;
        };

        let (cols, rows) = self.geometry;
        match BridgeSession::connect(
            &self.state.platform_url,
            target,
            cols,
            rows,
            self.state.scrollback_lines,
        ) {
            Ok(session) => {
                info!("session {} connecting", session.id());
                self.state.session_phase = Some(session.phase());
                self.state.current_view = View::Terminal;
                self.state.status = None;
                self.session = Some(session);
            }
            Err(e) => {
                warn!("connect rejected: {}", e);
                self.state.status = Some(e.to_string());
                self.state.current_view = View::TargetPicker;
            }
        }
    }

    /// Tear down the active session on any exit path, then land on `view`.
    async fn end_session(&mut self, view: View) {
        if let Some(mut session) = self.session.take() {
            session.teardown().await;
        }
        self.state.session_phase = None;
        self.state.current_view = view;
    }

    /// Final cleanup before the process exits.
    pub async fn shutdown(&mut self) {
        self.end_session(View::TargetPicker).await;
    }
}

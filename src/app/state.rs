// ABOUTME: Application state: current view, target draft, and pending actions

use crate::bridge::SessionPhase;
use crate::models::TargetDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Picking a replica and shell; no session exists (the idle state).
    TargetPicker,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerColumn {
    Replicas,
    Shells,
}

/// Session-touching actions deferred to the async tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Connect,
    Disconnect,
    Reconnect,
}

#[derive(Debug)]
pub struct AppState {
    pub platform_url: String,
    pub draft: TargetDraft,
    pub current_view: View,
    pub picker_column: PickerColumn,
    pub maximized: bool,
    pub should_quit: bool,
    /// Mirror of the active session's phase, None while idle.
    pub session_phase: Option<SessionPhase>,
    pub pending_action: Option<PendingAction>,
    pub status: Option<String>,
    pub scrollback_lines: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            platform_url: String::new(),
            draft: TargetDraft::default(),
            current_view: View::TargetPicker,
            picker_column: PickerColumn::Replicas,
            maximized: false,
            should_quit: false,
            session_phase: None,
            pending_action: None,
            status: None,
            scrollback_lines: 10_000,
        }
    }
}

impl AppState {
    pub fn new(platform_url: String, draft: TargetDraft, scrollback_lines: usize) -> Self {
        Self {
            platform_url,
            draft,
            scrollback_lines,
            ..Self::default()
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_maximize(&mut self) {
        self.maximized = !self.maximized;
    }

    /// The connect control is enabled only once the draft names a concrete
    /// container and shell.
    pub fn can_connect(&self) -> bool {
        self.draft.is_complete()
    }

    /// Whether the active session reached a terminal phase, re-enabling the
    /// reconnect control.
    pub fn can_reconnect(&self) -> bool {
        self.session_phase.is_some_and(SessionPhase::is_terminal)
    }

    pub fn session_open(&self) -> bool {
        self.session_phase.is_some_and(SessionPhase::is_open)
    }
}

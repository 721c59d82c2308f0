// ABOUTME: Keyboard event mapping and app action processing

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::state::{AppState, PendingAction, PickerColumn, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    Connect,
    Disconnect,
    Reconnect,
    BackToPicker,
    ToggleMaximize,
    PickerNext,
    PickerPrev,
    PickerSwitchColumn,
    ScrollUp,
    ScrollDown,
    ScrollBottom,
}

pub struct EventHandler;

impl EventHandler {
    /// Map a key event to an app action given the current state. Returns
    /// None for keys that mean nothing here; in the terminal view with an
    /// open session those fall through to raw input forwarding.
    pub fn handle_key_event(key: KeyEvent, state: &AppState) -> Option<AppEvent> {
        match state.current_view {
            View::TargetPicker => Self::handle_picker_keys(key, state),
            View::Terminal => Self::handle_terminal_keys(key, state),
        }
    }

    fn handle_picker_keys(key: KeyEvent, state: &AppState) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::Quit)
            }
            KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::PickerNext),
            KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::PickerPrev),
            KeyCode::Char('h') | KeyCode::Char('l') | KeyCode::Left | KeyCode::Right
            | KeyCode::Tab => Some(AppEvent::PickerSwitchColumn),
            // Connect stays disabled until the target is fully specified
            KeyCode::Enter if state.can_connect() => Some(AppEvent::Connect),
            _ => None,
        }
    }

    fn handle_terminal_keys(key: KeyEvent, state: &AppState) -> Option<AppEvent> {
        // Chords that never reach the remote shell
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => return Some(AppEvent::Disconnect),
            (KeyCode::F(2), _) => return Some(AppEvent::ToggleMaximize),
            (KeyCode::PageUp, KeyModifiers::SHIFT) => return Some(AppEvent::ScrollUp),
            (KeyCode::PageDown, KeyModifiers::SHIFT) => return Some(AppEvent::ScrollDown),
            (KeyCode::End, KeyModifiers::SHIFT) => return Some(AppEvent::ScrollBottom),
            _ => {}
        }

        if state.can_reconnect() {
            // Socket is gone; keys drive the view instead of the shell
            return match key.code {
                KeyCode::Char('r') => Some(AppEvent::Reconnect),
                KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::BackToPicker),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(AppEvent::Quit)
                }
                _ => None,
            };
        }

        // Open or connecting: everything else is shell input. While
        // connecting the send gate drops it before the transport.
        None
    }

    /// Apply a state-only action. Surface-scoped actions (scrolling) and
    /// session-scoped ones (connect/disconnect) are routed by the app: the
    /// former need the surface, the latter become pending async actions.
    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleMaximize => state.toggle_maximize(),
            AppEvent::Connect => state.pending_action = Some(PendingAction::Connect),
            AppEvent::Disconnect => state.pending_action = Some(PendingAction::Disconnect),
            AppEvent::Reconnect => state.pending_action = Some(PendingAction::Reconnect),
            AppEvent::BackToPicker => {
                state.pending_action = Some(PendingAction::Disconnect);
            }
            AppEvent::PickerNext => match state.picker_column {
                PickerColumn::Replicas => state.draft.next_container(),
                PickerColumn::Shells => state.draft.next_shell(),
            },
            AppEvent::PickerPrev => match state.picker_column {
                PickerColumn::Replicas => state.draft.prev_container(),
                PickerColumn::Shells => state.draft.prev_shell(),
            },
            AppEvent::PickerSwitchColumn => {
                state.picker_column = match state.picker_column {
                    PickerColumn::Replicas => PickerColumn::Shells,
                    PickerColumn::Shells => PickerColumn::Replicas,
                };
            }
            AppEvent::ScrollUp | AppEvent::ScrollDown | AppEvent::ScrollBottom => {}
        }
    }
}

// ABOUTME: Unit tests for keyboard event mapping across views and phases

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use termbridge::app::{AppEvent, AppState, EventHandler, PendingAction, PickerColumn, View};
use termbridge::bridge::SessionPhase;
use termbridge::models::TargetDraft;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn picker_state() -> AppState {
    let draft = TargetDraft::new(
        "acme",
        "staging",
        "api",
        vec!["web-0".to_string(), "web-1".to_string()],
        vec!["/bin/bash".to_string()],
        None,
    );
    AppState::new("https://console.example.com".to_string(), draft, 1000)
}

fn terminal_state(phase: SessionPhase) -> AppState {
    let mut state = picker_state();
    state.current_view = View::Terminal;
    state.session_phase = Some(phase);
    state
}

#[test]
fn picker_quit_keys() {
    let state = picker_state();
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Char('q')), &state),
        Some(AppEvent::Quit)
    );
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Esc), &state),
        Some(AppEvent::Quit)
    );
    assert_eq!(
        EventHandler::handle_key_event(
            key_with(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &state
        ),
        Some(AppEvent::Quit)
    );
}

#[test]
fn picker_navigation_keys() {
    let state = picker_state();
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Char('j')), &state),
        Some(AppEvent::PickerNext)
    );
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Up), &state),
        Some(AppEvent::PickerPrev)
    );
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Tab), &state),
        Some(AppEvent::PickerSwitchColumn)
    );
}

#[test]
fn connect_enabled_only_with_complete_target() {
    let state = picker_state();
    assert!(state.can_connect());
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Enter), &state),
        Some(AppEvent::Connect)
    );

    // No replicas: the connect control stays disabled
    let mut incomplete = picker_state();
    incomplete.draft = TargetDraft::new(
        "acme",
        "staging",
        "api",
        vec![],
        vec!["/bin/bash".to_string()],
        None,
    );
    assert!(!incomplete.can_connect());
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Enter), &incomplete),
        None
    );
}

#[test]
fn terminal_open_forwards_plain_keys() {
    let state = terminal_state(SessionPhase::Open);
    // Plain characters map to no app event so they reach the shell
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Char('a')), &state),
        None
    );
    assert_eq!(EventHandler::handle_key_event(key(KeyCode::Enter), &state), None);
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Char('q')), &state),
        None
    );
}

#[test]
fn terminal_control_chords() {
    let state = terminal_state(SessionPhase::Open);
    assert_eq!(
        EventHandler::handle_key_event(
            key_with(KeyCode::Char('q'), KeyModifiers::CONTROL),
            &state
        ),
        Some(AppEvent::Disconnect)
    );
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::F(2)), &state),
        Some(AppEvent::ToggleMaximize)
    );
    assert_eq!(
        EventHandler::handle_key_event(key_with(KeyCode::PageUp, KeyModifiers::SHIFT), &state),
        Some(AppEvent::ScrollUp)
    );
}

#[test]
fn terminal_after_close_enables_reconnect_keys() {
    for phase in [SessionPhase::Closed, SessionPhase::Errored] {
        let state = terminal_state(phase);
        assert!(state.can_reconnect());
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('r')), &state),
            Some(AppEvent::Reconnect)
        );
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Esc), &state),
            Some(AppEvent::BackToPicker)
        );
        // Plain input no longer goes anywhere near the shell
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('a')), &state),
            None
        );
    }
}

#[test]
fn terminal_connecting_swallows_plain_keys() {
    let state = terminal_state(SessionPhase::Connecting);
    assert!(!state.can_reconnect());
    // Mapped to nothing; the bridge send gate drops them before the wire
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Char('r')), &state),
        None
    );
}

#[test]
fn process_connect_sets_pending_action() {
    let mut state = picker_state();
    EventHandler::process_event(AppEvent::Connect, &mut state);
    assert_eq!(state.pending_action, Some(PendingAction::Connect));

    EventHandler::process_event(AppEvent::Disconnect, &mut state);
    assert_eq!(state.pending_action, Some(PendingAction::Disconnect));

    EventHandler::process_event(AppEvent::Reconnect, &mut state);
    assert_eq!(state.pending_action, Some(PendingAction::Reconnect));
}

#[test]
fn process_picker_navigation_moves_selection() {
    let mut state = picker_state();
    assert_eq!(state.draft.selected_container, Some(0));

    EventHandler::process_event(AppEvent::PickerNext, &mut state);
    assert_eq!(state.draft.selected_container, Some(1));

    // Wraps around
    EventHandler::process_event(AppEvent::PickerNext, &mut state);
    assert_eq!(state.draft.selected_container, Some(0));

    EventHandler::process_event(AppEvent::PickerSwitchColumn, &mut state);
    assert_eq!(state.picker_column, PickerColumn::Shells);
    EventHandler::process_event(AppEvent::PickerNext, &mut state);
    assert_eq!(state.draft.selected_shell, Some(0));
}

#[test]
fn process_toggle_maximize() {
    let mut state = picker_state();
    assert!(!state.maximized);
    EventHandler::process_event(AppEvent::ToggleMaximize, &mut state);
    assert!(state.maximized);
    EventHandler::process_event(AppEvent::ToggleMaximize, &mut state);
    assert!(!state.maximized);
}

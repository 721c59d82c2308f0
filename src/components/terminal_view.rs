// ABOUTME: Terminal view: renders the display surface with a status line,
// panel or fullscreen depending on the maximize toggle

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::AppState;
use crate::bridge::{BridgeSession, SessionPhase};

pub struct TerminalViewComponent;

impl TerminalViewComponent {
    /// Column/row count of the surface's drawable box for a frame of this
    /// size. Render and geometry observation both derive from here so the
    /// resize notifier always sees post-layout numbers.
    pub fn inner_geometry(frame_area: Rect, maximized: bool) -> (u16, u16) {
        let status_rows = if maximized { 0 } else { 1 };
        let cols = frame_area.width.saturating_sub(2).max(1);
        let rows = frame_area
            .height
            .saturating_sub(2 + status_rows)
            .max(1);
        (cols, rows)
    }

    pub fn render(
        frame: &mut Frame<'_>,
        area: Rect,
        state: &AppState,
        session: Option<&BridgeSession>,
    ) {
        let surface_area = if state.maximized {
            area
        } else {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(3)])
                .split(area);
            Self::render_status(frame, chunks[0], state, session);
            chunks[1]
        };

        match session.and_then(BridgeSession::surface) {
            Some(surface) => frame.render_widget(surface, surface_area),
            None => {
                let placeholder = Paragraph::new("no active session")
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(placeholder, surface_area);
            }
        }
    }

    fn render_status(
        frame: &mut Frame<'_>,
        area: Rect,
        state: &AppState,
        session: Option<&BridgeSession>,
    ) {
        let (phase_label, phase_color) = match state.session_phase {
            Some(SessionPhase::Connecting) => ("connecting", Color::Yellow),
            Some(SessionPhase::Open) => ("open", Color::Green),
            Some(SessionPhase::Closed) => ("closed", Color::Gray),
            Some(SessionPhase::Errored) => ("error", Color::Red),
            None => ("idle", Color::DarkGray),
        };

        let hints = match state.session_phase {
            Some(SessionPhase::Open) => "Ctrl+Q disconnect · F2 maximize · Shift+PgUp scroll",
            Some(SessionPhase::Closed) | Some(SessionPhase::Errored) => {
                "r reconnect · q back · F2 maximize"
            }
            _ => "Ctrl+Q cancel",
        };

        let target = session
            .map(|s| s.target().describe())
            .unwrap_or_default();

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", phase_label),
                Style::default().fg(phase_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(target, Style::default().fg(Color::White)),
            Span::styled(format!("   {}", hints), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

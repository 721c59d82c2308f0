// ABOUTME: Target picker view: replica and shell selection before connecting

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::state::{AppState, PickerColumn};

pub struct TargetPickerComponent;

impl TargetPickerComponent {
    pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(3),
            ])
            .split(area);

        Self::render_header(frame, chunks[0], state);
        Self::render_columns(frame, chunks[1], state);
        Self::render_footer(frame, chunks[2], state);
    }

    fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let draft = &state.draft;
        let line = Line::from(vec![
            Span::styled(
                format!("{} / {} / {}", draft.project, draft.environment, draft.service),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   {}", state.platform_url),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let block = Block::default().title("Attach shell").borders(Borders::ALL);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_columns(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        Self::render_list(
            frame,
            columns[0],
            "Replicas",
            &state.draft.containers,
            state.draft.selected_container,
            state.picker_column == PickerColumn::Replicas,
        );
        Self::render_list(
            frame,
            columns[1],
            "Shells",
            &state.draft.shells,
            state.draft.selected_shell,
            state.picker_column == PickerColumn::Shells,
        );
    }

    fn render_list(
        frame: &mut Frame<'_>,
        area: Rect,
        title: &str,
        entries: &[String],
        selected: Option<usize>,
        focused: bool,
    ) {
        let border = if focused { Color::Cyan } else { Color::Gray };
        let items: Vec<ListItem> = if entries.is_empty() {
            vec![ListItem::new(Span::styled(
                "  (none available)",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            entries.iter().map(|e| ListItem::new(e.as_str())).collect()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(selected);
        }
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_footer(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
        let mut spans = vec![Span::styled(
            match &state.draft.user {
                Some(user) => format!("user: {}   ", user),
                None => String::from("user: (container default)   "),
            },
            Style::default().fg(Color::Gray),
        )];

        if let Some(status) = &state.status {
            spans.push(Span::styled(
                status.clone(),
                Style::default().fg(Color::Red),
            ));
        } else if state.can_connect() {
            spans.push(Span::styled(
                "Enter connect · Tab switch column · j/k move · q quit",
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled(
                "select a replica and shell to enable connect",
                Style::default().fg(Color::Yellow),
            ));
        }

        let block = Block::default().borders(Borders::ALL);
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

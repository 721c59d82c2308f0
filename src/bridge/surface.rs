// ABOUTME: Display surface for remote shell output, vt100-backed ratatui widget
// Output bytes are written verbatim; only the vt100 layer interprets them

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Local pseudo-terminal display surface. Owns the vt100 parser, the scroll
/// position, and the chrome (title, focus border). Exactly one bridge writes
/// to a surface; geometry observation is scoped to it alone.
pub struct TerminalSurface {
    parser: vt100::Parser,
    cols: u16,
    rows: u16,
    title: String,
    focused: bool,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16, max_scrollback: usize) -> Self {
        Self {
            parser: vt100::Parser::new(rows.max(1), cols.max(1), max_scrollback),
            cols: cols.max(1),
            rows: rows.max(1),
            title: String::from("Terminal"),
            focused: false,
        }
    }

    /// Write remote output to the surface, verbatim. New output snaps the
    /// view back to the live screen.
    pub fn process_output(&mut self, bytes: &[u8]) {
        self.parser.process(bytes);
        if self.parser.screen().scrollback() != 0 {
            self.parser.set_scrollback(0);
        }
    }

    /// Append a visibly styled error line to the transcript.
    pub fn append_error(&mut self, message: &str) {
        let styled = format!("\r\n\x1b[1;31m{}\x1b[0m\r\n", message);
        self.process_output(styled.as_bytes());
    }

    /// Append a visibly styled status line (e.g. "Disconnected").
    pub fn append_notice(&mut self, message: &str) {
        let styled = format!("\r\n\x1b[1;33m{}\x1b[0m\r\n", message);
        self.process_output(styled.as_bytes());
    }

    /// Fit the surface to its container. Must run before the column/row
    /// count is reported anywhere, so geometry is never stale.
    pub fn fit(&mut self, cols: u16, rows: u16) {
        let (cols, rows) = (cols.max(1), rows.max(1));
        if (cols, rows) == (self.cols, self.rows) {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.parser.set_size(rows, cols);
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        // vt100 clamps to the available scrollback
        let current = self.parser.screen().scrollback();
        self.parser.set_scrollback(current.saturating_add(lines));
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let current = self.parser.screen().scrollback();
        self.parser.set_scrollback(current.saturating_sub(lines));
    }

    pub fn scroll_to_bottom(&mut self) {
        self.parser.set_scrollback(0);
    }

    pub fn is_at_bottom(&self) -> bool {
        self.parser.screen().scrollback() == 0
    }

    /// Text content of one visible row, trailing blanks stripped.
    pub fn line(&self, row: u16) -> Option<String> {
        let screen = self.parser.screen();
        let (rows, cols) = screen.size();
        if row >= rows {
            return None;
        }
        let mut text = String::new();
        for col in 0..cols {
            match screen.cell(row, col) {
                Some(cell) if !cell.contents().is_empty() => text.push_str(&cell.contents()),
                _ => text.push(' '),
            }
        }
        Some(text.trim_end().to_string())
    }

    /// Whether any visible row equals `needle` after trimming.
    pub fn contains_line(&self, needle: &str) -> bool {
        let (rows, _) = self.parser.screen().size();
        (0..rows).any(|row| self.line(row).as_deref() == Some(needle))
    }

    /// Whether any visible row contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        let (rows, _) = self.parser.screen().size();
        (0..rows).any(|row| self.line(row).is_some_and(|l| l.contains(needle)))
    }

    fn screen_text(&self) -> Text<'static> {
        let screen = self.parser.screen();
        let (rows, cols) = screen.size();
        let mut lines = Vec::with_capacity(rows as usize);

        for row in 0..rows {
            let mut spans = Vec::new();
            let mut run_style = Style::default();
            let mut run = String::new();

            for col in 0..cols {
                let (contents, style) = match screen.cell(row, col) {
                    Some(cell) if !cell.contents().is_empty() => {
                        (cell.contents(), cell_style(cell))
                    }
                    _ => (String::from(" "), Style::default()),
                };
                if style != run_style && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = style;
                run.push_str(&contents);
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, run_style));
            }
            lines.push(Line::from(spans));
        }

        Text::from(lines)
    }
}

fn cell_style(cell: &vt100::Cell) -> Style {
    let mut style = Style::default();

    style = match cell.fgcolor() {
        vt100::Color::Default => style,
        vt100::Color::Idx(idx) => style.fg(indexed_color(idx)),
        vt100::Color::Rgb(r, g, b) => style.fg(Color::Rgb(r, g, b)),
    };
    style = match cell.bgcolor() {
        vt100::Color::Default => style,
        vt100::Color::Idx(idx) => style.bg(indexed_color(idx)),
        vt100::Color::Rgb(r, g, b) => style.bg(Color::Rgb(r, g, b)),
    };

    if cell.bold() {
        style = style.add_modifier(Modifier::BOLD);
    }
    if cell.italic() {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if cell.underline() {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if cell.inverse() {
        style = style.add_modifier(Modifier::REVERSED);
    }

    style
}

fn indexed_color(idx: u8) -> Color {
    match idx {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        7 => Color::Gray,
        8 => Color::DarkGray,
        9 => Color::LightRed,
        10 => Color::LightGreen,
        11 => Color::LightYellow,
        12 => Color::LightBlue,
        13 => Color::LightMagenta,
        14 => Color::LightCyan,
        _ => Color::White,
    }
}

impl Widget for &TerminalSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused { Color::Cyan } else { Color::Gray };
        let block = Block::default()
            .title(self.title.clone())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.screen_text()).render(inner, buf);

        let screen = self.parser.screen();
        let scrollback = screen.scrollback();

        // Cursor, only when viewing the live screen
        if scrollback == 0 && !screen.hide_cursor() {
            let (cur_row, cur_col) = screen.cursor_position();
            let x = inner.left() + cur_col.min(inner.width.saturating_sub(1));
            let y = inner.top() + cur_row.min(inner.height.saturating_sub(1));
            if x < inner.right() && y < inner.bottom() {
                buf.get_mut(x, y)
                    .set_style(Style::default().add_modifier(Modifier::REVERSED));
            }
        }

        if scrollback > 0 {
            let indicator = format!(" ▲ {} lines up ", scrollback);
            let start_x = area.left() + 2;
            for (i, ch) in indicator.chars().enumerate() {
                let x = start_x + i as u16;
                if x < area.right().saturating_sub(2) {
                    buf.get_mut(x, area.top())
                        .set_symbol(&ch.to_string())
                        .set_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
                }
            }
        }
    }
}

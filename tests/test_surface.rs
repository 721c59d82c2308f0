// ABOUTME: Unit tests for the vt100-backed display surface

use pretty_assertions::assert_eq;
use termbridge::bridge::TerminalSurface;

#[test]
fn output_lands_on_its_own_line() {
    let mut surface = TerminalSurface::new(80, 24, 100);
    surface.process_output(b"hello\r\n");
    assert!(surface.contains_line("hello"));
    assert_eq!(surface.line(0), Some("hello".to_string()));
}

#[test]
fn output_is_written_in_delivery_order() {
    let mut surface = TerminalSurface::new(80, 24, 100);
    surface.process_output(b"one\r\n");
    surface.process_output(b"two\r\n");
    assert_eq!(surface.line(0), Some("one".to_string()));
    assert_eq!(surface.line(1), Some("two".to_string()));
}

#[test]
fn ansi_colors_are_interpreted_not_displayed() {
    let mut surface = TerminalSurface::new(80, 24, 100);
    surface.process_output(b"\x1b[31mred\x1b[0m\r\n");
    assert!(surface.contains_line("red"));
    assert!(!surface.contains_text("\x1b"));
}

#[test]
fn diagnostics_append_styled_lines() {
    let mut surface = TerminalSurface::new(80, 24, 100);
    surface.process_output(b"$ ");
    surface.append_error("WebSocket error: connection refused");
    surface.append_notice("Disconnected");

    assert!(surface.contains_text("WebSocket error: connection refused"));
    assert!(surface.contains_line("Disconnected"));
}

#[test]
fn fit_changes_reported_size() {
    let mut surface = TerminalSurface::new(80, 24, 100);
    assert_eq!(surface.size(), (80, 24));
    surface.fit(120, 40);
    assert_eq!(surface.size(), (120, 40));
    // Fitting to the same box is a no-op
    surface.fit(120, 40);
    assert_eq!(surface.size(), (120, 40));
}

#[test]
fn new_output_snaps_scroll_to_bottom() {
    let mut surface = TerminalSurface::new(80, 4, 100);
    for i in 0..20 {
        surface.process_output(format!("line{}\r\n", i).as_bytes());
    }
    surface.scroll_up(5);
    assert!(!surface.is_at_bottom());

    surface.process_output(b"fresh\r\n");
    assert!(surface.is_at_bottom());
}

#[test]
fn scroll_down_returns_to_bottom() {
    let mut surface = TerminalSurface::new(80, 4, 100);
    for i in 0..20 {
        surface.process_output(format!("line{}\r\n", i).as_bytes());
    }
    surface.scroll_up(8);
    surface.scroll_down(3);
    surface.scroll_down(5);
    assert!(surface.is_at_bottom());
}

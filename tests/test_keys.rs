// ABOUTME: Unit tests for keyboard-to-terminal byte encoding

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use termbridge::app::encode_key;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

#[test]
fn plain_characters_pass_through() {
    assert_eq!(encode_key(key(KeyCode::Char('a'))), Some(vec![b'a']));
    assert_eq!(encode_key(key(KeyCode::Char('Z'))), Some(vec![b'Z']));
    // Multibyte characters keep their UTF-8 encoding
    assert_eq!(
        encode_key(key(KeyCode::Char('é'))),
        Some("é".as_bytes().to_vec())
    );
}

#[test]
fn control_characters() {
    assert_eq!(
        encode_key(key_with(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(vec![0x03])
    );
    assert_eq!(
        encode_key(key_with(KeyCode::Char('D'), KeyModifiers::CONTROL)),
        Some(vec![0x04])
    );
}

#[test]
fn alt_prefixes_escape() {
    assert_eq!(
        encode_key(key_with(KeyCode::Char('f'), KeyModifiers::ALT)),
        Some(vec![0x1b, b'f'])
    );
}

#[test]
fn editing_keys() {
    assert_eq!(encode_key(key(KeyCode::Enter)), Some(vec![b'\r']));
    assert_eq!(encode_key(key(KeyCode::Tab)), Some(vec![b'\t']));
    assert_eq!(encode_key(key(KeyCode::Backspace)), Some(vec![0x7f]));
    assert_eq!(encode_key(key(KeyCode::Esc)), Some(vec![0x1b]));
}

#[test]
fn cursor_keys_use_csi_sequences() {
    assert_eq!(encode_key(key(KeyCode::Up)), Some(vec![0x1b, b'[', b'A']));
    assert_eq!(encode_key(key(KeyCode::Down)), Some(vec![0x1b, b'[', b'B']));
    assert_eq!(encode_key(key(KeyCode::Right)), Some(vec![0x1b, b'[', b'C']));
    assert_eq!(encode_key(key(KeyCode::Left)), Some(vec![0x1b, b'[', b'D']));
    assert_eq!(
        encode_key(key(KeyCode::Delete)),
        Some(vec![0x1b, b'[', b'3', b'~'])
    );
}

#[test]
fn function_keys() {
    assert_eq!(encode_key(key(KeyCode::F(1))), Some(vec![0x1b, b'O', b'P']));
    assert_eq!(
        encode_key(key(KeyCode::F(5))),
        Some(vec![0x1b, b'[', b'1', b'5', b'~'])
    );
    assert_eq!(encode_key(key(KeyCode::F(13))), None);
}

#[test]
fn unmapped_keys_produce_nothing() {
    assert_eq!(encode_key(key(KeyCode::CapsLock)), None);
    assert_eq!(encode_key(key(KeyCode::NumLock)), None);
}

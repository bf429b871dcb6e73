//! Key mapping from terminal events to controller inputs.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::KeyInput;

fn is_down_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S')
    )
}

/// Map a keyboard event to a controller input.
///
/// Down is the only key whose auto-repeat and release matter: repeats keep
/// the manual drop going, release hands control back to gravity. Every other
/// key acts once per press.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyInput> {
    if is_down_key(key.code) {
        return match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => Some(KeyInput::DownPressed),
            KeyEventKind::Release => Some(KeyInput::DownReleased),
        };
    }

    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(KeyInput::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(KeyInput::Right)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(KeyInput::Rotate)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

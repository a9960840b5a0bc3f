//! Keyboard input mapping.
//!
//! Keys (no modifier, case-insensitive for letters):
//! - `0`-`5`: select gesture class
//! - `p`: toggle preview
//! - space: capture
//! - `q`: quit (Ctrl+C also quits, since raw mode swallows SIGINT)

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::gesture::GestureClass;

/// What a key press asks the collector to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectClass(GestureClass),
    TogglePreview,
    Capture,
    Quit,
}

/// Map a key event to an action, or `None` for keys with no binding.
pub fn action_for_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    // Key releases and repeats are reported on some platforms; act on presses only.
    if kind != KeyEventKind::Press {
        return None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Quit),
            _ => None,
        };
    }

    if modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SUPER) {
        return None;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::TogglePreview),
        KeyCode::Char(' ') => Some(Action::Capture),
        KeyCode::Char(c) => GestureClass::from_digit(c).map(Action::SelectClass),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_select_class() {
        assert_eq!(
            action_for_key(key(KeyCode::Char('0'))),
            Some(Action::SelectClass(GestureClass::Zero))
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('2'))),
            Some(Action::SelectClass(GestureClass::Two))
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('5'))),
            Some(Action::SelectClass(GestureClass::Five))
        );
    }

    #[test]
    fn test_digits_above_five_are_unbound() {
        for c in ['6', '7', '8', '9'] {
            assert_eq!(action_for_key(key(KeyCode::Char(c))), None);
        }
    }

    #[test]
    fn test_space_captures() {
        assert_eq!(action_for_key(key(KeyCode::Char(' '))), Some(Action::Capture));
    }

    #[test]
    fn test_p_toggles_preview() {
        assert_eq!(
            action_for_key(key(KeyCode::Char('p'))),
            Some(Action::TogglePreview)
        );
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT)),
            Some(Action::TogglePreview)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for_key(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(action_for_key(key(KeyCode::Char('x'))), None);
        assert_eq!(action_for_key(key(KeyCode::Enter)), None);
        assert_eq!(action_for_key(key(KeyCode::Esc)), None);
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::ALT)),
            None
        );
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let event = KeyEvent::new_with_kind(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(action_for_key(event), None);
    }
}

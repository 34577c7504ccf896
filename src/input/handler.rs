use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

/// Longest accepted player name
pub const MAX_NAME_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Restart,
    Quit,
    TogglePause,
    /// Playback speed preset, 1 (slowest) to 4
    SetSpeed(u8),
    None,
}

/// Edits made on the name entry screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEdit {
    Push(char),
    Pop,
    Submit,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if is_ctrl_c(&key) {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::GameAction(Action::Move(Direction::Up)),
            KeyCode::Down => KeyAction::GameAction(Action::Move(Direction::Down)),
            KeyCode::Left => KeyAction::GameAction(Action::Move(Direction::Left)),
            KeyCode::Right => KeyAction::GameAction(Action::Move(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::GameAction(Action::Move(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::GameAction(Action::Move(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::GameAction(Action::Move(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::GameAction(Action::Move(Direction::Right))
            }

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => KeyAction::Restart,
            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Char(c @ '1'..='4') => KeyAction::SetSpeed(c as u8 - b'0'),

            _ => KeyAction::None,
        }
    }

    /// Keys on the name entry screen: letters and spaces type, Backspace
    /// deletes, Enter confirms, Esc quits.
    pub fn handle_name_key(&self, key: KeyEvent) -> NameEdit {
        if is_ctrl_c(&key) {
            return NameEdit::Quit;
        }

        match key.code {
            KeyCode::Char(c) if c.is_alphabetic() || c == ' ' => NameEdit::Push(c),
            KeyCode::Backspace => NameEdit::Pop,
            KeyCode::Enter => NameEdit::Submit,
            KeyCode::Esc => NameEdit::Quit,
            _ => NameEdit::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Apply a name edit, returning true once the name is confirmed
pub fn apply_name_edit(name: &mut String, edit: &NameEdit) -> bool {
    match edit {
        NameEdit::Push(c) if name.chars().count() < MAX_NAME_LEN => {
            name.push(*c);
            false
        }
        NameEdit::Pop => {
            name.pop();
            false
        }
        NameEdit::Submit => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(key(KeyCode::Up)),
            KeyAction::GameAction(Action::Move(Direction::Up))
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Down)),
            KeyAction::GameAction(Action::Move(Direction::Down))
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Left)),
            KeyAction::GameAction(Action::Move(Direction::Left))
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Right)),
            KeyAction::GameAction(Action::Move(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('w'))),
            KeyAction::GameAction(Action::Move(Direction::Up))
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('a'))),
            KeyAction::GameAction(Action::Move(Direction::Left))
        );

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::GameAction(Action::Move(Direction::Up))
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(key(KeyCode::Esc)), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_restart_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(key(KeyCode::Enter)), KeyAction::Restart);
        let r_upper = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(r_upper), KeyAction::Restart);
    }

    #[test]
    fn test_playback_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char(' '))),
            KeyAction::TogglePause
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('3'))),
            KeyAction::SetSpeed(3)
        );
        assert_eq!(handler.handle_key_event(key(KeyCode::Char('5'))), KeyAction::None);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key_event(key(KeyCode::Char('x'))), KeyAction::None);
    }

    #[test]
    fn test_name_entry() {
        let handler = InputHandler::new();
        let mut name = String::new();

        for c in ['A', 'd', 'a', ' ', '7'] {
            let edit = handler.handle_name_key(key(KeyCode::Char(c)));
            assert!(!apply_name_edit(&mut name, &edit));
        }
        assert_eq!(name, "Ada ");

        let edit = handler.handle_name_key(key(KeyCode::Backspace));
        apply_name_edit(&mut name, &edit);
        assert_eq!(name, "Ada");

        let edit = handler.handle_name_key(key(KeyCode::Enter));
        assert_eq!(edit, NameEdit::Submit);
        assert!(apply_name_edit(&mut name, &edit));
    }

    #[test]
    fn test_name_length_capped() {
        let mut name = "x".repeat(MAX_NAME_LEN);
        apply_name_edit(&mut name, &NameEdit::Push('y'));
        assert_eq!(name.len(), MAX_NAME_LEN);
    }
}

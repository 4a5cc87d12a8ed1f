use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Turn;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Turn),
    Restart,
    TogglePause,
    /// Playback speed preset, 1 (slowest) to 4
    Speed(u8),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Turns are relative to the snake's heading
            KeyCode::Left => KeyAction::Turn(Turn::Left),
            KeyCode::Right => KeyAction::Turn(Turn::Right),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Turn::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Turn::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Char(c @ '1'..='4') => KeyAction::Speed(c as u8 - b'0'),

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Left), KeyAction::Turn(Turn::Left));
        assert_eq!(press(KeyCode::Right), KeyAction::Turn(Turn::Right));
        // Absolute directions have no meaning for a relative turn.
        assert_eq!(press(KeyCode::Up), KeyAction::None);
        assert_eq!(press(KeyCode::Down), KeyAction::None);
    }

    #[test]
    fn test_letter_keys() {
        assert_eq!(press(KeyCode::Char('a')), KeyAction::Turn(Turn::Left));
        assert_eq!(press(KeyCode::Char('D')), KeyAction::Turn(Turn::Right));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('Q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_playback_keys() {
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Char('1')), KeyAction::Speed(1));
        assert_eq!(press(KeyCode::Char('4')), KeyAction::Speed(4));
        assert_eq!(press(KeyCode::Char('5')), KeyAction::None);
    }
}

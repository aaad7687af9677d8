use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;
use crate::session::SessionEvent;

/// Maps terminal key presses to session events
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> Option<SessionEvent> {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(SessionEvent::Quit);
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Some(SessionEvent::Move(Direction::Up)),
            KeyCode::Down => Some(SessionEvent::Move(Direction::Down)),
            KeyCode::Left => Some(SessionEvent::Move(Direction::Left)),
            KeyCode::Right => Some(SessionEvent::Move(Direction::Right)),

            // Controls
            KeyCode::Char('a') | KeyCode::Char('A') => Some(SessionEvent::ToggleAutopilot),
            KeyCode::Enter => Some(SessionEvent::Start),
            KeyCode::Char(' ') => Some(SessionEvent::Acknowledge),
            KeyCode::Esc => Some(SessionEvent::Abort),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(SessionEvent::Quit),

            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

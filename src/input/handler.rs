use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A control the player holds down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Jump,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Control(Control),
    Start,
    Restart,
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
            // Movement - arrow keys and space
            KeyCode::Left => KeyAction::Control(Control::Left),
            KeyCode::Right => KeyAction::Control(Control::Right),
            KeyCode::Char(' ') | KeyCode::Up => KeyAction::Control(Control::Jump),

            // Movement - A/D
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Control(Control::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Control(Control::Right),

            // Screens
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => KeyAction::Start,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

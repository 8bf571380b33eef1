use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What keystrokes mean right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Tables and views.
    Navigate,
    /// A form has focus.
    Typing,
    /// A yes/no prompt is open.
    Confirm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Quit,
    Back,
    Help,
    NextView,
    /// Jump to a navigation tab by index.
    JumpTo(usize),
    NavigateUp,
    NavigateDown,
    PrevPage,
    NextPage,
    Select,
    New,
    Edit,
    Delete,
    AddToCampaign,
    RemoveFromCampaign,
    Reload,
    SignOut,
    // form input
    InputChar(char),
    Backspace,
    NextField,
    PrevField,
    CyclePrev,
    CycleNext,
    Submit,
    ToggleAuthMode,
    None,
}

#[derive(Debug, Default)]
pub struct KeyHandler;

impl KeyHandler {
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `tick` for a terminal event. Returns `KeyAction::None` on timeout.
    pub fn next_action(&mut self, mode: InputMode, tick: Duration) -> color_eyre::Result<KeyAction> {
        if !event::poll(tick)? {
            return Ok(KeyAction::None);
        }
        match event::read()? {
            // it's important to check KeyEventKind::Press to avoid handling key release events
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.on_key_event(key, mode)),
            _ => Ok(KeyAction::None),
        }
    }

    pub fn on_key_event(&mut self, key: KeyEvent, mode: InputMode) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return KeyAction::Quit;
        }
        match mode {
            InputMode::Navigate => Self::navigate_key(key),
            InputMode::Typing => Self::typing_key(key),
            InputMode::Confirm => Self::confirm_key(key),
        }
    }

    fn navigate_key(key: KeyEvent) -> KeyAction {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => KeyAction::Back,
            (_, KeyCode::Char('q')) => KeyAction::Quit,
            (_, KeyCode::Char('?')) => KeyAction::Help,
            (_, KeyCode::Tab) => KeyAction::NextView,
            (_, KeyCode::Char(c @ '1'..='3')) => KeyAction::JumpTo(c as usize - '1' as usize),
            (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => KeyAction::NavigateUp,
            (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => KeyAction::NavigateDown,
            (KeyModifiers::NONE, KeyCode::Left | KeyCode::Char('h')) | (_, KeyCode::PageUp) => {
                KeyAction::PrevPage
            }
            (KeyModifiers::NONE, KeyCode::Right | KeyCode::Char('l')) | (_, KeyCode::PageDown) => {
                KeyAction::NextPage
            }
            (_, KeyCode::Enter) => KeyAction::Select,
            (KeyModifiers::NONE, KeyCode::Char('n')) => KeyAction::New,
            (KeyModifiers::NONE, KeyCode::Char('e')) => KeyAction::Edit,
            (KeyModifiers::NONE, KeyCode::Char('d')) => KeyAction::Delete,
            (KeyModifiers::NONE, KeyCode::Char('a')) => KeyAction::AddToCampaign,
            (KeyModifiers::NONE, KeyCode::Char('r')) => KeyAction::RemoveFromCampaign,
            (_, KeyCode::F(5)) | (_, KeyCode::Char('R')) => KeyAction::Reload,
            (KeyModifiers::NONE, KeyCode::Char('o')) => KeyAction::SignOut,
            _ => KeyAction::None,
        }
    }

    fn typing_key(key: KeyEvent) -> KeyAction {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => KeyAction::Back,
            (_, KeyCode::Enter) => KeyAction::Submit,
            (_, KeyCode::BackTab) | (_, KeyCode::Up) => KeyAction::PrevField,
            (_, KeyCode::Tab) | (_, KeyCode::Down) => KeyAction::NextField,
            (_, KeyCode::Left) => KeyAction::CyclePrev,
            (_, KeyCode::Right) => KeyAction::CycleNext,
            (_, KeyCode::Backspace) => KeyAction::Backspace,
            (m, KeyCode::Char('n') | KeyCode::Char('N')) if m.contains(KeyModifiers::CONTROL) => {
                KeyAction::ToggleAuthMode
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => KeyAction::InputChar(c),
            _ => KeyAction::None,
        }
    }

    fn confirm_key(key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Submit,
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => KeyAction::Back,
            KeyCode::Char('q') => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

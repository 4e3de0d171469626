//! Dashboard key handling
//!
//! Maps key presses to state changes and to actions the app performs

use super::state::DashboardState;
use crate::snapshot::actions;
use crossterm::event::KeyCode;

/// Side effect requested by a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    Refresh,
    Dispatch { device: String, action: String },
}

impl DashboardState {
    /// Handles a key press. While a notice is pending only dismissal and quit
    /// are accepted.
    pub fn handle_key(&mut self, code: KeyCode) -> KeyAction {
        if matches!(code, KeyCode::Esc | KeyCode::Char('q')) {
            return KeyAction::Quit;
        }

        if self.current_notice().is_some() {
            if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                self.dismiss_notice();
            }
            return KeyAction::None;
        }

        match code {
            KeyCode::Down | KeyCode::Right | KeyCode::Tab | KeyCode::Char('j') => {
                self.select_next();
                KeyAction::None
            }
            KeyCode::Up | KeyCode::Left | KeyCode::BackTab | KeyCode::Char('k') => {
                self.select_previous();
                KeyAction::None
            }
            KeyCode::Char('r') => KeyAction::Refresh,
            KeyCode::Char('o') => self.dispatch_selected(actions::LIGHT_ON),
            KeyCode::Char('f') => self.dispatch_selected(actions::LIGHT_OFF),
            _ => KeyAction::None,
        }
    }

    fn dispatch_selected(&self, action: &str) -> KeyAction {
        match self.selected_target() {
            Some(device) => KeyAction::Dispatch {
                device,
                action: action.to_string(),
            },
            None => KeyAction::None,
        }
    }
}

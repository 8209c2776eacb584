use crate::app::DialogState;
use crate::wifi::ConfirmationOutcome;
use crossterm::event::{self, KeyEvent, KeyModifiers};

/// Handle keyboard events for the confirmation dialog.
///
/// Returns the user's decision once one has been made.
pub fn handle_dialog_key(key: KeyEvent, state: &mut DialogState) -> Option<ConfirmationOutcome> {
    match key.code {
        event::KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(ConfirmationOutcome::Cancelled)
        }
        event::KeyCode::Char('[') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Close like Esc
            Some(ConfirmationOutcome::Cancelled)
        }
        event::KeyCode::Esc | event::KeyCode::Char('q') => Some(ConfirmationOutcome::Cancelled),
        event::KeyCode::Tab | event::KeyCode::Right | event::KeyCode::Char('l') => {
            state.next();
            None
        }
        event::KeyCode::BackTab | event::KeyCode::Left | event::KeyCode::Char('h') => {
            state.previous();
            None
        }
        event::KeyCode::Char('y') => Some(ConfirmationOutcome::Accepted),
        event::KeyCode::Char('n') => Some(ConfirmationOutcome::Rejected),
        event::KeyCode::Enter | event::KeyCode::Char(' ') => Some(state.selected.outcome()),
        _ => None,
    }
}

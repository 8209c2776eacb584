use crate::config::IconSet;
use crate::wifi::{ConfirmationOutcome, DialogRequest};

/// Buttons shown at the bottom of the confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    Accept,
    Neutral,
    Decline,
}

impl DialogButton {
    pub fn outcome(&self) -> ConfirmationOutcome {
        match self {
            DialogButton::Accept => ConfirmationOutcome::Accepted,
            DialogButton::Decline => ConfirmationOutcome::Rejected,
            // The neutral button carries no decision
            DialogButton::Neutral => ConfirmationOutcome::Dismissed,
        }
    }
}

#[derive(Debug)]
pub struct DialogState {
    pub request: DialogRequest,
    pub selected: DialogButton,
    pub icons: IconSet,
}

impl DialogState {
    pub fn new(request: DialogRequest, icons: IconSet) -> DialogState {
        DialogState {
            request,
            selected: DialogButton::Accept,
            icons,
        }
    }

    /// Buttons in display order, left to right
    pub fn buttons(&self) -> Vec<DialogButton> {
        let mut buttons = vec![DialogButton::Accept];
        if self.request.neutral_text.is_some() {
            buttons.push(DialogButton::Neutral);
        }
        buttons.push(DialogButton::Decline);
        buttons
    }

    pub fn label(&self, button: DialogButton) -> &str {
        match button {
            DialogButton::Accept => &self.request.accept_text,
            DialogButton::Decline => &self.request.decline_text,
            DialogButton::Neutral => self.request.neutral_text.as_deref().unwrap_or_default(),
        }
    }

    pub fn next(&mut self) {
        let buttons = self.buttons();
        let i = buttons
            .iter()
            .position(|b| *b == self.selected)
            .unwrap_or(0);
        self.selected = buttons[(i + 1) % buttons.len()];
    }

    pub fn previous(&mut self) {
        let buttons = self.buttons();
        let i = buttons
            .iter()
            .position(|b| *b == self.selected)
            .unwrap_or(0);
        self.selected = buttons[(i + buttons.len() - 1) % buttons.len()];
    }
}

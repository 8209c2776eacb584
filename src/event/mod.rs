//! Event handling for the terminal confirmation dialog
//!
//! Runs the draw/read loop on a blocking thread and turns the user's key presses into a
//! [`ConfirmationOutcome`].

mod handlers;

use crate::{
    app::DialogState,
    config::{self, IconSet},
    remediation::ConfirmationDialog,
    ui::render,
    wifi::{ConfirmationOutcome, DialogRequest},
};
use async_trait::async_trait;
use crossterm::event::{self, Event, KeyEventKind};
use handlers::handle_dialog_key;
use ratatui::DefaultTerminal;
use std::time::Duration;

pub fn run(mut terminal: DefaultTerminal, state: &mut DialogState) -> std::io::Result<ConfirmationOutcome> {
    loop {
        terminal.draw(|frame| render(frame, state))?;

        if event::poll(Duration::from_millis(config::EVENT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(outcome) = handle_dialog_key(key, state) {
                    return Ok(outcome);
                }
            }
        }
    }
}

/// Confirmation dialog drawn in the terminal's alternate screen
#[derive(Debug, Default)]
pub struct TerminalDialog {
    icons: IconSet,
}

impl TerminalDialog {
    pub fn new(icons: IconSet) -> Self {
        Self { icons }
    }
}

#[async_trait]
impl ConfirmationDialog for TerminalDialog {
    async fn open(&self, request: DialogRequest) -> ConfirmationOutcome {
        let icons = self.icons;
        let result = tokio::task::spawn_blocking(move || {
            let mut state = DialogState::new(request, icons);
            let terminal = ratatui::init();
            let result = run(terminal, &mut state);
            ratatui::restore();
            result
        })
        .await;

        match result {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "terminal dialog failed");
                ConfirmationOutcome::Dismissed
            }
            Err(e) => {
                tracing::warn!(error = %e, "terminal dialog task aborted");
                ConfirmationOutcome::Dismissed
            }
        }
    }
}

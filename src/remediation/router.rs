use crate::config::{ACTION_SHOW_SET_RANDOMIZATION_DETAILS, INVALID_NETWORK_ID};
use crate::error::{RemediationError, RemediationResult};
use crate::remediation::workflow::RemediationWorkflow;
use crate::wifi::{ExternalEvent, NetworkId};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

/// Receives the "user tapped the notification" callback
pub trait ConfirmHandler: Send + Sync {
    fn confirm(&self, network_id: NetworkId, identity: Option<String>);
}

impl ConfirmHandler for RemediationWorkflow {
    fn confirm(&self, network_id: NetworkId, identity: Option<String>) {
        // Outcome is reported to the user by the workflow itself
        drop(RemediationWorkflow::confirm(self, network_id, identity));
    }
}

/// Extract the target network from a tap event, or `None` for other actions
pub fn decode(event: ExternalEvent) -> Option<(NetworkId, Option<String>)> {
    if event.action != ACTION_SHOW_SET_RANDOMIZATION_DETAILS {
        return None;
    }
    Some((event.network_id.unwrap_or(INVALID_NETWORK_ID), event.identity))
}

/// Routes tap events to a single handler over a typed channel
#[derive(Default)]
pub struct ConfirmationRouter {
    sender: Option<UnboundedSender<ExternalEvent>>,
}

impl ConfirmationRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the handler and start listening.
    ///
    /// Only one handler may be registered for the lifetime of the router. The listener
    /// stops once every sender returned by [`ConfirmationRouter::sender`] is dropped.
    pub fn register(&mut self, handler: Arc<dyn ConfirmHandler>) -> RemediationResult<JoinHandle<()>> {
        if self.sender.is_some() {
            return Err(RemediationError::RouterAlreadyRegistered);
        }
        let (tx, mut rx) = mpsc::unbounded_channel::<ExternalEvent>();
        self.sender = Some(tx);

        let listener = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let action = event.action.clone();
                match decode(event) {
                    Some((network_id, identity)) => {
                        tracing::debug!(network_id, "randomization details requested");
                        handler.confirm(network_id, identity);
                    }
                    None => tracing::trace!(%action, "ignoring unrelated event"),
                }
            }
        });
        Ok(listener)
    }

    /// Event source handle, available once a handler is registered
    pub fn sender(&self) -> Option<UnboundedSender<ExternalEvent>> {
        self.sender.clone()
    }

    /// Drop the router's own sender so the listener ends when external senders do
    pub fn close(&mut self) {
        self.sender = None;
    }
}

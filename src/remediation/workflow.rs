use crate::config::{self, Messages, with_ssid};
use crate::error::{RemediationError, RemediationResult};
use crate::remediation::queue::SerialQueue;
use crate::remediation::services::{
    ConfirmationDialog, Feedback, Notifier, ProfileStore, ScanTrigger,
};
use crate::wifi::{
    ConfirmationOutcome, DialogRequest, MacRandomization, NetworkId, NetworkProfile,
    Notification, RemediationEvent,
};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Collaborators the workflow is wired to
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn ProfileStore>,
    pub notifier: Arc<dyn Notifier>,
    pub dialog: Arc<dyn ConfirmationDialog>,
    pub feedback: Arc<dyn Feedback>,
    pub scanner: Arc<dyn ScanTrigger>,
}

/// Terminal state of one confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemediationOutcome {
    /// Profile missing or changed since the notification was posted
    Invalidated(RemediationError),
    /// User declined, cancelled, or dismissed the dialog
    Declined(ConfirmationOutcome),
    /// Randomization is now off and a scan was requested
    Applied,
    /// Store did not reflect the change
    Unverified,
}

struct Inner {
    services: Services,
    messages: Messages,
}

/// Offers to turn off MAC randomization for a network that rejected a randomized address.
///
/// `notify` posts the offer. `confirm` is the re-entry point once the user taps it and
/// runs on a single serial queue, so two confirmations never overlap.
#[derive(Clone)]
pub struct RemediationWorkflow {
    inner: Arc<Inner>,
    queue: SerialQueue,
}

impl RemediationWorkflow {
    /// Build the workflow and start its confirmation queue
    pub fn spawn(services: Services, messages: Messages) -> (Self, JoinHandle<()>) {
        let (queue, worker) = SerialQueue::spawn("confirmation");
        let workflow = Self {
            inner: Arc::new(Inner { services, messages }),
            queue,
        };
        (workflow, worker)
    }

    /// Post the "can't connect" notification for `network_id`.
    ///
    /// Returns the payload carried by the notification, or `None` if the network is
    /// no longer saved. Reposting replaces the previous notification.
    pub fn notify(&self, network_id: NetworkId) -> Option<RemediationEvent> {
        let services = &self.inner.services;
        let Some(profile) = services.store.get(network_id) else {
            tracing::debug!(network_id, "no saved profile, skipping notification");
            return None;
        };

        let event = RemediationEvent {
            network_id,
            identity: profile.identity(),
        };
        let messages = &self.inner.messages;
        let notification = Notification {
            title: with_ssid(&messages.notification_title, &profile.ssid),
            body: with_ssid(&messages.notification_body, &profile.ssid),
            tap_action: event.clone().into_tap_action(),
        };
        services
            .notifier
            .post(config::NOTE_NETWORK_NO_MAC_RANDOMIZATION_SUPPORT, notification);
        tracing::info!(network_id, identity = %event.identity, "posted randomization notification");
        Some(event)
    }

    /// Queue the confirmation for a tapped notification.
    ///
    /// The returned receiver resolves with the outcome; dropping it is fine.
    pub fn confirm(
        &self,
        network_id: NetworkId,
        captured_identity: Option<String>,
    ) -> oneshot::Receiver<RemediationOutcome> {
        let (tx, rx) = oneshot::channel();
        let inner = self.inner.clone();
        let submitted = self.queue.submit(async move {
            let outcome = inner.run_confirmation(network_id, captured_identity).await;
            let _ = tx.send(outcome);
        });
        if let Err(e) = submitted {
            tracing::error!(network_id, error = %e, "dropping confirmation");
        }
        rx
    }

    /// Wait for every queued confirmation to finish
    pub async fn flush(&self) -> RemediationResult<()> {
        self.queue.flush().await
    }
}

impl Inner {
    async fn run_confirmation(
        &self,
        network_id: NetworkId,
        captured_identity: Option<String>,
    ) -> RemediationOutcome {
        let services = &self.services;

        let profile = match self.validate(network_id, captured_identity.as_deref()) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(network_id, error = %e, "not acting on notification");
                services.feedback.show(&self.messages.network_not_found);
                return RemediationOutcome::Invalidated(e);
            }
        };

        let outcome = services.dialog.open(self.dialog_request(&profile)).await;
        if outcome != ConfirmationOutcome::Accepted {
            tracing::debug!(network_id, ?outcome, "user declined");
            return RemediationOutcome::Declined(outcome);
        }

        match self.disable_randomization(profile) {
            Ok(updated) => {
                services.feedback.show(&self.messages.success);
                if let Err(e) = services.store.enable(updated.network_id, config::SYSTEM_UID) {
                    tracing::warn!(network_id, error = %e, "failed to enable network");
                }
                services.scanner.request_scan(&config::WIFI_WORK_SOURCE);
                tracing::info!(network_id, "MAC randomization disabled");
                RemediationOutcome::Applied
            }
            Err(e) => {
                services.feedback.show(&self.messages.failure);
                tracing::error!(network_id, error = %e, "Failed to modify MAC randomization setting");
                RemediationOutcome::Unverified
            }
        }
    }

    /// Re-fetch the profile and make sure the id still names the same network
    fn validate(
        &self,
        network_id: NetworkId,
        captured_identity: Option<&str>,
    ) -> RemediationResult<NetworkProfile> {
        let profile = self
            .services
            .store
            .get(network_id)
            .ok_or(RemediationError::ProfileNotFound { network_id })?;
        let found = profile.identity();
        if captured_identity != Some(found.as_str()) {
            return Err(RemediationError::StaleReference {
                network_id,
                expected: captured_identity.map(str::to_string),
                found,
            });
        }
        Ok(profile)
    }

    fn dialog_request(&self, profile: &NetworkProfile) -> DialogRequest {
        let messages = &self.messages;
        DialogRequest {
            title: messages.dialog_title.clone(),
            message: with_ssid(&messages.dialog_message, &profile.ssid),
            accept_text: messages.dialog_confirm.clone(),
            decline_text: messages.dialog_cancel.clone(),
            neutral_text: None,
        }
    }

    /// Write the change, then trust only what a fresh read says
    fn disable_randomization(&self, mut profile: NetworkProfile) -> RemediationResult<NetworkProfile> {
        let network_id = profile.network_id;
        let store = &self.services.store;

        profile.mac_randomization = MacRandomization::Disabled;
        if let Err(e) = store.update(&profile, config::SYSTEM_UID) {
            tracing::warn!(network_id, error = %e, "store refused profile update");
        }

        match store.get(network_id) {
            Some(updated) if updated.mac_randomization == MacRandomization::Disabled => Ok(updated),
            _ => Err(RemediationError::MutationUnverified { network_id }),
        }
    }
}

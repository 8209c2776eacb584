//! In-memory collaborators for exercising the workflow and router.

use crate::config::Messages;
use crate::error::{StoreError, StoreResult};
use crate::remediation::services::{
    ConfirmationDialog, Feedback, Notifier, ProfileStore, ScanTrigger,
};
use crate::remediation::workflow::{RemediationWorkflow, Services};
use crate::wifi::{
    CallerUid, ConfirmationOutcome, DialogRequest, NetworkId, NetworkProfile, Notification,
    WorkSource,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum WriteMode {
    #[default]
    Apply,
    /// Accept the call but keep the old profile
    Ignore,
    Reject,
    /// Accept the call but drop the profile, as a concurrent removal would
    Remove,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: Mutex<HashMap<NetworkId, NetworkProfile>>,
    mode: Mutex<WriteMode>,
    fail_enable: AtomicBool,
    updates: AtomicUsize,
    enables: AtomicUsize,
}

impl MemoryStore {
    /// Add or replace a profile, bypassing the counters
    pub fn insert(&self, profile: NetworkProfile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.network_id, profile);
    }

    pub fn ignore_updates(&self) {
        *self.mode.lock().unwrap() = WriteMode::Ignore;
    }

    pub fn reject_updates(&self) {
        *self.mode.lock().unwrap() = WriteMode::Reject;
    }

    pub fn remove_on_update(&self) {
        *self.mode.lock().unwrap() = WriteMode::Remove;
    }

    pub fn fail_enable(&self) {
        self.fail_enable.store(true, Ordering::SeqCst);
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn enable_count(&self) -> usize {
        self.enables.load(Ordering::SeqCst)
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self, network_id: NetworkId) -> Option<NetworkProfile> {
        self.profiles.lock().unwrap().get(&network_id).cloned()
    }

    fn update(&self, profile: &NetworkProfile, _caller: CallerUid) -> StoreResult<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        match *self.mode.lock().unwrap() {
            WriteMode::Apply => {
                self.insert(profile.clone());
                Ok(())
            }
            WriteMode::Ignore => Ok(()),
            WriteMode::Remove => {
                self.profiles.lock().unwrap().remove(&profile.network_id);
                Ok(())
            }
            WriteMode::Reject => Err(StoreError::Rejected {
                network_id: profile.network_id,
                reason: "read-only".to_string(),
            }),
        }
    }

    fn enable(&self, network_id: NetworkId, _caller: CallerUid) -> StoreResult<()> {
        self.enables.fetch_add(1, Ordering::SeqCst);
        if self.fail_enable.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected {
                network_id,
                reason: "locked".to_string(),
            });
        }
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(&network_id)
            .ok_or(StoreError::UnknownProfile { network_id })?;
        profile.enabled = true;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    live: Mutex<HashMap<u32, Notification>>,
    posts: AtomicUsize,
}

impl RecordingNotifier {
    pub fn live(&self) -> HashMap<u32, Notification> {
        self.live.lock().unwrap().clone()
    }

    pub fn post_count(&self) -> usize {
        self.posts.load(Ordering::SeqCst)
    }
}

impl Notifier for RecordingNotifier {
    fn post(&self, notification_id: u32, notification: Notification) {
        self.posts.fetch_add(1, Ordering::SeqCst);
        self.live
            .lock()
            .unwrap()
            .insert(notification_id, notification);
    }
}

/// Answers every dialog with the same choice
#[derive(Debug)]
pub struct ScriptedDialog {
    answer: ConfirmationOutcome,
    requests: Mutex<Vec<DialogRequest>>,
}

impl ScriptedDialog {
    pub fn new(answer: ConfirmationOutcome) -> Self {
        Self {
            answer,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<DialogRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmationDialog for ScriptedDialog {
    async fn open(&self, request: DialogRequest) -> ConfirmationOutcome {
        self.requests.lock().unwrap().push(request);
        self.answer
    }
}

pub type PendingDialog = (DialogRequest, oneshot::Sender<ConfirmationOutcome>);

/// Hands each dialog to the test, which answers it when it likes
#[derive(Debug)]
pub struct ManualDialog {
    tx: mpsc::UnboundedSender<PendingDialog>,
}

#[async_trait]
impl ConfirmationDialog for ManualDialog {
    async fn open(&self, request: DialogRequest) -> ConfirmationOutcome {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.tx.send((request, reply_tx)).is_err() {
            return ConfirmationOutcome::Dismissed;
        }
        reply_rx.await.unwrap_or(ConfirmationOutcome::Dismissed)
    }
}

#[derive(Debug, Default)]
pub struct RecordingFeedback {
    messages: Mutex<Vec<String>>,
}

impl RecordingFeedback {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Feedback for RecordingFeedback {
    fn show(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[derive(Debug, Default)]
pub struct RecordingScanner {
    requests: Mutex<Vec<WorkSource>>,
}

impl RecordingScanner {
    pub fn requests(&self) -> Vec<WorkSource> {
        self.requests.lock().unwrap().clone()
    }
}

impl ScanTrigger for RecordingScanner {
    fn request_scan(&self, source: &WorkSource) {
        self.requests.lock().unwrap().push(*source);
    }
}

/// A workflow wired to recording collaborators
pub struct Harness {
    pub workflow: RemediationWorkflow,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub dialog: Arc<ScriptedDialog>,
    pub feedback: Arc<RecordingFeedback>,
    pub scanner: Arc<RecordingScanner>,
    _worker: JoinHandle<()>,
}

impl Harness {
    /// Every dialog is answered with `answer`
    pub fn new(answer: ConfirmationOutcome) -> Self {
        let dialog = Arc::new(ScriptedDialog::new(answer));
        Self::build(dialog.clone(), dialog)
    }

    /// Dialogs are handed to the returned receiver to be answered manually
    pub fn with_manual_dialog() -> (Self, mpsc::UnboundedReceiver<PendingDialog>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let unused = Arc::new(ScriptedDialog::new(ConfirmationOutcome::Dismissed));
        (Self::build(Arc::new(ManualDialog { tx }), unused), rx)
    }

    fn build(dialog: Arc<dyn ConfirmationDialog>, scripted: Arc<ScriptedDialog>) -> Self {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let feedback = Arc::new(RecordingFeedback::default());
        let scanner = Arc::new(RecordingScanner::default());
        let services = Services {
            store: store.clone(),
            notifier: notifier.clone(),
            dialog,
            feedback: feedback.clone(),
            scanner: scanner.clone(),
        };
        let (workflow, worker) = RemediationWorkflow::spawn(services, Messages::default());
        Self {
            workflow,
            store,
            notifier,
            dialog: scripted,
            feedback,
            scanner,
            _worker: worker,
        }
    }
}

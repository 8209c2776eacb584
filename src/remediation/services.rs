//! Collaborator contracts the workflow talks to.

use crate::error::StoreResult;
use crate::wifi::{
    CallerUid, ConfirmationOutcome, DialogRequest, NetworkId, NetworkProfile, Notification,
    WorkSource,
};
use async_trait::async_trait;

/// Saved network configuration. Must be callable from the confirmation queue.
pub trait ProfileStore: Send + Sync {
    /// Current snapshot of a profile, if the id is still valid
    fn get(&self, network_id: NetworkId) -> Option<NetworkProfile>;

    /// Replace the stored profile with the same id
    fn update(&self, profile: &NetworkProfile, caller: CallerUid) -> StoreResult<()>;

    /// Mark a profile usable for auto-join
    fn enable(&self, network_id: NetworkId, caller: CallerUid) -> StoreResult<()>;
}

/// Posts user notifications. A post replaces any earlier post with the same id.
pub trait Notifier: Send + Sync {
    fn post(&self, notification_id: u32, notification: Notification);
}

/// Modal confirmation surface.
///
/// Resolves exactly once. There is no timeout; the user may take as long as they like.
#[async_trait]
pub trait ConfirmationDialog: Send + Sync {
    async fn open(&self, request: DialogRequest) -> ConfirmationOutcome;
}

/// Short-lived user-visible messages
pub trait Feedback: Send + Sync {
    fn show(&self, message: &str);
}

/// Hint to re-attempt association
pub trait ScanTrigger: Send + Sync {
    fn request_scan(&self, source: &WorkSource);
}

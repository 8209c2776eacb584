//! Saved Wi-Fi profiles and the data passed around while remediating them.

mod profile;
mod scanning;
mod types;

// Re-export public API
pub use profile::XmlProfileStore;
pub use scanning::LoggingScanTrigger;
pub use types::{
    CallerUid, ConfirmationOutcome, DialogRequest, ExternalEvent, MacRandomization, NetworkId,
    NetworkProfile, Notification, RemediationEvent, SecurityType, WorkSource,
};

//! MAC randomization remediation
//!
//! Posts a notification when a network rejects randomized MAC addresses, and when the
//! user taps it, confirms, turns randomization off for that profile, verifies the change
//! and asks for a rescan.

mod queue;
mod router;
mod services;
mod workflow;

#[cfg(test)]
mod testing;

pub use router::ConfirmationRouter;
pub use services::{ConfirmationDialog, Feedback, Notifier, ProfileStore, ScanTrigger};
pub use workflow::{RemediationWorkflow, Services};

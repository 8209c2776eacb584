/// Typed errors for the remediation workflow and the profile store
use crate::wifi::NetworkId;
use thiserror::Error;

/// Result type alias for remediation steps
pub type RemediationResult<T> = Result<T, RemediationError>;

/// Result type alias for profile store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Ways a remediation attempt can end early
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemediationError {
    #[error("Network {network_id} not found")]
    ProfileNotFound { network_id: NetworkId },

    #[error("Network {network_id} changed since the notification was posted (expected {expected:?}, found {found:?})")]
    StaleReference {
        network_id: NetworkId,
        expected: Option<String>,
        found: String,
    },

    #[error("Store did not apply the MAC randomization change for network {network_id}")]
    MutationUnverified { network_id: NetworkId },

    #[error("Confirmation queue is closed")]
    QueueClosed,

    #[error("A confirmation handler is already registered")]
    RouterAlreadyRegistered,
}

/// Errors that can occur while reading or writing saved profiles
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Profile {network_id} does not exist")]
    UnknownProfile { network_id: NetworkId },

    #[error("Profile {network_id} was rejected: {reason}")]
    Rejected { network_id: NetworkId, reason: String },

    #[error("Invalid profile XML: {0}")]
    ProfileXmlInvalid(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

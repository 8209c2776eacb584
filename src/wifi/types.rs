use secrecy::SecretString;
use std::fmt;

/// Store key of a saved network. Ids can be recycled once a profile is removed.
pub type NetworkId = i32;

/// Identity of the component asking the store for a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerUid(pub u32);

/// Who a scan request is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkSource {
    pub uid: CallerUid,
    pub tag: &'static str,
}

/// Security type of a saved network, as it appears in the identity string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityType {
    Open,
    Wep,
    Wpa,
    Wpa2,
    Wpa3,
    Enterprise,
}

impl SecurityType {
    pub fn label(&self) -> &'static str {
        match self {
            SecurityType::Open => "OPEN",
            SecurityType::Wep => "WEP",
            SecurityType::Wpa => "WPA",
            SecurityType::Wpa2 => "WPA2",
            SecurityType::Wpa3 => "WPA3",
            SecurityType::Enterprise => "EAP",
        }
    }

    /// Map a WLAN profile `authentication` value
    pub fn from_auth(auth: &str) -> Option<Self> {
        match auth {
            "open" => Some(SecurityType::Open),
            "shared" => Some(SecurityType::Wep),
            "WPAPSK" => Some(SecurityType::Wpa),
            "WPA2PSK" => Some(SecurityType::Wpa2),
            "WPA3SAE" => Some(SecurityType::Wpa3),
            "WPA" | "WPA2" | "WPA3ENT" | "WPA3ENT192" => Some(SecurityType::Enterprise),
            _ => None,
        }
    }

    /// `(authentication, encryption)` pair written to profile XML
    pub fn auth_encryption(&self) -> (&'static str, &'static str) {
        match self {
            SecurityType::Open => ("open", "none"),
            SecurityType::Wep => ("shared", "WEP"),
            SecurityType::Wpa => ("WPAPSK", "TKIP"),
            SecurityType::Wpa2 => ("WPA2PSK", "AES"),
            SecurityType::Wpa3 => ("WPA3SAE", "AES"),
            SecurityType::Enterprise => ("WPA2", "AES"),
        }
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a locally generated MAC address is used when associating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacRandomization {
    #[default]
    Randomized,
    Disabled,
}

/// A saved network as held by the profile store
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    pub network_id: NetworkId,
    pub ssid: String,
    pub security: SecurityType,
    pub mac_randomization: MacRandomization,
    pub passphrase: Option<SecretString>,
    pub hidden: bool,
    pub enabled: bool,
}

impl NetworkProfile {
    pub fn new(network_id: NetworkId, ssid: impl Into<String>, security: SecurityType) -> Self {
        Self {
            network_id,
            ssid: ssid.into(),
            security,
            mac_randomization: MacRandomization::Randomized,
            passphrase: None,
            hidden: false,
            enabled: true,
        }
    }

    /// `"<ssid>/<security>"`, compared to detect that an id now points at a different network
    pub fn identity(&self) -> String {
        format!("{}/{}", self.ssid, self.security)
    }
}

/// Payload of a posted notification, handed back when the user taps it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationEvent {
    pub network_id: NetworkId,
    pub identity: String,
}

/// Asynchronous event delivered to the confirmation router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEvent {
    pub action: String,
    pub network_id: Option<NetworkId>,
    pub identity: Option<String>,
}

impl RemediationEvent {
    /// Event raised when the notification carrying this payload is tapped
    pub fn into_tap_action(self) -> ExternalEvent {
        ExternalEvent {
            action: crate::config::ACTION_SHOW_SET_RANDOMIZATION_DETAILS.to_string(),
            network_id: Some(self.network_id),
            identity: Some(self.identity),
        }
    }
}

/// Notification content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub tap_action: ExternalEvent,
}

/// What the user did with the confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Accepted,
    Rejected,
    Cancelled,
    /// Dialog went away without an explicit choice
    Dismissed,
}

/// Everything needed to present the confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub title: String,
    pub message: String,
    pub accept_text: String,
    pub decline_text: String,
    pub neutral_text: Option<String>,
}

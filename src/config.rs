/// Centralized configuration constants for wifi-remedy
use crate::wifi::{CallerUid, NetworkId, WorkSource};

// Identifiers
pub const INVALID_NETWORK_ID: NetworkId = -1;
pub const SYSTEM_UID: CallerUid = CallerUid(1000);
pub const WIFI_WORK_SOURCE: WorkSource = WorkSource {
    uid: SYSTEM_UID,
    tag: "wifi",
};

// Notification
pub const NOTE_NETWORK_NO_MAC_RANDOMIZATION_SUPPORT: u32 = 56;
pub const ACTION_SHOW_SET_RANDOMIZATION_DETAILS: &str =
    "wifi_remedy.action.SHOW_SET_RANDOMIZATION_DETAILS";

// Storage
pub const DEFAULT_STORE_PATH: &str = "profiles.xml";

// Timing
pub const EVENT_POLL_MS: u64 = 100;

/// User-visible text. `{ssid}` is replaced with the network name.
#[derive(Debug, Clone)]
pub struct Messages {
    pub notification_title: String,
    pub notification_body: String,
    pub dialog_title: String,
    pub dialog_message: String,
    pub dialog_confirm: String,
    pub dialog_cancel: String,
    pub network_not_found: String,
    pub success: String,
    pub failure: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            notification_title: "Can't connect to {ssid}".to_string(),
            notification_body:
                "This network doesn't support randomized MAC addresses. Tap to change the privacy setting."
                    .to_string(),
            dialog_title: "Use device MAC for this network?".to_string(),
            dialog_message: "{ssid} rejects randomized MAC addresses. This device will send its hardware MAC address when connecting to {ssid}.".to_string(),
            dialog_confirm: "Use device MAC".to_string(),
            dialog_cancel: "Cancel".to_string(),
            network_not_found: "Network not found or changed".to_string(),
            success: "Setting updated. Try connecting again.".to_string(),
            failure: "Can't change the privacy setting".to_string(),
        }
    }
}

/// Substitute the network name into a message template
pub fn with_ssid(template: &str, ssid: &str) -> String {
    template.replace("{ssid}", ssid)
}

// Icons - Nerd Fonts
pub mod icons {
    pub mod nerd {
        pub const ENTER: &str = "󰌑"; // nf-md-keyboard_return
        pub const TAB_NEXT: &str = "⇥ / →";
        pub const BTN_LEFT: &str = "";
        pub const BTN_RIGHT: &str = "";
    }

    pub mod ascii {
        pub const ENTER: &str = "Enter";
        pub const TAB_NEXT: &str = "Tab/Right";
        pub const BTN_LEFT: &str = "[";
        pub const BTN_RIGHT: &str = "]";
    }
}

/// Icon set to use based on configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconSet {
    #[default]
    Nerd,
    Ascii,
}

impl IconSet {
    pub fn enter(&self) -> &'static str {
        match self {
            IconSet::Nerd => icons::nerd::ENTER,
            IconSet::Ascii => icons::ascii::ENTER,
        }
    }

    pub fn tab_next(&self) -> &'static str {
        match self {
            IconSet::Nerd => icons::nerd::TAB_NEXT,
            IconSet::Ascii => icons::ascii::TAB_NEXT,
        }
    }

    pub fn btn_left(&self) -> &'static str {
        match self {
            IconSet::Nerd => icons::nerd::BTN_LEFT,
            IconSet::Ascii => icons::ascii::BTN_LEFT,
        }
    }

    pub fn btn_right(&self) -> &'static str {
        match self {
            IconSet::Nerd => icons::nerd::BTN_RIGHT,
            IconSet::Ascii => icons::ascii::BTN_RIGHT,
        }
    }
}

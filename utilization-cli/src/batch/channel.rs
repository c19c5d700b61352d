//! Routing media channels and their fixed utilization policy

use serde::{Deserialize, Serialize};

/// One of the routing media kinds with independent capacity settings.
///
/// Variant order is the order channels appear in payloads and spreadsheet
/// templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Chat,
    Message,
    Callback,
    Call,
    Workitem,
}

/// `includeNonAcd` per channel. Not configurable and not derived from input.
const INCLUDE_NON_ACD: [(Channel, bool); 6] = [
    (Channel::Email, false),
    (Channel::Chat, false),
    (Channel::Message, false),
    (Channel::Callback, false),
    (Channel::Call, false),
    (Channel::Workitem, true),
];

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Email,
        Channel::Chat,
        Channel::Message,
        Channel::Callback,
        Channel::Call,
        Channel::Workitem,
    ];

    /// Wire key used in the utilization payload
    pub fn key(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Chat => "chat",
            Channel::Message => "message",
            Channel::Callback => "callback",
            Channel::Call => "call",
            Channel::Workitem => "workitem",
        }
    }

    /// Prefix used in spreadsheet column headers
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::Chat => "Chat",
            Channel::Message => "Message",
            Channel::Callback => "Callback",
            Channel::Call => "Call",
            Channel::Workitem => "Workitem",
        }
    }

    pub fn capacity_column(&self) -> String {
        format!("{} Maximum Capacity", self.label())
    }

    pub fn media_types_column(&self) -> String {
        format!("{} Interruptable Media Types", self.label())
    }

    pub fn include_non_acd(&self) -> bool {
        INCLUDE_NON_ACD
            .iter()
            .find(|(channel, _)| channel == self)
            .map(|(_, include)| *include)
            .unwrap_or(false)
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

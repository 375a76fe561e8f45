//! Firewall rule data structures
//!
//! This module defines the core value types for representing packet-filter
//! rules and the protocol-option sub-structure embedded in their protocol
//! field. The line codecs in [`crate::core::rule_line`] and
//! [`crate::core::protocol`] convert these to and from the textual wire
//! formats.
//!
//! # Enum policy
//!
//! Wire tokens for enum-valued fields (chain, protocol, action) never produce
//! errors: an unrecognized token silently falls back to the field's default
//! (`INPUT` / `tcp` / `DROP`). This is a deliberate forward-compatibility
//! policy — devices running newer templates must still parse on older
//! managers — exposed through each enum's [`from_token`](Chain::from_token)
//! constructor.
//!
//! # Example
//!
//! ```
//! use fwms::core::firewall::{Chain, FirewallRule, Protocol};
//!
//! let rule = FirewallRule {
//!     chain: Chain::Input,
//!     protocol: Protocol::Tcp,
//!     dport: "22".to_string(),
//!     ..FirewallRule::default()
//! };
//! assert_eq!(rule.protocol.number(), 6);
//! ```

use serde::{Deserialize, Serialize};

/// Packet-filter hook point a rule attaches to
///
/// `Copy` trait allows efficient passing by value for this small enum.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Chain {
    /// Incoming traffic (the default chain)
    #[default]
    #[strum(serialize = "INPUT")]
    Input,
    /// Outgoing traffic
    #[strum(serialize = "OUTPUT")]
    Output,
    /// Routed traffic passing through the device
    #[strum(serialize = "FORWARD")]
    Forward,
    /// Pre-routing hook (NAT)
    #[strum(serialize = "PREROUTING")]
    Prerouting,
    /// Post-routing hook (NAT)
    #[strum(serialize = "POSTROUTING")]
    Postrouting,
}

impl Chain {
    /// Parses a wire token; unknown names default to `INPUT`, never error.
    pub fn from_token(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Returns the uppercase chain name as a static string
    pub const fn as_str(self) -> &'static str {
        match self {
            Chain::Input => "INPUT",
            Chain::Output => "OUTPUT",
            Chain::Forward => "FORWARD",
            Chain::Prerouting => "PREROUTING",
            Chain::Postrouting => "POSTROUTING",
        }
    }
}

/// Network protocol a rule matches
///
/// Discriminants carry the IANA protocol numbers (`ANY` is the in-house
/// sentinel 255, not an IANA assignment).
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Protocol {
    /// Transmission Control Protocol
    #[default]
    #[strum(serialize = "tcp")]
    Tcp = 6,
    /// User Datagram Protocol
    #[strum(serialize = "udp")]
    Udp = 17,
    /// Internet Control Message Protocol
    #[strum(serialize = "icmp")]
    Icmp = 1,
    /// Match all protocols
    #[strum(serialize = "any")]
    Any = 255,
}

impl Protocol {
    /// Parses a wire token; unknown names default to `tcp`, never error.
    pub fn from_token(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Returns the lowercase protocol name as a static string
    pub const fn as_str(self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
            Protocol::Icmp => "icmp",
            Protocol::Any => "any",
        }
    }

    /// Returns the uppercase name used by the smartfw pipe format
    pub const fn display_name(self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
            Protocol::Icmp => "ICMP",
            Protocol::Any => "ANY",
        }
    }

    /// Returns the protocol number (6/17/1, `ANY` = 255)
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// True for protocols that carry port numbers (TCP/UDP)
    pub const fn supports_ports(self) -> bool {
        matches!(self, Protocol::Tcp | Protocol::Udp)
    }
}

/// What happens when a packet matches a rule
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Action {
    /// Drop the packet silently (no response sent)
    #[default]
    #[strum(serialize = "DROP")]
    Drop,
    /// Accept the packet (allow it through)
    #[strum(serialize = "ACCEPT")]
    Accept,
    /// Reject the packet and send ICMP unreachable response
    #[strum(serialize = "REJECT")]
    Reject,
}

impl Action {
    /// Parses a wire token; unknown names default to `DROP`, never error.
    pub fn from_token(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Returns the uppercase action name as a static string
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Drop => "DROP",
            Action::Accept => "ACCEPT",
            Action::Reject => "REJECT",
        }
    }
}

/// Protocol-specific options embedded in a rule's protocol field
///
/// `tcp_flags` uses the syntax `<mask-list>/<set-list>` with comma-separated
/// flag names from `{syn,ack,fin,rst,psh,urg}`. `icmp_type` and `icmp_code`
/// hold either a symbolic name or a decimal number; the code is only
/// meaningful when the type denotes destination-unreachable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProtocolOptions {
    #[serde(default)]
    pub tcp_flags: String,
    #[serde(default)]
    pub icmp_type: String,
    #[serde(default)]
    pub icmp_code: String,
}

impl ProtocolOptions {
    /// True iff all three fields are empty.
    ///
    /// An absent `ProtocolOptions` behaves identically to an empty one for
    /// all three predicates.
    pub fn is_empty(&self) -> bool {
        self.tcp_flags.is_empty() && self.icmp_type.is_empty() && self.icmp_code.is_empty()
    }

    /// True iff the TCP flags field is set
    pub fn has_tcp_options(&self) -> bool {
        !self.tcp_flags.is_empty()
    }

    /// True iff either ICMP field is set
    pub fn has_icmp_options(&self) -> bool {
        !self.icmp_type.is_empty() || !self.icmp_code.is_empty()
    }
}

/// One packet-filter rule
///
/// Port and address fields are kept as strings: the wire format allows comma
/// lists and CIDR notation, and empty means "not specified". The blacklist
/// and whitelist flags are not mutually exclusive at the type level; the UI
/// layer enforces exclusivity, the model and codec do not.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirewallRule {
    #[serde(default)]
    pub chain: Chain,
    #[serde(default)]
    pub protocol: Protocol,
    /// Protocol options, meaningful only for TCP or ICMP
    #[serde(default)]
    pub options: Option<ProtocolOptions>,
    #[serde(default)]
    pub action: Action,
    /// Destination port; may be empty or a comma list
    #[serde(default)]
    pub dport: String,
    /// Source IP; may be empty, a comma list, or CIDR
    #[serde(default)]
    pub sip: String,
    /// Destination IP; may be empty, a comma list, or CIDR
    #[serde(default)]
    pub dip: String,
    #[serde(default)]
    pub black: bool,
    #[serde(default)]
    pub white: bool,
}

impl FirewallRule {
    /// Returns the rule's options, treating absence as empty
    pub fn options_or_empty(&self) -> ProtocolOptions {
        self.options.clone().unwrap_or_default()
    }
}

/// A named TCP-flags combination offered by the rule editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpFlagsPreset {
    pub name: &'static str,
    pub mask: &'static str,
    pub set: &'static str,
}

/// Preset table for the TCP-flags picker.
///
/// `custom` is the free-form escape hatch; its flags string is empty and the
/// editor substitutes whatever the user typed.
pub const TCP_FLAGS_PRESETS: &[TcpFlagsPreset] = &[
    TcpFlagsPreset {
        name: "none",
        mask: "",
        set: "",
    },
    TcpFlagsPreset {
        name: "new-connections-only",
        mask: "syn,rst,ack,fin",
        set: "syn",
    },
    TcpFlagsPreset {
        name: "established",
        mask: "ack",
        set: "ack",
    },
    TcpFlagsPreset {
        name: "null-scan",
        mask: "syn,rst,ack,fin,psh,urg",
        set: "",
    },
    TcpFlagsPreset {
        name: "xmas-scan",
        mask: "syn,rst,ack,fin,psh,urg",
        set: "fin,psh,urg",
    },
    TcpFlagsPreset {
        name: "fin-scan",
        mask: "syn,rst,ack,fin,psh,urg",
        set: "fin",
    },
    TcpFlagsPreset {
        name: "syn-ack",
        mask: "syn,ack",
        set: "syn,ack",
    },
    TcpFlagsPreset {
        name: "custom",
        mask: "",
        set: "",
    },
];

impl TcpFlagsPreset {
    /// Renders the preset as the wire `mask/set` string (empty for `none`/`custom`)
    pub fn flags_string(&self) -> String {
        if self.mask.is_empty() && self.set.is_empty() {
            String::new()
        } else {
            format!("{}/{}", self.mask, self.set)
        }
    }

    /// Finds the preset matching a wire flags string, if any
    pub fn find_by_flags(flags: &str) -> Option<&'static TcpFlagsPreset> {
        if flags.is_empty() {
            return None;
        }
        TCP_FLAGS_PRESETS
            .iter()
            .find(|p| !(p.mask.is_empty() && p.set.is_empty()) && p.flags_string() == flags)
    }
}

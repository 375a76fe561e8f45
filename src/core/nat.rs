//! NAT rule data structures
//!
//! One [`NatRule`] describes a single address/port translation. The three
//! translation kinds populate different subsets of the fields, which is why
//! the constructors here mirror what the rule editor offers instead of a
//! single catch-all builder.

use serde::{Deserialize, Serialize};

use crate::core::firewall::Protocol;

/// Address translation kind
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
pub enum NatType {
    /// Destination NAT — rewrites destination address/port (port forwarding)
    #[default]
    #[strum(serialize = "DNAT")]
    Dnat,
    /// Source NAT — rewrites source address to a fixed translation address
    #[strum(serialize = "SNAT")]
    Snat,
    /// Source NAT deriving the translation address from the outbound interface
    #[strum(serialize = "MASQUERADE", serialize = "MASQ")]
    Masquerade,
}

impl NatType {
    /// Parses a wire token; unknown names default to `DNAT`, never error.
    ///
    /// `MASQ` is accepted as a legacy alias for `MASQUERADE`.
    pub fn from_token(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Returns the lowercase name used by the CLI-flag line format
    pub const fn as_str(self) -> &'static str {
        match self {
            NatType::Dnat => "dnat",
            NatType::Snat => "snat",
            NatType::Masquerade => "masquerade",
        }
    }

    /// Returns the uppercase name used by the smartfw pipe format
    pub const fn display_name(self) -> &'static str {
        match self {
            NatType::Dnat => "DNAT",
            NatType::Snat => "SNAT",
            NatType::Masquerade => "MASQUERADE",
        }
    }
}

/// One address/port translation rule
///
/// `match_ip`/`match_port` form the trigger condition, `translate_ip`/
/// `translate_port` the target (`translate_port` unused for SNAT and
/// MASQUERADE). Interfaces apply to SNAT/MASQUERADE only. `description` is
/// free text carried on the CLI-flag line, absent from the smartfw form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NatRule {
    #[serde(default)]
    pub nat_type: NatType,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default)]
    pub match_ip: String,
    #[serde(default)]
    pub match_port: String,
    #[serde(default)]
    pub translate_ip: String,
    #[serde(default)]
    pub translate_port: String,
    #[serde(default)]
    pub in_interface: String,
    #[serde(default)]
    pub out_interface: String,
    #[serde(default)]
    pub description: String,
}

impl NatRule {
    /// New DNAT rule with the editor defaults (match any source)
    pub fn dnat() -> Self {
        Self {
            nat_type: NatType::Dnat,
            protocol: Protocol::Tcp,
            match_ip: "ANY".to_string(),
            ..Self::default()
        }
    }

    /// New SNAT rule with the editor defaults
    pub fn snat() -> Self {
        Self {
            nat_type: NatType::Snat,
            protocol: Protocol::Tcp,
            ..Self::default()
        }
    }

    /// New MASQUERADE rule with the editor defaults
    pub fn masquerade() -> Self {
        Self {
            nat_type: NatType::Masquerade,
            protocol: Protocol::Tcp,
            ..Self::default()
        }
    }
}

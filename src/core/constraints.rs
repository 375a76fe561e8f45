//! Rule constraint functions
//!
//! This module centralizes business logic about valid field combinations for
//! filter and NAT rules. It is used by the CLI `check` command and by the
//! rule editor, so both enforce the same rules.
//!
//! The codecs themselves stay permissive — a template with an incomplete NAT
//! rule still parses — and constraint checking is a separate, opt-in pass.
//!
//! # Examples
//!
//! ```
//! use fwms::core::firewall::Protocol;
//! use fwms::core::constraints::*;
//!
//! assert!(protocol_supports_ports(Protocol::Tcp));
//! assert!(!protocol_supports_ports(Protocol::Icmp));
//! ```

use super::firewall::{FirewallRule, Protocol};
use super::nat::{NatRule, NatType};

// ═══════════════════════════════════════════════════════════════════════════
// Protocol Constraints
// ═══════════════════════════════════════════════════════════════════════════

/// Returns `true` if the protocol supports port filtering.
///
/// Only TCP and UDP use ports; ICMP and "any" do not.
///
/// # Examples
///
/// ```
/// use fwms::core::firewall::Protocol;
/// use fwms::core::constraints::protocol_supports_ports;
///
/// assert!(protocol_supports_ports(Protocol::Tcp));
/// assert!(protocol_supports_ports(Protocol::Udp));
/// assert!(!protocol_supports_ports(Protocol::Any));
/// assert!(!protocol_supports_ports(Protocol::Icmp));
/// ```
#[inline]
pub fn protocol_supports_ports(protocol: Protocol) -> bool {
    protocol.supports_ports()
}

/// Returns `true` if the protocol can carry a TCP flags option.
#[inline]
pub fn protocol_supports_flags(protocol: Protocol) -> bool {
    protocol == Protocol::Tcp
}

/// Returns `true` if the protocol can carry ICMP type/code options.
#[inline]
pub fn protocol_supports_icmp_options(protocol: Protocol) -> bool {
    protocol == Protocol::Icmp
}

/// Checks that a filter rule's options match its protocol.
///
/// Returns a human-readable problem description, or `None` when consistent.
/// A TCP rule must not carry ICMP fields and vice versa; rules with no
/// options are always consistent.
pub fn filter_rule_problem(rule: &FirewallRule) -> Option<String> {
    if !rule.dport.is_empty() && !protocol_supports_ports(rule.protocol) {
        return Some(format!(
            "destination port set on a {} rule",
            rule.protocol.as_str()
        ));
    }
    let Some(options) = &rule.options else {
        return None;
    };
    if options.has_tcp_options() && !protocol_supports_flags(rule.protocol) {
        return Some(format!(
            "TCP flags set on a {} rule",
            rule.protocol.as_str()
        ));
    }
    if options.has_icmp_options() && !protocol_supports_icmp_options(rule.protocol) {
        return Some(format!(
            "ICMP type/code set on a {} rule",
            rule.protocol.as_str()
        ));
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
// NAT Completeness Constraints
// ═══════════════════════════════════════════════════════════════════════════

/// Checks that a NAT rule carries the fields its type requires.
///
/// DNAT requires a match port and a translation address; SNAT requires a
/// match address and a translation address; MASQUERADE requires only a match
/// address (its translation address comes from the outbound interface).
///
/// Returns a human-readable problem description, or `None` when complete.
pub fn nat_rule_problem(rule: &NatRule) -> Option<String> {
    match rule.nat_type {
        NatType::Dnat => {
            if rule.match_port.is_empty() {
                return Some("DNAT rule is missing a match port".to_string());
            }
            if rule.translate_ip.is_empty() {
                return Some("DNAT rule is missing a translation address".to_string());
            }
        }
        NatType::Snat => {
            if rule.match_ip.is_empty() {
                return Some("SNAT rule is missing a match address".to_string());
            }
            if rule.translate_ip.is_empty() {
                return Some("SNAT rule is missing a translation address".to_string());
            }
        }
        NatType::Masquerade => {
            if rule.match_ip.is_empty() {
                return Some("MASQUERADE rule is missing a match address".to_string());
            }
        }
    }
    None
}

/// Convenience predicate wrapping [`nat_rule_problem`]
#[inline]
pub fn nat_rule_complete(rule: &NatRule) -> bool {
    nat_rule_problem(rule).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::firewall::ProtocolOptions;

    #[test]
    fn test_protocol_supports_ports() {
        assert!(protocol_supports_ports(Protocol::Tcp));
        assert!(protocol_supports_ports(Protocol::Udp));
        assert!(!protocol_supports_ports(Protocol::Icmp));
        assert!(!protocol_supports_ports(Protocol::Any));
    }

    #[test]
    fn test_flags_only_on_tcp() {
        assert!(protocol_supports_flags(Protocol::Tcp));
        assert!(!protocol_supports_flags(Protocol::Udp));
        assert!(!protocol_supports_flags(Protocol::Icmp));
    }

    #[test]
    fn test_icmp_options_only_on_icmp() {
        assert!(protocol_supports_icmp_options(Protocol::Icmp));
        assert!(!protocol_supports_icmp_options(Protocol::Tcp));
    }

    #[test]
    fn test_filter_rule_without_options_is_consistent() {
        assert!(filter_rule_problem(&FirewallRule::default()).is_none());
    }

    #[test]
    fn test_filter_rule_tcp_flags_on_udp_flagged() {
        let rule = FirewallRule {
            protocol: Protocol::Udp,
            options: Some(ProtocolOptions {
                tcp_flags: "syn/syn".to_string(),
                ..Default::default()
            }),
            ..FirewallRule::default()
        };
        assert!(filter_rule_problem(&rule).unwrap().contains("TCP flags"));
    }

    #[test]
    fn test_filter_rule_dport_on_icmp_flagged() {
        let rule = FirewallRule {
            protocol: Protocol::Icmp,
            dport: "80".to_string(),
            ..FirewallRule::default()
        };
        assert!(
            filter_rule_problem(&rule)
                .unwrap()
                .contains("destination port")
        );
    }

    #[test]
    fn test_filter_rule_icmp_options_on_tcp_flagged() {
        let rule = FirewallRule {
            protocol: Protocol::Tcp,
            options: Some(ProtocolOptions {
                icmp_type: "8".to_string(),
                ..Default::default()
            }),
            ..FirewallRule::default()
        };
        assert!(filter_rule_problem(&rule).unwrap().contains("ICMP"));
    }

    #[test]
    fn test_nat_dnat_requirements() {
        let mut rule = NatRule::dnat();
        assert!(!nat_rule_complete(&rule));
        rule.match_port = "80".to_string();
        assert!(!nat_rule_complete(&rule));
        rule.translate_ip = "10.0.0.1".to_string();
        assert!(nat_rule_complete(&rule));
    }

    #[test]
    fn test_nat_snat_requirements() {
        let mut rule = NatRule::snat();
        assert!(nat_rule_problem(&rule).unwrap().contains("match address"));
        rule.match_ip = "10.0.0.0/8".to_string();
        assert!(
            nat_rule_problem(&rule)
                .unwrap()
                .contains("translation address")
        );
        rule.translate_ip = "203.0.113.7".to_string();
        assert!(nat_rule_complete(&rule));
    }

    #[test]
    fn test_nat_masquerade_needs_only_match_ip() {
        let mut rule = NatRule::masquerade();
        assert!(!nat_rule_complete(&rule));
        rule.match_ip = "192.168.0.0/16".to_string();
        assert!(nat_rule_complete(&rule));
    }
}

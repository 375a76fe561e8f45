//! Shared test utilities for core module tests
//!
//! Provides common test helpers to avoid duplication across test suites.
//! This module is only compiled in test mode.

use crate::core::firewall::{Action, Chain, FirewallRule, Protocol};
use crate::core::nat::NatRule;

/// Creates a filter rule with the fields most tests care about.
pub fn filter_rule(chain: Chain, protocol: Protocol, action: Action, dport: &str) -> FirewallRule {
    FirewallRule {
        chain,
        protocol,
        action,
        dport: dport.to_string(),
        ..FirewallRule::default()
    }
}

/// Creates a complete DNAT rule (port forward) for codec tests.
pub fn dnat_rule(match_port: &str, translate_ip: &str, translate_port: &str) -> NatRule {
    let mut rule = NatRule::dnat();
    rule.match_port = match_port.to_string();
    rule.translate_ip = translate_ip.to_string();
    rule.translate_port = translate_port.to_string();
    rule
}

//! Core rule serialization functionality
//!
//! This module contains the rule model and the codecs between it and the
//! three textual wire formats. It provides:
//!
//! - [`firewall`]: Data structures for packet-filter rules and protocol options
//! - [`nat`]: Data structures for NAT rules
//! - [`protocol`]: Protocol-option sub-grammar codec and ICMP name tables
//! - [`rule_line`]: Filter-rule CLI-flag line codec
//! - [`nat_line`]: NAT-rule CLI-flag line codec and smartfw encoder
//! - [`template`]: Template type and multi-line template assembler
//! - [`direct`]: Smartfw-to-CLI-flag rewriter for direct-mode deployment
//! - [`constraints`]: Business rules for valid field combinations
//! - [`error`]: Error types for codec operations

pub mod constraints;
pub mod direct;
pub mod error;
pub mod firewall;
pub mod nat;
pub mod nat_line;
pub mod protocol;
pub mod rule_line;
pub mod template;

#[cfg(test)]
pub mod test_helpers;

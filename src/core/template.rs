//! Template type and template text assembler
//!
//! A template is a versioned block of text mixing filter lines, NAT lines,
//! comments and blank lines. The assembler splits that text into typed rule
//! lists in a single best-effort pass: blank lines are dropped, comments go
//! into one shared bucket, and each remaining line is routed by the `-t=nat`
//! marker. Decode errors are collected per line and never abort the pass.
//!
//! Reassembly emits comments first, then rules, and always all filter lines
//! before all NAT lines — original interleaving across the two rule kinds is
//! not reconstructed.

use serde::{Deserialize, Serialize};

use crate::core::error::LineError;
use crate::core::firewall::FirewallRule;
use crate::core::nat::NatRule;
use crate::core::nat_line::{self, is_nat_line};
use crate::core::rule_line;

/// A versioned rule template as stored and shipped to devices
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub contents: String,
}

impl Template {
    pub fn new(version: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            contents: contents.into(),
        }
    }

    /// Splits this template's contents into typed rule lists
    pub fn parse(&self) -> ParsedTemplate {
        split_filter_and_nat(&self.contents)
    }
}

/// Result of one assembler pass over template text
#[derive(Debug, Default)]
pub struct ParsedTemplate {
    pub filter_rules: Vec<FirewallRule>,
    pub nat_rules: Vec<NatRule>,
    /// Comment lines from anywhere in the template, shared by both rule kinds
    pub comments: Vec<String>,
    pub errors: Vec<LineError>,
}

impl ParsedTemplate {
    /// True when every line decoded cleanly
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Renders the filter section (comments first)
    pub fn filter_text(&self) -> String {
        rule_line::rules_to_text(&self.filter_rules, &self.comments)
    }

    /// Renders the NAT section (comments first)
    pub fn nat_text(&self) -> String {
        nat_line::nat_rules_to_text(&self.nat_rules, &self.comments)
    }
}

/// Splits template text into filter rules, NAT rules, comments and errors.
///
/// Lines are routed to the NAT decoder iff they contain `-t=nat`. Errors are
/// tagged with their 1-based line number; a bad line never stops the pass.
pub fn split_filter_and_nat(text: &str) -> ParsedTemplate {
    let mut parsed = ParsedTemplate::default();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            parsed.comments.push(line.to_string());
            continue;
        }

        if is_nat_line(line) {
            match nat_line::parse_nat_line(line) {
                Ok(Some(rule)) => parsed.nat_rules.push(rule),
                Ok(None) => {}
                Err(source) => parsed.errors.push(LineError {
                    line: index + 1,
                    source,
                }),
            }
        } else {
            match rule_line::parse_line(line) {
                Ok(Some(rule)) => parsed.filter_rules.push(rule),
                Ok(None) => {}
                Err(source) => parsed.errors.push(LineError {
                    line: index + 1,
                    source,
                }),
            }
        }
    }

    if !parsed.errors.is_empty() {
        tracing::warn!(
            errors = parsed.errors.len(),
            "template parsed with line errors"
        );
    }
    parsed
}

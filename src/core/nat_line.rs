//! NAT-rule line codec
//!
//! Converts one [`NatRule`] to and from the CLI-flag line format:
//!
//! ```text
//! agent -m=insert -t=nat --nat-type=dnat -p=tcp --match-port=6080 --to-dest=192.168.30.180:8080
//! ```
//!
//! and produces (write-only) the legacy pipe-delimited smartfw wire form for
//! devices that speak that protocol. The same permissive tokenizer contract
//! as [`crate::core::rule_line`] applies: unknown tokens are ignored and
//! enum values default. A line missing `-t=nat` is rejected with
//! [`Error::NotNatRule`], distinct from a line missing the `agent ` prefix.
//!
//! `--to-dest=<ip>[:<port>]` splits on the *last* colon, which mis-parses
//! bare IPv6 literals. Known limitation of the legacy format, kept for
//! compatibility with deployed devices.

use crate::core::error::{Error, LineError, Result};
use crate::core::firewall::Protocol;
use crate::core::nat::{NatRule, NatType};

/// True when a template line should be routed to the NAT decoder
pub fn is_nat_line(line: &str) -> bool {
    line.contains("-t=nat")
}

/// Decodes one template line into a NAT rule.
///
/// Blank lines and `#` comments yield `Ok(None)`. The rule is seeded with
/// the editor defaults, so a line without `-s=`/`--match-ip=` keeps
/// `match_ip` as `ANY` rather than empty.
///
/// # Errors
///
/// Returns [`Error::UnrecognizedFormat`] when the line does not start with
/// the `agent ` prefix, and [`Error::NotNatRule`] when it lacks the `-t=nat`
/// marker.
pub fn parse_nat_line(line: &str) -> Result<Option<NatRule>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if !line.starts_with("agent ") {
        return Err(Error::unrecognized_format(line));
    }
    if !is_nat_line(line) {
        return Err(Error::not_nat_rule(line));
    }

    let mut rule = NatRule::dnat();
    for token in line.split_whitespace() {
        if let Some(value) = token.strip_prefix("--nat-type=") {
            rule.nat_type = NatType::from_token(value);
        } else if let Some(value) = token.strip_prefix("-p=") {
            rule.protocol = Protocol::from_token(value);
        } else if let Some(value) = token.strip_prefix("--match-port=") {
            rule.match_port = value.to_string();
        } else if let Some(value) = token.strip_prefix("--match-ip=") {
            rule.match_ip = value.to_string();
        } else if let Some(value) = token.strip_prefix("-s=") {
            rule.match_ip = value.to_string();
        } else if let Some(value) = token.strip_prefix("--to-dest=") {
            // Last-colon split; IPv6 literals are not representable here
            match value.rsplit_once(':') {
                Some((ip, port)) => {
                    rule.translate_ip = ip.to_string();
                    rule.translate_port = port.to_string();
                }
                None => rule.translate_ip = value.to_string(),
            }
        } else if let Some(value) = token.strip_prefix("--to-source=") {
            rule.translate_ip = value.to_string();
        } else if let Some(value) = token.strip_prefix("-i=") {
            rule.in_interface = value.to_string();
        } else if let Some(value) = token.strip_prefix("-o=") {
            rule.out_interface = value.to_string();
        } else if let Some(value) = token.strip_prefix("--desc=") {
            rule.description = value.to_string();
        }
        // Any other token (including -t=nat itself) is ignored.
    }
    Ok(Some(rule))
}

/// Encodes a NAT rule as one CLI-flag line.
///
/// The emitted fields branch on the translation kind: DNAT carries the match
/// port and translation target, SNAT the fixed source translation, and
/// MASQUERADE only the trigger and interfaces (its translation address comes
/// from the outbound interface at enforcement time).
pub fn nat_rule_to_line(rule: &NatRule) -> String {
    let mut line = format!(
        "agent -m=insert -t=nat --nat-type={} -p={}",
        rule.nat_type.as_str(),
        rule.protocol.as_str(),
    );

    match rule.nat_type {
        NatType::Dnat => {
            if !rule.match_port.is_empty() {
                line.push_str(" --match-port=");
                line.push_str(&rule.match_port);
            }
            if !rule.match_ip.is_empty() && rule.match_ip != "ANY" {
                line.push_str(" -s=");
                line.push_str(&rule.match_ip);
            }
            if !rule.translate_ip.is_empty() {
                line.push_str(" --to-dest=");
                line.push_str(&rule.translate_ip);
                if !rule.translate_port.is_empty() {
                    line.push(':');
                    line.push_str(&rule.translate_port);
                }
            }
        }
        NatType::Snat => {
            if !rule.match_ip.is_empty() {
                line.push_str(" -s=");
                line.push_str(&rule.match_ip);
            }
            if !rule.translate_ip.is_empty() {
                line.push_str(" --to-source=");
                line.push_str(&rule.translate_ip);
            }
            push_interfaces(&mut line, rule);
        }
        NatType::Masquerade => {
            if !rule.match_ip.is_empty() {
                line.push_str(" -s=");
                line.push_str(&rule.match_ip);
            }
            push_interfaces(&mut line, rule);
        }
    }

    if !rule.description.is_empty() {
        line.push_str(" --desc=");
        line.push_str(&rule.description);
    }
    line
}

fn push_interfaces(line: &mut String, rule: &NatRule) {
    if !rule.in_interface.is_empty() {
        line.push_str(" -i=");
        line.push_str(&rule.in_interface);
    }
    if !rule.out_interface.is_empty() {
        line.push_str(" -o=");
        line.push_str(&rule.out_interface);
    }
}

/// Encodes a NAT rule in the legacy smartfw pipe format.
///
/// Write-only: no decoder exists for this form. Field layout:
/// `req|INSERT|{id}|ANY|NAT|{matchIP}|{PROTO}?{TYPE}|{dest}|{ports}|{inIF}|{outIF}`.
pub fn nat_rule_to_smartfw(rule: &NatRule, id: &str) -> String {
    let match_ip = if rule.match_ip.is_empty() {
        "ANY"
    } else {
        rule.match_ip.as_str()
    };

    let (dest, ports) = match rule.nat_type {
        NatType::Dnat => (
            rule.translate_ip.clone(),
            format!("{},{}", rule.match_port, rule.translate_port),
        ),
        NatType::Snat => {
            let dest = if rule.translate_ip.is_empty() {
                "ANY".to_string()
            } else {
                rule.translate_ip.clone()
            };
            let ports = if rule.match_port.is_empty() {
                "ANY".to_string()
            } else {
                rule.match_port.clone()
            };
            (dest, ports)
        }
        NatType::Masquerade => ("ANY".to_string(), "ANY".to_string()),
    };

    format!(
        "req|INSERT|{id}|ANY|NAT|{match_ip}|{}?{}|{dest}|{ports}|{}|{}",
        rule.protocol.display_name(),
        rule.nat_type.display_name(),
        rule.in_interface,
        rule.out_interface,
    )
}

/// Parses a NAT-only template body, collecting rules, comments and per-line
/// errors. A bad line never aborts the remaining lines.
pub fn parse_text_to_nat_rules(text: &str) -> (Vec<NatRule>, Vec<String>, Vec<LineError>) {
    let mut rules = Vec::new();
    let mut comments = Vec::new();
    let mut errors = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            comments.push(line.to_string());
            continue;
        }
        match parse_nat_line(line) {
            Ok(Some(rule)) => rules.push(rule),
            Ok(None) => {}
            Err(source) => errors.push(LineError {
                line: index + 1,
                source,
            }),
        }
    }

    (rules, comments, errors)
}

/// Renders comments followed by NAT-rule lines, newline-joined.
pub fn nat_rules_to_text(rules: &[NatRule], comments: &[String]) -> String {
    let mut lines: Vec<String> = comments.to_vec();
    lines.extend(rules.iter().map(nat_rule_to_line));
    lines.join("\n")
}

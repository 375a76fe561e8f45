//! Filter-rule line codec
//!
//! Converts one [`FirewallRule`] to and from the CLI-flag line format:
//!
//! ```text
//! agent -m=insert -c=INPUT -p=tcp?flags=syn/syn -a=DROP --dport=80 --sip=10.0.0.0/8 --black
//! ```
//!
//! # Tokenizer contract
//!
//! Tokens are whitespace-delimited and matched against a fixed prefix table.
//! Unknown tokens are ignored — this is the parser's documented policy, so
//! that templates written by newer managers still load. Enum values that do
//! not match a known name take the field default. Only the line shape itself
//! is checked: anything that is not blank, not a comment, and does not start
//! with `agent ` is rejected with [`Error::UnrecognizedFormat`].

use crate::core::error::{Error, LineError, Result};
use crate::core::firewall::{Action, Chain, FirewallRule};
use crate::core::protocol::{format_protocol_with_options, parse_protocol_with_options};

/// Decodes one template line into a filter rule.
///
/// Blank lines and `#` comments yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`Error::UnrecognizedFormat`] when the line does not start with
/// the `agent ` prefix.
pub fn parse_line(line: &str) -> Result<Option<FirewallRule>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if !line.starts_with("agent ") {
        return Err(Error::unrecognized_format(line));
    }

    let mut rule = FirewallRule::default();
    for token in line.split_whitespace() {
        if let Some(value) = token.strip_prefix("-c=") {
            rule.chain = Chain::from_token(value);
        } else if let Some(value) = token.strip_prefix("-p=") {
            let (protocol, options) = parse_protocol_with_options(value);
            rule.protocol = protocol;
            rule.options = options;
        } else if let Some(value) = token.strip_prefix("-a=") {
            rule.action = Action::from_token(value);
        } else if let Some(value) = token.strip_prefix("--dport=") {
            rule.dport = value.to_string();
        } else if let Some(value) = token.strip_prefix("--sip=") {
            rule.sip = value.to_string();
        } else if let Some(value) = token.strip_prefix("--dip=") {
            rule.dip = value.to_string();
        } else if token == "--black" {
            rule.black = true;
        } else if token == "--white" {
            rule.white = true;
        }
        // Any other token is ignored; see module docs.
    }
    Ok(Some(rule))
}

/// Encodes a filter rule as one CLI-flag line.
///
/// Fixed field order: method, chain, protocol, action, then the optional
/// port/address fields, then the list flags.
pub fn rule_to_line(rule: &FirewallRule) -> String {
    let mut line = format!(
        "agent -m=insert -c={} -p={} -a={}",
        rule.chain.as_str(),
        format_protocol_with_options(rule.protocol, rule.options.as_ref()),
        rule.action.as_str(),
    );
    if !rule.dport.is_empty() {
        line.push_str(" --dport=");
        line.push_str(&rule.dport);
    }
    if !rule.sip.is_empty() {
        line.push_str(" --sip=");
        line.push_str(&rule.sip);
    }
    if !rule.dip.is_empty() {
        line.push_str(" --dip=");
        line.push_str(&rule.dip);
    }
    if rule.black {
        line.push_str(" --black");
    }
    if rule.white {
        line.push_str(" --white");
    }
    line
}

/// Parses a filter-only template body, collecting rules, comments and
/// per-line errors. A bad line never aborts the remaining lines.
pub fn parse_text_to_rules(text: &str) -> (Vec<FirewallRule>, Vec<String>, Vec<LineError>) {
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
        match parse_line(line) {
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

/// Renders comments followed by filter-rule lines, newline-joined.
pub fn rules_to_text(rules: &[FirewallRule], comments: &[String]) -> String {
    let mut lines: Vec<String> = comments.to_vec();
    lines.extend(rules.iter().map(rule_to_line));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::firewall::{Protocol, ProtocolOptions};

    #[test]
    fn test_blank_and_comment_yield_none() {
        assert!(parse_line("").unwrap().is_none());
        assert!(parse_line("   ").unwrap().is_none());
        assert!(parse_line("# drop everything").unwrap().is_none());
    }

    #[test]
    fn test_missing_prefix_is_unrecognized() {
        assert!(matches!(
            parse_line("iptables -A INPUT -j DROP"),
            Err(Error::UnrecognizedFormat { .. })
        ));
    }

    #[test]
    fn test_scenario_full_filter_line() {
        let rule = parse_line(
            "agent -m=insert -c=INPUT -p=tcp?flags=syn,rst,ack,fin/syn --dport=80 -a=DROP --sip=192.168.1.0/24",
        )
        .unwrap()
        .unwrap();
        assert_eq!(rule.chain, Chain::Input);
        assert_eq!(rule.protocol, Protocol::Tcp);
        assert_eq!(rule.options.unwrap().tcp_flags, "syn,rst,ack,fin/syn");
        assert_eq!(rule.dport, "80");
        assert_eq!(rule.action, Action::Drop);
        assert_eq!(rule.sip, "192.168.1.0/24");
        assert!(rule.dip.is_empty());
    }

    #[test]
    fn test_unknown_tokens_ignored_and_enums_default() {
        let rule = parse_line("agent -x=foo -c=BADCHAIN --rate=10 -a=LOG")
            .unwrap()
            .unwrap();
        assert_eq!(rule.chain, Chain::Input);
        assert_eq!(rule.action, Action::Drop);
    }

    #[test]
    fn test_black_white_flags() {
        let rule = parse_line("agent -m=insert -c=INPUT -p=any -a=DROP --sip=1.2.3.4 --black")
            .unwrap()
            .unwrap();
        assert!(rule.black);
        assert!(!rule.white);

        // Not mutually exclusive at this layer
        let both = parse_line("agent -c=INPUT -p=any -a=ACCEPT --black --white")
            .unwrap()
            .unwrap();
        assert!(both.black && both.white);
    }

    #[test]
    fn test_encode_fixed_order() {
        let rule = FirewallRule {
            chain: Chain::Input,
            protocol: Protocol::Tcp,
            options: Some(ProtocolOptions {
                tcp_flags: "syn/syn".to_string(),
                ..Default::default()
            }),
            action: Action::Drop,
            dport: "80".to_string(),
            ..FirewallRule::default()
        };
        assert_eq!(
            rule_to_line(&rule),
            "agent -m=insert -c=INPUT -p=tcp?flags=syn/syn -a=DROP --dport=80"
        );
    }

    #[test]
    fn test_line_round_trip() {
        let line = "agent -m=insert -c=INPUT -p=tcp?flags=syn/syn -a=DROP --dport=80";
        let rule = parse_line(line).unwrap().unwrap();
        assert_eq!(rule_to_line(&rule), line);
    }

    #[test]
    fn test_rule_round_trip() {
        let rule = FirewallRule {
            chain: Chain::Forward,
            protocol: Protocol::Udp,
            options: None,
            action: Action::Accept,
            dport: "53,123".to_string(),
            sip: "10.0.0.0/8".to_string(),
            dip: "8.8.8.8".to_string(),
            black: true,
            white: false,
        };
        let decoded = parse_line(&rule_to_line(&rule)).unwrap().unwrap();
        assert_eq!(decoded, rule);
    }

    #[test]
    fn test_parse_text_collects_errors_and_continues() {
        let text = "# comment\nagent -c=INPUT -p=tcp -a=DROP\nnot a rule line\nagent -c=OUTPUT -p=udp -a=ACCEPT\n";
        let (rules, comments, errors) = parse_text_to_rules(text);
        assert_eq!(rules.len(), 2);
        assert_eq!(comments, vec!["# comment".to_string()]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 3);
    }

    #[test]
    fn test_rules_to_text_comments_first() {
        let rules = vec![FirewallRule::default()];
        let comments = vec!["# web tier".to_string()];
        let text = rules_to_text(&rules, &comments);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# web tier");
        assert!(lines[1].starts_with("agent -m=insert"));
    }
}

//! Protocol-option codec
//!
//! Encodes and decodes the sub-grammar embedded inside a rule's protocol
//! field: `<proto>` or `<proto>?<key>=<value>&...`, e.g.
//! `tcp?flags=syn,ack/syn` or `icmp?type=3&code=0`.
//!
//! Recognized keys are `flags`, `type` and `code`; unrecognized keys are
//! silently dropped. An unknown protocol name defaults to `tcp`. Encoding
//! emits keys in the fixed order flags, type, code, so re-encoding a decoded
//! field is canonical: `decode(encode(decode(x))) == decode(x)` field-wise,
//! and `encode` is idempotent on its own output.
//!
//! The ICMP name/number tables live here as immutable static data.

use crate::core::error::{Error, Result};
use crate::core::firewall::{Protocol, ProtocolOptions};

/// ICMP type names understood by the rule editor, with their numbers
pub const ICMP_TYPE_TABLE: &[(&str, u8)] = &[
    ("echo-reply", 0),
    ("destination-unreachable", 3),
    ("source-quench", 4),
    ("echo-redirect", 5),
    ("echo-request", 8),
    ("time-exceeded", 11),
    ("parameter-problem", 12),
    ("timestamp-request", 13),
    ("timestamp-reply", 14),
    ("information-request", 15),
    ("information-reply", 16),
    ("addressmask-request", 17),
    ("addressmask-reply", 18),
];

/// ICMP code names for destination-unreachable (type 3)
pub const ICMP_CODE_TABLE: &[(&str, u8)] = &[
    ("net-unreachable", 0),
    ("host-unreachable", 1),
    ("protocol-unreachable", 2),
    ("port-unreachable", 3),
    ("fragmentation-needed", 4),
    ("source-route-failed", 5),
];

fn name_to_number(table: &[(&str, u8)], name: &str) -> Result<u8> {
    if let Some((_, n)) = table.iter().find(|(k, _)| *k == name) {
        return Ok(*n);
    }
    // Literal decimal fallback before giving up
    name.parse::<u8>()
        .map_err(|_| Error::unknown_identifier(name))
}

fn number_to_name(table: &[(&str, u8)], number: u8) -> String {
    table
        .iter()
        .find(|(_, n)| *n == number)
        .map_or_else(|| number.to_string(), |(k, _)| (*k).to_string())
}

/// Resolves an ICMP type name (or decimal string) to its number.
///
/// # Errors
///
/// Returns [`Error::UnknownIdentifier`] if the name is not in the table and
/// does not parse as a decimal integer.
pub fn icmp_type_name_to_number(name: &str) -> Result<u8> {
    name_to_number(ICMP_TYPE_TABLE, name)
}

/// Resolves an ICMP type number to its name, falling back to the decimal
/// string for numbers outside the table. Never fails.
pub fn icmp_type_number_to_name(number: u8) -> String {
    number_to_name(ICMP_TYPE_TABLE, number)
}

/// Resolves an ICMP code name (or decimal string) to its number.
///
/// # Errors
///
/// Returns [`Error::UnknownIdentifier`] if the name is not in the table and
/// does not parse as a decimal integer.
pub fn icmp_code_name_to_number(name: &str) -> Result<u8> {
    name_to_number(ICMP_CODE_TABLE, name)
}

/// Resolves an ICMP code number to its name, falling back to the decimal
/// string for numbers outside the table. Never fails.
pub fn icmp_code_number_to_name(number: u8) -> String {
    number_to_name(ICMP_CODE_TABLE, number)
}

/// Decodes a protocol field into a protocol and optional options.
///
/// An absent query string yields `None` options. Unknown protocol names
/// default to `tcp` and unknown query keys are dropped; neither is an error.
pub fn parse_protocol_with_options(field: &str) -> (Protocol, Option<ProtocolOptions>) {
    let (name, query) = match field.split_once('?') {
        Some((name, query)) => (name, Some(query)),
        None => (field, None),
    };

    let protocol = Protocol::from_token(name.trim());

    let Some(query) = query else {
        return (protocol, None);
    };

    let mut options = ProtocolOptions::default();
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "flags" => options.tcp_flags = value.to_string(),
            "type" => options.icmp_type = value.to_string(),
            "code" => options.icmp_code = value.to_string(),
            _ => {
                tracing::debug!(key, "dropping unrecognized protocol option");
            }
        }
    }

    if options.is_empty() {
        (protocol, None)
    } else {
        (protocol, Some(options))
    }
}

/// Encodes options alone as the `&`-joined query string, keys in the fixed
/// order flags, type, code, empty fields omitted.
pub fn format_options_only(options: &ProtocolOptions) -> String {
    let mut parts = Vec::with_capacity(3);
    if !options.tcp_flags.is_empty() {
        parts.push(format!("flags={}", options.tcp_flags));
    }
    if !options.icmp_type.is_empty() {
        parts.push(format!("type={}", options.icmp_type));
    }
    if !options.icmp_code.is_empty() {
        parts.push(format!("code={}", options.icmp_code));
    }
    parts.join("&")
}

/// Encodes a protocol and optional options back into a protocol field
pub fn format_protocol_with_options(
    protocol: Protocol,
    options: Option<&ProtocolOptions>,
) -> String {
    match options {
        Some(opts) if !opts.is_empty() => {
            format!("{}?{}", protocol.as_str(), format_options_only(opts))
        }
        _ => protocol.as_str().to_string(),
    }
}

//! Input validation for FWMS
//!
//! This module provides centralized validation for values typed into the
//! rule editor before they are serialized into template lines. The codecs
//! themselves stay permissive; validation is an editor/CLI concern.

use ipnetwork::IpNetwork;

/// Validates a destination-port field: empty, or a comma list of ports.
///
/// # Errors
///
/// Returns `Err` if any list entry is not a number in 1..=65535.
pub fn validate_port_list(input: &str) -> Result<(), String> {
    if input.is_empty() {
        return Ok(());
    }
    for entry in input.split(',') {
        let entry = entry.trim();
        match entry.parse::<u32>() {
            Ok(port) if (1..=65_535).contains(&port) => {}
            Ok(port) => return Err(format!("Port {port} out of range (1-65535)")),
            Err(_) => return Err(format!("Invalid port: {entry}")),
        }
    }
    Ok(())
}

/// Validates an address field: empty, the `ANY` sentinel, or a comma list of
/// IP addresses / CIDR networks.
///
/// # Errors
///
/// Returns `Err` if any list entry fails to parse as an address or network.
pub fn validate_ip_list(input: &str) -> Result<(), String> {
    if input.is_empty() || input == "ANY" {
        return Ok(());
    }
    for entry in input.split(',') {
        let entry = entry.trim();
        if entry.parse::<IpNetwork>().is_err() {
            return Err(format!("Invalid IP or network: {entry}"));
        }
    }
    Ok(())
}

/// Validates a network interface name.
///
/// Linux kernel interface name rules:
/// - Max 15 characters (IFNAMSIZ - 1)
/// - Alphanumeric, dot, dash, underscore only
/// - Cannot be "." or ".."
///
/// # Errors
///
/// Returns `Err` if interface name violates kernel constraints.
pub fn validate_interface(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Ok(());
    }

    if name.len() > 15 {
        return Err("Interface name too long (max 15 characters)".to_string());
    }

    if name == "." || name == ".." {
        return Err("Invalid interface name".to_string());
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
    {
        return Err("Interface name contains invalid characters".to_string());
    }

    Ok(())
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_port_list_accepts_all_valid_ports(ports in prop::collection::vec(1u16..=65535, 1..5)) {
            let list = ports.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
            prop_assert!(validate_port_list(&list).is_ok());
        }

        #[test]
        fn test_port_list_rejects_out_of_range(port in 65_536u32..1_000_000) {
            prop_assert!(validate_port_list(&port.to_string()).is_err());
        }

        #[test]
        fn test_interface_length_constraint(name in "[a-zA-Z0-9._-]{0,20}") {
            let result = validate_interface(&name);
            if name.len() <= 15 && name != "." && name != ".." {
                prop_assert!(result.is_ok());
            } else if name.len() > 15 {
                prop_assert!(result.is_err());
            }
        }

        #[test]
        fn test_interface_char_constraint(
            valid_prefix in "[a-zA-Z0-9._-]{1,10}",
            invalid_char in "[^a-zA-Z0-9._-]"
        ) {
            let invalid_name = format!("{valid_prefix}{invalid_char}");
            prop_assert!(validate_interface(&invalid_name).is_err());
        }
    }
}

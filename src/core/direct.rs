//! Direct-mode format translator
//!
//! Devices that do not speak the agent protocol expect the legacy
//! pipe-delimited smartfw format. Templates for them are authored in that
//! format and rewritten to CLI-flag lines just before deployment:
//!
//! ```text
//! req|INSERT|101|INPUT|ACCEPT|192.168.44.11|TCP|ANY|9090
//! ```
//!
//! becomes
//!
//! ```text
//! agent -m=insert -c=INPUT -p=tcp --dport=9090 -a=ACCEPT -s=192.168.44.11
//! ```
//!
//! The rewrite is lossy and one-directional: fields beyond index 8 are
//! ignored, and lines with fewer than 9 pipe-delimited fields are silently
//! dropped.

/// Rewrites smartfw-formatted template text into CLI-flag filter lines
pub fn translate_for_direct(smartfw_text: &str) -> String {
    let mut out = Vec::new();
    for line in smartfw_text.lines() {
        if let Some(translated) = translate_line(line.trim()) {
            out.push(translated);
        }
    }
    out.join("\n")
}

fn translate_line(line: &str) -> Option<String> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 9 {
        return None;
    }

    let method = parts[1].to_lowercase();
    let chain = parts[3];
    let action = parts[4];
    let src_ip = parts[5];
    let proto = parts[6].to_lowercase();
    let dport = parts[8];

    let mut out = format!("agent -m={method} -c={chain}");
    if !proto.is_empty() && proto != "any" {
        out.push_str(" -p=");
        out.push_str(&proto);
    }
    if !dport.is_empty() && dport != "ANY" {
        out.push_str(" --dport=");
        out.push_str(dport);
    }
    out.push_str(" -a=");
    out.push_str(action);
    if !src_ip.is_empty() && src_ip != "ANY" {
        out.push_str(" -s=");
        out.push_str(src_ip);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_full_line() {
        assert_eq!(
            translate_for_direct("req|INSERT|101|INPUT|ACCEPT|192.168.44.11|TCP|ANY|9090"),
            "agent -m=insert -c=INPUT -p=tcp --dport=9090 -a=ACCEPT -s=192.168.44.11"
        );
    }

    #[test]
    fn test_any_fields_omitted() {
        assert_eq!(
            translate_for_direct("req|INSERT|102|INPUT|DROP|ANY|ANY|ANY|ANY"),
            "agent -m=insert -c=INPUT -a=DROP"
        );
    }

    #[test]
    fn test_empty_proto_omitted() {
        assert_eq!(
            translate_for_direct("req|INSERT|103|OUTPUT|ACCEPT|10.0.0.1||ANY|443"),
            "agent -m=insert -c=OUTPUT --dport=443 -a=ACCEPT -s=10.0.0.1"
        );
    }

    #[test]
    fn test_short_lines_dropped() {
        assert_eq!(translate_for_direct("req|INSERT|104|INPUT"), "");
        assert_eq!(translate_for_direct("not pipes at all"), "");
    }

    #[test]
    fn test_extra_fields_ignored() {
        assert_eq!(
            translate_for_direct("req|INSERT|105|INPUT|ACCEPT|ANY|UDP|ANY|53|extra|more"),
            "agent -m=insert -c=INPUT -p=udp --dport=53 -a=ACCEPT"
        );
    }

    #[test]
    fn test_multi_line_translation_skips_bad_lines() {
        let text = "req|INSERT|1|INPUT|ACCEPT|ANY|TCP|ANY|22\nshort|line\nreq|INSERT|2|INPUT|DROP|ANY|ANY|ANY|ANY";
        let out = translate_for_direct(text);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "agent -m=insert -c=INPUT -p=tcp --dport=22 -a=ACCEPT");
        assert_eq!(lines[1], "agent -m=insert -c=INPUT -a=DROP");
    }
}

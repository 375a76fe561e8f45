//! Integration tests for the FWMS template codec
//!
//! These exercise the public API end to end: template text in, typed rules
//! out, canonical text back, plus the deploy-path conversions (smartfw
//! encoding and direct-mode translation).

use fwms::core::constraints;
use fwms::core::direct::translate_for_direct;
use fwms::core::nat_line::{nat_rule_to_line, nat_rule_to_smartfw};
use fwms::core::rule_line::rule_to_line;
use fwms::core::template::split_filter_and_nat;
use fwms::{Action, Chain, Error, NatType, Protocol, Template};

const OFFICE_TEMPLATE: &str = "\
# office gateway
# maintained by netops

agent -m=insert -c=INPUT -p=tcp --dport=22 -a=ACCEPT --sip=10.20.0.0/16
agent -m=insert -c=INPUT -p=tcp?flags=syn,rst,ack,fin/syn --dport=80,443 -a=ACCEPT
agent -m=insert -c=INPUT -p=icmp?type=8 -a=DROP
agent -m=insert -c=INPUT -p=any -a=DROP --sip=203.0.113.0/24 --black

agent -m=insert -t=nat --nat-type=dnat -p=tcp --match-port=6080 --to-dest=192.168.30.180:8080
agent -m=insert -t=nat --nat-type=masquerade -p=any -s=192.168.1.0/24 -o=eth1
";

#[test]
fn parses_a_realistic_template() {
    let template = Template::new("1.0.0", OFFICE_TEMPLATE);
    let parsed = template.parse();

    assert!(parsed.is_clean());
    assert_eq!(parsed.filter_rules.len(), 4);
    assert_eq!(parsed.nat_rules.len(), 2);
    assert_eq!(parsed.comments.len(), 2);

    let ssh = &parsed.filter_rules[0];
    assert_eq!(ssh.chain, Chain::Input);
    assert_eq!(ssh.protocol, Protocol::Tcp);
    assert_eq!(ssh.action, Action::Accept);
    assert_eq!(ssh.dport, "22");
    assert_eq!(ssh.sip, "10.20.0.0/16");

    let syn_only = &parsed.filter_rules[1];
    assert_eq!(
        syn_only.options.as_ref().unwrap().tcp_flags,
        "syn,rst,ack,fin/syn"
    );
    assert_eq!(syn_only.dport, "80,443");

    let blacklist = &parsed.filter_rules[3];
    assert_eq!(blacklist.protocol, Protocol::Any);
    assert!(blacklist.black);
    assert!(!blacklist.white);

    assert_eq!(parsed.nat_rules[0].nat_type, NatType::Dnat);
    assert_eq!(parsed.nat_rules[1].nat_type, NatType::Masquerade);
    assert_eq!(parsed.nat_rules[1].out_interface, "eth1");
}

#[test]
fn rendered_template_reparses_to_the_same_rules() {
    let parsed = split_filter_and_nat(OFFICE_TEMPLATE);

    let mut rendered = String::new();
    rendered.push_str(&parsed.filter_text());
    rendered.push('\n');
    rendered.push_str(&parsed.nat_text());

    let reparsed = split_filter_and_nat(&rendered);
    assert!(reparsed.is_clean());
    assert_eq!(reparsed.filter_rules, parsed.filter_rules);
    assert_eq!(reparsed.nat_rules, parsed.nat_rules);
}

#[test]
fn every_parsed_rule_passes_constraint_checks() {
    let parsed = split_filter_and_nat(OFFICE_TEMPLATE);
    for rule in &parsed.filter_rules {
        assert_eq!(constraints::filter_rule_problem(rule), None);
    }
    for rule in &parsed.nat_rules {
        assert_eq!(constraints::nat_rule_problem(rule), None, "{rule:?}");
    }
}

#[test]
fn bad_lines_are_reported_with_numbers_and_do_not_abort() {
    let text = "# header\n\
                agent -m=insert -c=INPUT -p=tcp -a=ACCEPT\n\
                ip6tables -A INPUT -j DROP\n\
                agent -m=insert -c=OUTPUT -p=udp -a=DROP\n";
    let parsed = split_filter_and_nat(text);
    assert_eq!(parsed.filter_rules.len(), 2);
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].line, 3);
    assert!(matches!(
        parsed.errors[0].source,
        Error::UnrecognizedFormat { .. }
    ));
}

#[test]
fn nat_rules_encode_for_both_wire_protocols() {
    let parsed = split_filter_and_nat(OFFICE_TEMPLATE);
    let dnat = &parsed.nat_rules[0];

    assert_eq!(
        nat_rule_to_line(dnat),
        "agent -m=insert -t=nat --nat-type=dnat -p=tcp --match-port=6080 --to-dest=192.168.30.180:8080"
    );
    assert_eq!(
        nat_rule_to_smartfw(dnat, "42"),
        "req|INSERT|42|ANY|NAT|ANY|TCP?DNAT|192.168.30.180|6080,8080||"
    );

    let masq = &parsed.nat_rules[1];
    assert_eq!(
        nat_rule_to_smartfw(masq, "43"),
        "req|INSERT|43|ANY|NAT|192.168.1.0/24|ANY?MASQUERADE|ANY|ANY||eth1"
    );
}

#[test]
fn direct_mode_translation_feeds_the_filter_codec() {
    let legacy = "\
req|INSERT|101|INPUT|ACCEPT|192.168.44.11|TCP|ANY|9090
req|INSERT|102|INPUT|DROP|ANY|ANY|ANY|ANY
malformed|line
req|INSERT|103|OUTPUT|REJECT|ANY|UDP|ANY|53|trailer";

    let translated = translate_for_direct(legacy);
    assert_eq!(
        translated.lines().next().unwrap(),
        "agent -m=insert -c=INPUT -p=tcp --dport=9090 -a=ACCEPT -s=192.168.44.11"
    );

    let parsed = split_filter_and_nat(&translated);
    assert!(parsed.is_clean());
    assert_eq!(parsed.filter_rules.len(), 3);
    assert_eq!(parsed.filter_rules[1].protocol, Protocol::Tcp); // default, proto omitted
    assert_eq!(parsed.filter_rules[2].action, Action::Reject);
    assert_eq!(parsed.filter_rules[2].dport, "53");
}

#[test]
fn template_json_matches_the_storage_schema() {
    let parsed = split_filter_and_nat(OFFICE_TEMPLATE);
    let template = Template::new("3.2.1", parsed.filter_text());

    let json = serde_json::to_value(&template).unwrap();
    assert_eq!(json["version"], "3.2.1");
    assert!(
        json["contents"]
            .as_str()
            .unwrap()
            .contains("agent -m=insert")
    );

    let back: Template = serde_json::from_value(json).unwrap();
    assert_eq!(back, template);
}

#[test]
fn round_trip_preserves_rule_lines_byte_for_byte() {
    let lines = [
        "agent -m=insert -c=INPUT -p=tcp?flags=syn/syn -a=DROP --dport=80",
        "agent -m=insert -c=FORWARD -p=udp -a=ACCEPT --dport=53 --sip=10.0.0.0/8 --dip=8.8.8.8",
        "agent -m=insert -c=INPUT -p=icmp?type=3&code=0 -a=REJECT",
        "agent -m=insert -c=INPUT -p=any -a=DROP --sip=203.0.113.9 --black --white",
    ];
    for line in lines {
        let parsed = split_filter_and_nat(line);
        assert_eq!(rule_to_line(&parsed.filter_rules[0]), line);
    }
}

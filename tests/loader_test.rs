//! Rule-file loading through the public API.

use ecs_router::rules::{load_rules_file, LoadError, LoadSummary};
use ecs_router::{load_table, LinearTable, RoutingTable, TrieTable};

mod common;
use common::{check_route, rule_file};

#[test]
fn test_valid_file() {
    let file = rule_file(
        "
2001:db8:aaaa::/48 101
2001:db8:aaaa::/56 101
",
    );
    let table: TrieTable = load_table(file.path()).unwrap();

    check_route(&table, "2001:db8:aaaa::1/64", 101, 56);
    check_route(&table, "2001:db8:aaaa:cc00::/56", 101, 48);
    check_route(&table, "2001::/16", 0, -1);
}

#[test]
fn test_summary_counts() {
    let file = rule_file("::/0 1\n\n2001:db8::/32 1\n2001:db8::/32 1\n");
    let mut table = TrieTable::new();
    let summary = load_rules_file(file.path(), &mut table).unwrap();
    assert_eq!(
        summary,
        LoadSummary {
            records: 3,
            rules: 2
        }
    );
}

#[test]
fn test_invalid_cidr() {
    let file = rule_file("2001:db8:xyz::/48 100");
    let err = load_table::<TrieTable>(file.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse CIDR"), "{err}");
    assert_eq!(err.line(), Some(1));
}

#[test]
fn test_invalid_pop_id() {
    let file = rule_file("2001:db8::/48 abc");
    let err = load_table::<TrieTable>(file.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse PoP ID"), "{err}");
}

#[test]
fn test_wrong_field_count() {
    let file = rule_file("2001:db8::/48 100 extra");
    let err = load_table::<TrieTable>(file.path()).unwrap_err();
    assert!(err.to_string().contains("expected 2 fields"), "{err}");
    assert!(err.to_string().contains("got 3"), "{err}");
}

#[test]
fn test_ipv4_rule() {
    let file = rule_file("192.168.1.0/24 100");
    let err = load_table::<TrieTable>(file.path()).unwrap_err();
    assert!(err.to_string().contains("expected IPv6 subnet mask"), "{err}");
}

#[test]
fn test_file_with_conflict() {
    let file = rule_file(
        "
2001:db8::/32 100
2001:db8:aaaa::/48 200
",
    );
    let err = load_table::<TrieTable>(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Insert { line: 3, .. }), "{err:?}");
    assert!(err.to_string().contains("conflicts with broader rule"), "{err}");

    // the oracle has no conflict concept
    let linear: LinearTable = load_table(file.path()).unwrap();
    assert_eq!(linear.len(), 2);
    check_route(&linear, "2001:db8:aaaa::1/64", 200, 48);
}

#[test]
fn test_partial_table_stays_usable() {
    let file = rule_file("2001:db8::/32 100\n2001:db8:aaaa::/48 200\n2001:db9::/32 300\n");
    let mut table = TrieTable::new();
    assert!(load_rules_file(file.path(), &mut table).is_err());

    check_route(&table, "2001:db8:aaaa::1/64", 100, 32);
    check_route(&table, "2001:db9::1/128", 0, -1);
}

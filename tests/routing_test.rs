//! End-to-end routing behaviour of the trie table.

use ecs_router::routing::{ConflictError, InsertError};
use ecs_router::{PopId, RouteMatch, RoutingTable, TrieTable};

mod common;
use common::{build, check_route, net};

#[test]
fn test_empty_table_never_matches() {
    let table = TrieTable::new();
    for query in ["::/0", "::1/128", "2001:db8::1/128", "ffff:ffff::/32", "10.0.0.1/32"] {
        check_route(&table, query, 0, -1);
    }
}

#[test]
fn test_default_route() {
    let table: TrieTable = build(&[("::/0", 42)]);
    check_route(&table, "2001:db8::1/128", 42, 0);
    check_route(&table, "ffff::/16", 42, 0);
}

#[test]
fn test_host_route_and_covering_prefix() {
    let table: TrieTable = build(&[("2001:db8::1/128", 7), ("2001:db8::/32", 7)]);
    check_route(&table, "2001:db8::1/128", 7, 128);
    check_route(&table, "2001:db8::2/128", 7, 32);
}

#[test]
fn test_idempotent_insert_keeps_behaviour() {
    let rules = [("2001:db8::/32", 5), ("2001:db8:aaaa::/48", 5)];
    let once: TrieTable = build(&rules);
    let mut twice: TrieTable = build(&rules);
    for (cidr, pop) in rules {
        twice.insert(&net(cidr), PopId(pop)).unwrap();
    }

    assert_eq!(once.len(), twice.len());
    assert_eq!(once.node_count(), twice.node_count());
    for query in ["2001:db8:aaaa::1/128", "2001:db8:bbbb::/48", "2002::/16"] {
        assert_eq!(once.route(&net(query)), twice.route(&net(query)), "{query}");
    }
}

#[test]
fn test_ancestor_conflict_leaves_table_unchanged() {
    let mut table: TrieTable = build(&[("2001:db8::/32", 100)]);
    let err = table.insert(&net("2001:db8:aaaa::/48"), PopId(200)).unwrap_err();
    assert!(matches!(err, InsertError::Conflict(ConflictError::Ancestor { .. })));

    for query in ["2001:db8:aaaa::1/64", "2001:db8:bbbb::1/64", "2001:db8::/32"] {
        check_route(&table, query, 100, 32);
    }
}

#[test]
fn test_descendant_conflict_leaves_table_unchanged() {
    let mut table: TrieTable = build(&[("2001:db8:aaaa::/48", 200)]);
    let err = table.insert(&net("2001:db8::/32"), PopId(100)).unwrap_err();
    assert!(matches!(err, InsertError::Conflict(ConflictError::Descendant { .. })));

    check_route(&table, "2001:db8:aaaa::1/64", 200, 48);
    check_route(&table, "2001:db8:bbbb::1/64", 0, -1);
}

#[test]
fn test_conflict_symmetry() {
    // A then conflicting B must behave exactly like A alone
    let only_a: TrieTable = build(&[("2001:db8::/32", 1), ("2001:db8:1::/48", 1)]);
    let mut a_then_b: TrieTable = build(&[("2001:db8::/32", 1), ("2001:db8:1::/48", 1)]);
    assert!(a_then_b.insert(&net("2001:db8:1:2::/64"), PopId(2)).is_err());
    assert!(a_then_b.insert(&net("2001:db8::/32"), PopId(3)).is_err());
    assert!(a_then_b.insert(&net("::/0"), PopId(4)).is_err());

    assert_eq!(only_a.node_count(), a_then_b.node_count());
    assert_eq!(only_a.rules(), a_then_b.rules());
    for query in ["2001:db8:1:2::1/128", "2001:db8:1::/48", "2001:db8:ffff::/48", "::/0"] {
        assert_eq!(only_a.route(&net(query)), a_then_b.route(&net(query)), "{query}");
    }
}

#[test]
fn test_disjoint_rules_may_use_different_pops() {
    let table: TrieTable = build(&[
        ("2001:db8:aaaa::/48", 1),
        ("2001:db8:bbbb::/48", 2),
        ("2001:db9::/32", 3),
        ("2001:db8:aaaa:ff00::/56", 1),
    ]);
    check_route(&table, "2001:db8:aaaa:ff00::1/128", 1, 56);
    check_route(&table, "2001:db8:aaaa:1::/64", 1, 48);
    check_route(&table, "2001:db8:bbbb:1::/64", 2, 48);
    check_route(&table, "2001:db9:1::/48", 3, 32);
    check_route(&table, "2001:db8:cccc::/48", 0, -1);
}

#[test]
fn test_query_prefix_length_is_not_consulted() {
    // only the network address of the query is walked
    let table: TrieTable = build(&[("2001:db8::/48", 9)]);
    check_route(&table, "2001:db8::/32", 9, 48);
    check_route(&table, "2001:db8::/16", 0, -1);
}

#[test]
fn test_route_none_is_no_match() {
    let table: TrieTable = build(&[("::/0", 1)]);
    assert_eq!(table.route(None::<&ipnet::IpNet>), RouteMatch::NO_MATCH);
}

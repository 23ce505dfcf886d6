//! Shared utilities for integration tests.

use std::io::Write;

use ecs_router::{PopId, RouteMatch, RoutingTable};
use ipnet::IpNet;

/// Parse a CIDR string, panicking on bad test input.
pub fn net(cidr: &str) -> IpNet {
    cidr.parse()
        .unwrap_or_else(|e| panic!("bad test CIDR '{cidr}': {e}"))
}

/// Insert every rule, panicking on the first rejection.
#[allow(dead_code)]
pub fn build<T: RoutingTable + Default>(rules: &[(&str, u16)]) -> T {
    let mut table = T::default();
    for (cidr, pop) in rules {
        table
            .insert(&net(cidr), PopId(*pop))
            .unwrap_or_else(|e| panic!("insert({cidr}, {pop}): {e}"));
    }
    table
}

/// Assert the lookup result for `query`.
#[allow(dead_code)]
pub fn check_route<T: RoutingTable>(table: &T, query: &str, pop: u16, scope: i16) {
    let got = table.route(&net(query));
    assert_eq!(
        got,
        RouteMatch {
            pop: PopId(pop),
            scope
        },
        "route({query})"
    );
}

/// Write `content` to a temporary rule file.
#[allow(dead_code)]
pub fn rule_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

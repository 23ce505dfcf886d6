//! Linear-scan routing table.
//!
//! Reference oracle for [`TrieTable`](crate::routing::TrieTable): every lookup
//! scans all rules and keeps the longest containing prefix. It has no notion
//! of conflicts; among equal-length matches the rule inserted last wins.

use std::net::Ipv6Addr;

use ipnet::{IpNet, Ipv6Net};

use crate::routing::bits::{validate_subnet, Address};
use crate::routing::error::InsertError;
use crate::routing::{PopId, RouteMatch, RoutingTable};

#[derive(Debug, Default, Clone)]
pub struct LinearTable {
    entries: Vec<(Ipv6Net, PopId)>,
}

impl LinearTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(Ipv6Net, PopId)] {
        &self.entries
    }
}

impl RoutingTable for LinearTable {
    fn insert<'a>(&mut self, subnet: impl Into<Option<&'a IpNet>>, pop: PopId) -> Result<(), InsertError> {
        let subnet = validate_subnet(subnet.into())?;
        self.entries.push((subnet.trunc(), pop));
        Ok(())
    }

    fn route<'a>(&self, query: impl Into<Option<&'a IpNet>>) -> RouteMatch {
        let Some(query) = query.into() else {
            return RouteMatch::NO_MATCH;
        };
        let addr: Ipv6Addr = Address::from(query.network()).into();

        let mut best = RouteMatch::NO_MATCH;
        for (net, pop) in &self.entries {
            if net.contains(&addr) && i16::from(net.prefix_len()) >= best.scope {
                best = RouteMatch::new(*pop, net.prefix_len());
            }
        }
        best
    }

    /// Counts every accepted insert, duplicates included.
    fn len(&self) -> usize {
        self.entries.len()
    }
}

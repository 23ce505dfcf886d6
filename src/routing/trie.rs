//! Bit-trie routing table.
//!
//! # Responsibilities
//! - Store rules at the node whose depth equals their prefix length
//! - Reject rules that disagree with broader, equal or narrower rules
//! - Longest-prefix match in at most 128 steps
//!
//! # Design Decisions
//! - Uncompressed binary trie: one node per bit, children owned by `Box`
//! - Nodes are created lazily on insert and never removed
//! - Lookup keeps the deepest rule-bearing node on the query's bit path

use ipnet::{IpNet, Ipv6Net};
use std::net::Ipv6Addr;

use crate::routing::bits::{validate_subnet, Address};
use crate::routing::conflict::find_conflict;
use crate::routing::error::InsertError;
use crate::routing::{PopId, RouteMatch, Rule, RoutingTable};

/// One bit position of the address space.
#[derive(Debug, Default)]
pub(crate) struct Node {
    children: [Option<Box<Node>>; 2],
    pub(crate) rule: Option<Rule>,
}

impl Node {
    pub(crate) fn child(&self, bit: u8) -> Option<&Node> {
        self.children[usize::from(bit)].as_deref()
    }

    pub(crate) fn children(&self) -> impl Iterator<Item = &Node> + '_ {
        self.children.iter().filter_map(|c| c.as_deref())
    }
}

/// Longest-prefix-match table over 128-bit addresses.
#[derive(Debug)]
pub struct TrieTable {
    root: Node,
    rules: usize,
    nodes: usize,
}

impl Default for TrieTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TrieTable {
    /// Create an empty table (a single root node, no rules).
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            rules: 0,
            nodes: 1,
        }
    }

    /// Number of trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    pub(crate) fn root(&self) -> &Node {
        &self.root
    }

    /// All installed rules as `(prefix, PoP)`, shorter prefixes first along each path.
    pub fn rules(&self) -> Vec<(Ipv6Net, PopId)> {
        let mut out = Vec::with_capacity(self.rules);
        let mut stack: Vec<(&Node, u128, u8)> = vec![(&self.root, 0, 0)];

        while let Some((node, bits, depth)) = stack.pop() {
            if let Some(rule) = node.rule {
                // depth <= 128 by construction
                if let Ok(net) = Ipv6Net::new(Ipv6Addr::from(bits), depth) {
                    out.push((net, rule.pop));
                }
            }
            // push 1 before 0 so the 0 branch is visited first
            for bit in [1u8, 0] {
                if let Some(child) = node.child(bit) {
                    let bits = bits | (u128::from(bit) << (127 - u32::from(depth)));
                    stack.push((child, bits, depth + 1));
                }
            }
        }
        out
    }

    /// Walk (and grow) the path for the first `prefix_len` bits of `address`.
    fn grow_path(&mut self, address: &Address, prefix_len: usize) -> &mut Node {
        let Self { root, nodes, .. } = self;
        let mut node = root;
        for bit in address.bits().take(prefix_len) {
            node = node.children[usize::from(bit)]
                .get_or_insert_with(|| {
                    *nodes += 1;
                    Box::default()
                })
                .as_mut();
        }
        node
    }

    /// Lookup by bare address, bypassing subnet handling.
    pub fn route_addr(&self, address: &Address) -> RouteMatch {
        let mut node = &self.root;
        let mut best = node.rule;

        for bit in address.bits() {
            match node.child(bit) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(rule) = node.rule {
                best = Some(rule);
            }
        }

        best.map_or(RouteMatch::NO_MATCH, RouteMatch::from)
    }
}

impl RoutingTable for TrieTable {
    fn insert<'a>(&mut self, subnet: impl Into<Option<&'a IpNet>>, pop: PopId) -> Result<(), InsertError> {
        let subnet = validate_subnet(subnet.into())?;
        let address = Address::from(subnet.network());
        let prefix_len = subnet.prefix_len();

        find_conflict(&self.root, &subnet, &address, pop)?;

        let node = self.grow_path(&address, usize::from(prefix_len));
        let fresh = node.rule.is_none();
        node.rule = Some(Rule {
            pop,
            scope: prefix_len,
        });
        if fresh {
            self.rules += 1;
        }

        tracing::trace!(subnet = %subnet, pop = %pop, fresh, "Rule installed");
        Ok(())
    }

    fn route<'a>(&self, query: impl Into<Option<&'a IpNet>>) -> RouteMatch {
        match query.into() {
            Some(query) => self.route_addr(&Address::from(query.network())),
            None => RouteMatch::NO_MATCH,
        }
    }

    fn len(&self) -> usize {
        self.rules
    }
}

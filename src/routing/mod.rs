//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Load phase (single writer):
//!     (subnet, PoP) records
//!     → bits.rs (validate, normalize to 128 bits)
//!     → conflict.rs (ancestor / exact / descendant checks)
//!     → trie.rs (install rule at node of depth = prefix length)
//!
//! Query phase (any number of readers):
//!     ECS subnet
//!     → bits.rs (normalize)
//!     → trie.rs (walk bit path, keep deepest rule)
//!     → Return: RouteMatch (PoP, scope) or NO_MATCH
//! ```
//!
//! # Design Decisions
//! - Rules loaded once, table immutable afterwards (shared without locks)
//! - Overlapping rules must agree on PoP, otherwise insertion fails
//! - No-match is a normal result (scope -1), never an error
//! - `LinearTable` exists as a reference oracle for the trie

pub mod bits;
pub mod conflict;
pub mod error;
pub mod linear;
pub mod trie;

use std::fmt;

use ipnet::IpNet;
use serde::{Deserialize, Serialize};

pub use bits::Address;
pub use error::{ConflictError, InsertError, ValidationError};
pub use linear::LinearTable;
pub use trie::TrieTable;

/// Point-of-Presence identifier.
///
/// `0` is a valid PoP; absence is expressed through [`RouteMatch::scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PopId(pub u16);

impl From<u16> for PopId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<PopId> for u16 {
    fn from(id: PopId) -> Self {
        id.0
    }
}

impl fmt::Display for PopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An installed rule: the PoP it designates and its prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub pop: PopId,
    pub scope: u8,
}

/// Result of a lookup.
///
/// `scope` is the matched prefix length in `0..=128`, or `-1` when nothing
/// matched. Callers must key on `scope`, not on `pop`, to detect a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub pop: PopId,
    pub scope: i16,
}

impl RouteMatch {
    /// Returned when no installed rule covers the query.
    pub const NO_MATCH: RouteMatch = RouteMatch {
        pop: PopId(0),
        scope: -1,
    };

    pub fn new(pop: impl Into<PopId>, scope: u8) -> Self {
        Self {
            pop: pop.into(),
            scope: i16::from(scope),
        }
    }

    pub fn is_match(&self) -> bool {
        self.scope >= 0
    }

    /// The matched PoP and prefix length, if any.
    pub fn matched(self) -> Option<(PopId, u8)> {
        u8::try_from(self.scope).ok().map(|scope| (self.pop, scope))
    }
}

impl From<Rule> for RouteMatch {
    fn from(rule: Rule) -> Self {
        RouteMatch::new(rule.pop, rule.scope)
    }
}

impl fmt::Display for RouteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pop={} scope={}", self.pop, self.scope)
    }
}

/// Capability shared by the trie and the linear-scan oracle.
///
/// `insert` is only ever called from the load phase; `route` may be called
/// concurrently once loading has finished.
pub trait RoutingTable {
    /// Install `subnet → pop`. A `None` subnet is rejected as nil.
    fn insert<'a>(&mut self, subnet: impl Into<Option<&'a IpNet>>, pop: PopId) -> Result<(), InsertError>;

    /// Longest-prefix match for the query's network address.
    fn route<'a>(&self, query: impl Into<Option<&'a IpNet>>) -> RouteMatch;

    /// Number of distinct rules currently installed.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

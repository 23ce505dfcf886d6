//! Insert error taxonomy.

use ipnet::Ipv6Net;
use thiserror::Error;

use crate::routing::PopId;

/// Subnet rejected before any traversal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No subnet was supplied.
    #[error("cannot insert nil subnet")]
    NilSubnet,

    /// The subnet mask is not declared over 128 bits.
    #[error("expected IPv6 subnet mask, got /{prefix_len} with {mask_bits} bits")]
    WrongAddressFamily { prefix_len: u8, mask_bits: u8 },
}

/// New rule overlaps an installed rule that designates another PoP.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictError {
    /// A broader rule on the path disagrees.
    #[error("conflict: new rule {subnet} (PoP {pop}) conflicts with broader rule at scope /{existing_scope} (PoP {existing_pop})")]
    Ancestor {
        subnet: Ipv6Net,
        pop: PopId,
        existing_scope: u8,
        existing_pop: PopId,
    },

    /// A rule for the very same prefix disagrees.
    #[error("conflict: rule for exact prefix {subnet} exists with different PoP {existing_pop} (new PoP {pop})")]
    ExactScope {
        subnet: Ipv6Net,
        pop: PopId,
        existing_pop: PopId,
    },

    /// A narrower rule below the new one disagrees.
    #[error("conflict: new rule {subnet} (PoP {pop}) conflicts with existing narrower rule at scope /{existing_scope} (PoP {existing_pop})")]
    Descendant {
        subnet: Ipv6Net,
        pop: PopId,
        existing_scope: u8,
        existing_pop: PopId,
    },
}

impl ConflictError {
    /// Scope and PoP of the installed rule that caused the conflict.
    pub fn existing(&self) -> (u8, PopId) {
        match self {
            ConflictError::Ancestor {
                existing_scope,
                existing_pop,
                ..
            }
            | ConflictError::Descendant {
                existing_scope,
                existing_pop,
                ..
            } => (*existing_scope, *existing_pop),
            ConflictError::ExactScope {
                subnet,
                existing_pop,
                ..
            } => (subnet.prefix_len(), *existing_pop),
        }
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ConflictError::Ancestor { .. } => "ancestor",
            ConflictError::ExactScope { .. } => "exact",
            ConflictError::Descendant { .. } => "descendant",
        }
    }
}

/// Any reason an insert can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),
}

impl InsertError {
    pub fn kind(&self) -> &'static str {
        match self {
            InsertError::Validation(_) => "validation",
            InsertError::Conflict(c) => c.kind(),
        }
    }
}

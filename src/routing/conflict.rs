//! Conflict detection for rule insertion.
//!
//! # Responsibilities
//! - Ancestor check: every rule on the path above the new one
//! - Exact check: a rule already installed at the same scope
//! - Descendant check: every rule in the subtree below the new one
//!
//! # Design Decisions
//! - Runs read-only before the trie is touched, so a rejected insert leaves
//!   no trace (not even empty path nodes)
//! - Descendant scan uses an explicit stack; depth is bounded by 128 anyway
//! - The first conflicting rule found is reported

use ipnet::Ipv6Net;

use crate::routing::bits::Address;
use crate::routing::error::ConflictError;
use crate::routing::trie::Node;
use crate::routing::PopId;

/// Check whether installing `subnet → pop` would contradict an existing rule.
pub(crate) fn find_conflict(
    root: &Node,
    subnet: &Ipv6Net,
    address: &Address,
    pop: PopId,
) -> Result<(), ConflictError> {
    let prefix_len = usize::from(subnet.prefix_len());

    let mut node = root;
    for bit in address.bits().take(prefix_len) {
        check_ancestor(node, subnet, pop)?;
        match node.child(bit) {
            Some(child) => node = child,
            // nothing installed at or below the target yet
            None => return Ok(()),
        }
    }

    check_exact(node, subnet, pop)?;
    check_descendants(node, subnet, pop)
}

fn check_ancestor(node: &Node, subnet: &Ipv6Net, pop: PopId) -> Result<(), ConflictError> {
    match node.rule {
        Some(rule) if rule.pop != pop => Err(ConflictError::Ancestor {
            subnet: *subnet,
            pop,
            existing_scope: rule.scope,
            existing_pop: rule.pop,
        }),
        _ => Ok(()),
    }
}

fn check_exact(node: &Node, subnet: &Ipv6Net, pop: PopId) -> Result<(), ConflictError> {
    match node.rule {
        Some(rule) if rule.pop != pop => Err(ConflictError::ExactScope {
            subnet: *subnet,
            pop,
            existing_pop: rule.pop,
        }),
        _ => Ok(()),
    }
}

/// Scan the whole subtree under `start` (excluding `start` itself).
fn check_descendants(start: &Node, subnet: &Ipv6Net, pop: PopId) -> Result<(), ConflictError> {
    let mut stack: Vec<&Node> = start.children().collect();

    while let Some(node) = stack.pop() {
        if let Some(rule) = node.rule {
            if rule.pop != pop {
                return Err(ConflictError::Descendant {
                    subnet: *subnet,
                    pop,
                    existing_scope: rule.scope,
                    existing_pop: rule.pop,
                });
            }
        }
        stack.extend(node.children());
    }
    Ok(())
}

//! Metrics collection.
//!
//! # Metrics
//! - `ecs_rules_loaded_total` (counter): rules accepted by the loader
//! - `ecs_rules_rejected_total` (counter): rejected records, by `reason`
//!   (`format`, `validation`, `ancestor`, `exact`, `descendant`)
//! - `ecs_route_lookups_total` (counter): lookups served, by `result` (`hit`, `miss`)

use metrics::counter;

use crate::routing::RouteMatch;

pub fn record_rule_loaded() {
    counter!("ecs_rules_loaded_total").increment(1);
}

pub fn record_rule_rejected(reason: &'static str) {
    counter!("ecs_rules_rejected_total", "reason" => reason).increment(1);
}

pub fn record_lookup(result: &RouteMatch) {
    let outcome = if result.is_match() { "hit" } else { "miss" };
    counter!("ecs_route_lookups_total", "result" => outcome).increment(1);
}

//! ECS subnet to PoP routing library.
//!
//! Resolves an EDNS Client-Subnet prefix to the Point-of-Presence of the most
//! specific configured rule (longest-prefix match over 128-bit addresses).
//!
//! ```
//! use ecs_router::{PopId, RouteMatch, RoutingTable, TrieTable};
//! use ipnet::IpNet;
//!
//! let net = |s: &str| s.parse::<IpNet>().unwrap();
//!
//! let mut table = TrieTable::new();
//! table.insert(&net("2001:db8::/32"), PopId(7)).unwrap();
//! table.insert(&net("2001:db8::1/128"), PopId(7)).unwrap();
//!
//! assert_eq!(table.route(&net("2001:db8::1/128")), RouteMatch::new(7u16, 128));
//! assert_eq!(table.route(&net("2001:db8::2/128")), RouteMatch::new(7u16, 32));
//! assert_eq!(table.route(&net("2002::/16")), RouteMatch::NO_MATCH);
//! ```

pub mod config;
pub mod observability;
pub mod routing;
pub mod rules;

pub use config::schema::RouterConfig;
pub use routing::{LinearTable, PopId, RouteMatch, RoutingTable, TrieTable};
pub use rules::{load_rules, load_rules_file, load_table, LoadError};

//! Rule loading subsystem.
//!
//! # Data Flow
//! ```text
//! rule file (one "<CIDR> <PoP>" record per line)
//!     → parser.rs (split fields, parse subnet and PoP ID)
//!     → loader.rs (insert into any RoutingTable, in file order)
//!     → loaded table, ready for read-only lookups
//! ```
//!
//! # Design Decisions
//! - Blank lines are skipped, everything else must be a full record
//! - Loading stops at the first bad record or rejected insert
//! - Errors carry the 1-based line number and the offending text

pub mod loader;
pub mod parser;

pub use loader::{load_rules, load_rules_file, load_table, LoadError, LoadSummary};
pub use parser::{parse_record, Record, RecordError};

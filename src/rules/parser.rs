//! Rule record parsing.

use std::num::ParseIntError;

use ipnet::{AddrParseError, IpNet};
use thiserror::Error;

use crate::routing::PopId;

/// A single `<CIDR> <PoP>` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub subnet: IpNet,
    pub pop: PopId,
}

/// Malformed record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected 2 fields (ECS subnet, PoP ID), got {found}")]
    FieldCount { found: usize },

    #[error("failed to parse CIDR '{text}': {source}")]
    Subnet { text: String, source: AddrParseError },

    #[error("failed to parse PoP ID '{text}': {source}")]
    PopId { text: String, source: ParseIntError },
}

/// Parse one line. Blank lines yield `Ok(None)`.
///
/// The subnet is truncated to its network address, so `2001:db8::1/32`
/// is read as `2001:db8::/32`.
pub fn parse_record(line: &str) -> Result<Option<Record>, RecordError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let (cidr, pop) = match fields.as_slice() {
        [] => return Ok(None),
        [cidr, pop] => (*cidr, *pop),
        _ => return Err(RecordError::FieldCount { found: fields.len() }),
    };

    let subnet: IpNet = cidr.parse().map_err(|source| RecordError::Subnet {
        text: cidr.to_string(),
        source,
    })?;
    let pop: u16 = pop.parse().map_err(|source| RecordError::PopId {
        text: pop.to_string(),
        source,
    })?;

    Ok(Some(Record {
        subnet: subnet.trunc(),
        pop: PopId(pop),
    }))
}

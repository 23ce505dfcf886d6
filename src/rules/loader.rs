//! Load rule records into a routing table.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use ipnet::IpNet;
use thiserror::Error;

use crate::observability::metrics;
use crate::routing::{InsertError, PopId, RoutingTable};
use crate::rules::parser::{parse_record, RecordError};

/// Error raised while loading rules. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open routing data file '{path}': {source}", path = .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("error reading routing data at line {line}: {source}")]
    Read { line: usize, source: io::Error },

    #[error("line {line}: {source} in '{content}'")]
    Record {
        line: usize,
        content: String,
        source: RecordError,
    },

    #[error("line {line}: error inserting rule ({subnet} {pop}): {source}")]
    Insert {
        line: usize,
        subnet: IpNet,
        pop: PopId,
        source: InsertError,
    },
}

impl LoadError {
    /// Line of input the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Open { .. } => None,
            LoadError::Read { line, .. }
            | LoadError::Record { line, .. }
            | LoadError::Insert { line, .. } => Some(*line),
        }
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Records read, blank lines excluded.
    pub records: usize,
    /// Distinct rules in the table afterwards.
    pub rules: usize,
}

/// Insert every record from `reader` into `table`, stopping at the first error.
///
/// Rules inserted before a failure stay in the table.
pub fn load_rules<R, T>(reader: R, table: &mut T) -> Result<LoadSummary, LoadError>
where
    R: BufRead,
    T: RoutingTable,
{
    let mut summary = LoadSummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let content = line.map_err(|source| LoadError::Read {
            line: line_no,
            source,
        })?;

        let record = match parse_record(&content) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(source) => {
                metrics::record_rule_rejected("format");
                return Err(LoadError::Record {
                    line: line_no,
                    content: content.trim().to_string(),
                    source,
                });
            }
        };

        if let Err(source) = table.insert(&record.subnet, record.pop) {
            tracing::warn!(
                line = line_no,
                subnet = %record.subnet,
                pop = %record.pop,
                reason = source.kind(),
                "Rule rejected"
            );
            metrics::record_rule_rejected(source.kind());
            return Err(LoadError::Insert {
                line: line_no,
                subnet: record.subnet,
                pop: record.pop,
                source,
            });
        }

        tracing::debug!(line = line_no, subnet = %record.subnet, pop = %record.pop, "Rule loaded");
        metrics::record_rule_loaded();
        summary.records += 1;
    }

    summary.rules = table.len();
    Ok(summary)
}

/// Open `path` and load it with [`load_rules`].
pub fn load_rules_file<T: RoutingTable>(path: &Path, table: &mut T) -> Result<LoadSummary, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let summary = load_rules(BufReader::new(file), table)?;
    tracing::info!(
        path = %path.display(),
        records = summary.records,
        rules = summary.rules,
        "Routing rules loaded"
    );
    Ok(summary)
}

/// Build a fresh table of type `T` from the rule file at `path`.
pub fn load_table<T: RoutingTable + Default>(path: &Path) -> Result<T, LoadError> {
    let mut table = T::default();
    load_rules_file(path, &mut table)?;
    Ok(table)
}

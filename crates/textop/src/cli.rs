//! Core logic behind the `textop-diff` binary.
//!
//! `textop-diff <target-file> [version]` reads the source text from stdin and
//! prints the operations turning it into the target file's contents, one JSON
//! object per line.

use std::path::Path;

use thiserror::Error;

use crate::diff::{diff_to_ops, MyersDiff};
use crate::id::AtomicIdGenerator;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid version {0:?}, expected a non-negative integer")]
    Version(String),
    #[error("usage: textop-diff <target-file> [version] < source")]
    Usage,
}

/// Parsed command-line arguments (program name excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffArgs {
    pub target: String,
    pub version: u64,
}

impl DiffArgs {
    /// Version defaults to 1, the version of a freshly created document.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let target = args.next().ok_or(CliError::Usage)?;
        let version = match args.next() {
            Some(raw) => raw.parse().map_err(|_| CliError::Version(raw))?,
            None => 1,
        };
        if args.next().is_some() {
            return Err(CliError::Usage);
        }
        Ok(Self { target, version })
    }
}

pub fn read_target(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(Path::new(path)).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })
}

/// Diff `source` into `target` and render the ops as JSON lines.
///
/// Ids are numbered from 0 for each invocation.
pub fn diff_command(source: &str, target: &str, version: u64) -> Result<String, CliError> {
    let ids = AtomicIdGenerator::new();
    let ops = diff_to_ops(source, version, target, &MyersDiff, &ids);
    let mut out = String::new();
    for op in &ops {
        out.push_str(&serde_json::to_string(op)?);
        out.push('\n');
    }
    Ok(out)
}

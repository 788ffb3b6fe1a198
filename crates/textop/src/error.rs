use thiserror::Error;

use crate::workspace::{DocumentHandle, ViewHandle};

/// Failures of a single document or view apply.
///
/// A failed apply leaves the document (and, for views, the upstream)
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("op authored at version {apply_at} but document is at version {version}")]
    FutureVersion { apply_at: u64, version: u64 },
    #[error("delete at {index} expected {expected:?} but found {found:?}")]
    DeleteMismatch {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("insert index {index} is past the end of a {len}-char text")]
    OutOfBounds { index: usize, len: usize },
    #[error("cannot fork at version {requested}, document is at version {version}")]
    ForkBeyondHistory { requested: u64, version: u64 },
    #[error("view is bound to a different upstream document")]
    UpstreamMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("unknown document {0}")]
    UnknownDocument(DocumentHandle),
    #[error("unknown view {0}")]
    UnknownView(ViewHandle),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid document config: {0}")]
    Toml(#[from] toml::de::Error),
}

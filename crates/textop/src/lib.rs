//! textop - operational-transformation text documents.
//!
//! A [`CanonicalDocument`] keeps its full op history and accepts operations
//! authored against any version it has reached, transforming stale ones past
//! the edits their author had not seen. A [`ViewDocument`] forks a document
//! at a past version, takes edits in its own coordinates and pushes each one
//! upstream immediately. [`diff_to_ops`] turns a pair of texts into an op
//! stream, and [`Workspace`] wraps all of it behind opaque handles.
//!
//! Indices and lengths are counted in chars (Unicode scalar values).

mod buffer;

pub mod canonical;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod id;
pub mod operation;
pub mod view;
pub mod workspace;

pub use canonical::{CanonicalDocument, DocumentId};
pub use config::{DeleteMismatchPolicy, DocumentConfig};
pub use diff::{diff_documents, diff_to_ops, MyersDiff, TextDiff};
pub use error::{ConfigError, DocumentError, WorkspaceError};
pub use id::{process_ids, AtomicIdGenerator, IdGenerator, SharedIds};
pub use operation::{OpId, OpKind, Operation};
pub use view::ViewDocument;
pub use workspace::{DocumentHandle, ViewHandle, Workspace};

//! The authoritative document: base text plus its complete op history.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::buffer::TextBuffer;
use crate::config::DocumentConfig;
use crate::error::DocumentError;
use crate::id::{process_ids, SharedIds};
use crate::operation::{OpId, Operation};
use crate::view::ViewDocument;

/// Process-unique identity of a [`CanonicalDocument`], fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc:{}", self.0)
    }
}

/// A document holding every operation since its base text.
///
/// The base text is recorded as the first operation, an insert of the whole
/// string at index 0 authored at version 0, so a fresh document is at
/// version 1. `version()` always equals the history length and the text is
/// always the history replayed in order.
pub struct CanonicalDocument {
    id: DocumentId,
    buffer: TextBuffer,
    history: Vec<Operation>,
    ids: SharedIds,
    config: DocumentConfig,
}

impl CanonicalDocument {
    /// A document drawing op ids from the process-wide generator.
    pub fn new(base: &str) -> Self {
        Self::with_ids(base, process_ids())
    }

    pub fn with_ids(base: &str, ids: SharedIds) -> Self {
        Self::with_config(base, ids, DocumentConfig::default())
    }

    pub fn with_config(base: &str, ids: SharedIds, config: DocumentConfig) -> Self {
        let genesis = Operation::insert(&ids, 0, base, 0);
        Self {
            id: DocumentId::next(),
            buffer: TextBuffer::from(base),
            history: vec![genesis],
            ids,
            config,
        }
    }

    pub fn version(&self) -> u64 {
        self.history.len() as u64
    }

    /// The live text.
    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    /// Text length in chars.
    pub fn char_len(&self) -> usize {
        self.buffer.char_len()
    }

    /// Every applied operation, in version order.
    pub fn history(&self) -> &[Operation] {
        &self.history
    }

    /// Operations applied at or after `version`.
    pub fn ops_since(&self, version: u64) -> &[Operation] {
        let start = (version as usize).min(self.history.len());
        &self.history[start..]
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Id of the base-text operation; stable for the document's lifetime.
    pub fn genesis_id(&self) -> OpId {
        self.history[0].id()
    }

    pub fn ids(&self) -> &SharedIds {
        &self.ids
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Apply an operation authored at `op.apply_at()`.
    ///
    /// A stale op is first transformed against the history its author had not
    /// seen. Fails without changing anything when the op claims a version
    /// this document has not reached, when an insert lands past the end of
    /// the text, or when a delete does not match under
    /// [`crate::DeleteMismatchPolicy::Reject`].
    pub fn apply(&mut self, op: Operation) -> Result<(), DocumentError> {
        let version = self.version();
        if op.apply_at() > version {
            return Err(DocumentError::FutureVersion {
                apply_at: op.apply_at(),
                version,
            });
        }

        let op = if version > op.apply_at() {
            let unseen = &self.history[op.apply_at() as usize..];
            let transformed = op.transform(unseen);
            debug!(
                id = %op.id(),
                from = op.index(),
                to = transformed.index(),
                unseen = unseen.len(),
                "transformed stale op"
            );
            transformed
        } else {
            op
        };

        self.buffer.apply(&op, self.config.delete_mismatch)?;
        debug!(op = %op, version = version + 1, "applied");
        self.history.push(op);
        Ok(())
    }

    /// Apply operations in order, stopping at the first failure.
    pub fn apply_all<I>(&mut self, ops: I) -> Result<(), DocumentError>
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.apply(op)?;
        }
        Ok(())
    }

    /// Insert `text` at `index` as seen at version `apply_at`.
    pub fn insert(&mut self, index: usize, text: &str, apply_at: u64) -> Result<OpId, DocumentError> {
        let op = Operation::insert(&self.ids, index, text, apply_at);
        let id = op.id();
        self.apply(op)?;
        Ok(id)
    }

    /// Delete `text` expected at `index` as seen at version `apply_at`.
    pub fn delete(&mut self, index: usize, text: &str, apply_at: u64) -> Result<OpId, DocumentError> {
        let op = Operation::delete(&self.ids, index, text, apply_at);
        let id = op.id();
        self.apply(op)?;
        Ok(id)
    }

    /// Fork a view of this document as it was at `version`.
    pub fn as_of(&self, version: u64) -> Result<ViewDocument, DocumentError> {
        ViewDocument::fork(self, version)
    }
}

impl fmt::Display for CanonicalDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for CanonicalDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanonicalDocument")
            .field("id", &self.id)
            .field("version", &self.version())
            .field("text", &self.text())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

//! Forked views of a canonical document.
//!
//! A view starts from the upstream text as of some past version and takes
//! edits authored against its own timeline. Every edit is pushed upstream
//! immediately, transformed against whatever the upstream gained since the
//! fork that the view never saw, so there is no separate merge step.
//!
//! The view does not borrow its upstream; it is handed the upstream on each
//! call and checks that it is the document it was forked from.

use tracing::debug;

use crate::buffer::TextBuffer;
use crate::canonical::{CanonicalDocument, DocumentId};
use crate::config::DeleteMismatchPolicy;
use crate::error::DocumentError;
use crate::id::SharedIds;
use crate::operation::{OpId, Operation};

pub struct ViewDocument {
    upstream: DocumentId,
    fork_version: u64,
    local_ops: Vec<Operation>,
    buffer: TextBuffer,
    ids: SharedIds,
    policy: DeleteMismatchPolicy,
}

impl ViewDocument {
    /// Fork `upstream` as it was at `version`.
    pub fn fork(upstream: &CanonicalDocument, version: u64) -> Result<Self, DocumentError> {
        if version > upstream.version() {
            return Err(DocumentError::ForkBeyondHistory {
                requested: version,
                version: upstream.version(),
            });
        }

        let policy = upstream.config().delete_mismatch;
        let mut buffer = TextBuffer::new();
        for op in &upstream.history()[..version as usize] {
            buffer.apply(op, policy)?;
        }
        debug!(upstream = %upstream.id(), version, "forked view");

        Ok(Self {
            upstream: upstream.id(),
            fork_version: version,
            local_ops: Vec::new(),
            buffer,
            ids: upstream.ids().clone(),
            policy,
        })
    }

    pub fn fork_version(&self) -> u64 {
        self.fork_version
    }

    pub fn version(&self) -> u64 {
        self.fork_version + self.local_ops.len() as u64
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    /// Operations applied through this view, in their view-local form.
    pub fn local_ops(&self) -> &[Operation] {
        &self.local_ops
    }

    /// The view's full timeline: the upstream prefix it forked from, then its
    /// local operations.
    pub fn ops<'a>(
        &'a self,
        upstream: &'a CanonicalDocument,
    ) -> Result<impl Iterator<Item = &'a Operation> + 'a, DocumentError> {
        self.check_upstream(upstream)?;
        Ok(upstream.history()[..self.fork_version as usize]
            .iter()
            .chain(self.local_ops.iter()))
    }

    /// Apply `op`, authored against this view's timeline, to the view and
    /// push its reconciled form to `upstream`.
    ///
    /// Either both the view and the upstream advance by one version, or
    /// neither changes.
    pub fn apply(&mut self, upstream: &mut CanonicalDocument, op: Operation) -> Result<(), DocumentError> {
        self.check_upstream(upstream)?;

        let version = self.version();
        if op.apply_at() > version {
            return Err(DocumentError::FutureVersion {
                apply_at: op.apply_at(),
                version,
            });
        }

        let local = if version > op.apply_at() {
            let since = op.apply_at() as usize;
            let fork = self.fork_version as usize;
            let unseen = upstream.history()[since.min(fork)..fork]
                .iter()
                .chain(self.local_ops[since.saturating_sub(fork)..].iter());
            op.transform_all(unseen)
        } else {
            op
        };

        let splice = self.buffer.plan(&local, self.policy)?;
        let candidate = self.reconcile(upstream, &local);
        upstream.apply(candidate)?;

        self.buffer.commit(splice);
        self.local_ops.push(local);
        Ok(())
    }

    /// Insert `text` at `index` as seen at view version `apply_at`.
    pub fn insert(
        &mut self,
        upstream: &mut CanonicalDocument,
        index: usize,
        text: &str,
        apply_at: u64,
    ) -> Result<OpId, DocumentError> {
        let op = Operation::insert(&self.ids, index, text, apply_at);
        let id = op.id();
        self.apply(upstream, op)?;
        Ok(id)
    }

    /// Delete `text` expected at `index` as seen at view version `apply_at`.
    pub fn delete(
        &mut self,
        upstream: &mut CanonicalDocument,
        index: usize,
        text: &str,
        apply_at: u64,
    ) -> Result<OpId, DocumentError> {
        let op = Operation::delete(&self.ids, index, text, apply_at);
        let id = op.id();
        self.apply(upstream, op)?;
        Ok(id)
    }

    /// Walk the view's ops and the upstream history since the fork side by
    /// side. Upstream ops whose id matches the next local op are edits the
    /// view already made; every other upstream op is foreign and the new edit
    /// is transformed past it.
    ///
    /// The walk covers the whole upstream history since the fork, so the
    /// returned op is stamped with the upstream's current version.
    fn reconcile(&self, upstream: &CanonicalDocument, local: &Operation) -> Operation {
        let mut known = self.local_ops.iter().chain(std::iter::once(local)).peekable();
        let mut candidate = local.clone();
        let mut walked = 0u64;
        let mut foreign = 0usize;

        for upstream_op in upstream.ops_since(self.fork_version) {
            let Some(next_known) = known.peek() else {
                break;
            };
            if next_known.id() == upstream_op.id() {
                known.next();
            } else {
                candidate = candidate.transform_one(upstream_op);
                foreign += 1;
            }
            walked += 1;
        }

        debug!(
            id = %local.id(),
            walked,
            foreign,
            from = local.index(),
            to = candidate.index(),
            "reconciled view op"
        );
        candidate.with_version(self.fork_version + walked)
    }

    fn check_upstream(&self, upstream: &CanonicalDocument) -> Result<(), DocumentError> {
        if upstream.id() == self.upstream {
            Ok(())
        } else {
            Err(DocumentError::UpstreamMismatch)
        }
    }
}

impl std::fmt::Debug for ViewDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewDocument")
            .field("upstream", &self.upstream)
            .field("fork_version", &self.fork_version)
            .field("version", &self.version())
            .field("text", &self.text())
            .finish_non_exhaustive()
    }
}

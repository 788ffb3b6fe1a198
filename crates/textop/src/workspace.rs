//! Handle-based facade over documents and views.
//!
//! A [`Workspace`] owns every document and view it creates and hands out
//! opaque handles. All documents share one id generator, so ops minted for
//! one document can never collide with another's.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::canonical::CanonicalDocument;
use crate::config::DocumentConfig;
use crate::diff::{diff_to_ops, MyersDiff, TextDiff};
use crate::error::WorkspaceError;
use crate::id::{process_ids, SharedIds};
use crate::operation::Operation;
use crate::view::ViewDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentHandle(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewHandle(usize);

impl fmt::Display for DocumentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

impl fmt::Display for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

struct ViewSlot {
    upstream: DocumentHandle,
    view: ViewDocument,
}

pub struct Workspace {
    ids: SharedIds,
    config: DocumentConfig,
    differ: Arc<dyn TextDiff + Send + Sync>,
    documents: Vec<Option<CanonicalDocument>>,
    views: Vec<Option<ViewSlot>>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_ids(process_ids())
    }

    pub fn with_ids(ids: SharedIds) -> Self {
        Self {
            ids,
            config: DocumentConfig::default(),
            differ: Arc::new(MyersDiff),
            documents: Vec::new(),
            views: Vec::new(),
        }
    }

    /// Config applied to documents created from now on.
    pub fn with_config(mut self, config: DocumentConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the diff used by [`Workspace::diff_to_ops`].
    pub fn with_differ(mut self, differ: Arc<dyn TextDiff + Send + Sync>) -> Self {
        self.differ = differ;
        self
    }

    // ── Documents ─────────────────────────────────────────────────────────

    pub fn create_document(&mut self, base: &str) -> DocumentHandle {
        let doc = CanonicalDocument::with_config(base, self.ids.clone(), self.config.clone());
        let handle = DocumentHandle(self.documents.len());
        self.documents.push(Some(doc));
        info!(document = %handle, chars = base.chars().count(), "created document");
        handle
    }

    pub fn apply(&mut self, document: DocumentHandle, op: Operation) -> Result<(), WorkspaceError> {
        self.document_mut(document)?.apply(op)?;
        Ok(())
    }

    pub fn current_text(&self, document: DocumentHandle) -> Result<&str, WorkspaceError> {
        Ok(self.document(document)?.text())
    }

    pub fn current_version(&self, document: DocumentHandle) -> Result<u64, WorkspaceError> {
        Ok(self.document(document)?.version())
    }

    pub fn document(&self, document: DocumentHandle) -> Result<&CanonicalDocument, WorkspaceError> {
        self.documents
            .get(document.0)
            .and_then(Option::as_ref)
            .ok_or(WorkspaceError::UnknownDocument(document))
    }

    fn document_mut(&mut self, document: DocumentHandle) -> Result<&mut CanonicalDocument, WorkspaceError> {
        self.documents
            .get_mut(document.0)
            .and_then(Option::as_mut)
            .ok_or(WorkspaceError::UnknownDocument(document))
    }

    /// Drop a document and every view forked from it.
    pub fn close_document(&mut self, document: DocumentHandle) -> Result<(), WorkspaceError> {
        let slot = self
            .documents
            .get_mut(document.0)
            .filter(|slot| slot.is_some())
            .ok_or(WorkspaceError::UnknownDocument(document))?;
        *slot = None;

        let mut closed = 0usize;
        for view in &mut self.views {
            if view.as_ref().is_some_and(|slot| slot.upstream == document) {
                *view = None;
                closed += 1;
            }
        }
        debug!(document = %document, views = closed, "closed document");
        Ok(())
    }

    /// A fresh insert with a workspace-unique id. Not applied anywhere.
    pub fn new_insert(&self, index: usize, text: &str, apply_at: u64) -> Operation {
        Operation::insert(&self.ids, index, text, apply_at)
    }

    /// A fresh delete with a workspace-unique id. Not applied anywhere.
    pub fn new_delete(&self, index: usize, text: &str, apply_at: u64) -> Operation {
        Operation::delete(&self.ids, index, text, apply_at)
    }

    // ── Views ─────────────────────────────────────────────────────────────

    pub fn fork_view(&mut self, document: DocumentHandle, version: u64) -> Result<ViewHandle, WorkspaceError> {
        let view = self.document(document)?.as_of(version)?;
        let handle = ViewHandle(self.views.len());
        self.views.push(Some(ViewSlot {
            upstream: document,
            view,
        }));
        debug!(view = %handle, document = %document, version, "forked view");
        Ok(handle)
    }

    /// Apply `op` through a view; its reconciled form lands on the upstream.
    pub fn apply_view(&mut self, view: ViewHandle, op: Operation) -> Result<(), WorkspaceError> {
        let slot = self
            .views
            .get_mut(view.0)
            .and_then(Option::as_mut)
            .ok_or(WorkspaceError::UnknownView(view))?;
        let upstream = self
            .documents
            .get_mut(slot.upstream.0)
            .and_then(Option::as_mut)
            .ok_or(WorkspaceError::UnknownDocument(slot.upstream))?;
        slot.view.apply(upstream, op)?;
        Ok(())
    }

    pub fn view_text(&self, view: ViewHandle) -> Result<&str, WorkspaceError> {
        Ok(self.view(view)?.text())
    }

    pub fn view_version(&self, view: ViewHandle) -> Result<u64, WorkspaceError> {
        Ok(self.view(view)?.version())
    }

    pub fn view(&self, view: ViewHandle) -> Result<&ViewDocument, WorkspaceError> {
        self.views
            .get(view.0)
            .and_then(Option::as_ref)
            .map(|slot| &slot.view)
            .ok_or(WorkspaceError::UnknownView(view))
    }

    pub fn close_view(&mut self, view: ViewHandle) -> Result<(), WorkspaceError> {
        let slot = self
            .views
            .get_mut(view.0)
            .filter(|slot| slot.is_some())
            .ok_or(WorkspaceError::UnknownView(view))?;
        *slot = None;
        Ok(())
    }

    // ── Diffing ───────────────────────────────────────────────────────────

    /// Operations turning `source` (at `version`) into `target`, with ids
    /// from this workspace's generator.
    pub fn diff_to_ops(&self, source: &str, version: u64, target: &str) -> Vec<Operation> {
        diff_to_ops(source, version, target, self.differ.as_ref(), &self.ids)
    }
}

impl fmt::Debug for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workspace")
            .field("documents", &self.documents.iter().flatten().count())
            .field("views", &self.views.iter().flatten().count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

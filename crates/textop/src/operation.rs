//! Insert/delete operations and the positional transform.
//!
//! An [`Operation`] is immutable once built. Transforming it produces a new
//! operation that keeps the id, kind and text but carries an index adjusted
//! for the edits its author had not seen.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::IdGenerator;

// ── Types ─────────────────────────────────────────────────────────────────

/// Process-unique operation id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpId(pub u64);

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Insert,
    Delete,
}

impl OpKind {
    /// `+1` for inserts, `-1` for deletes.
    pub fn sign(self) -> i64 {
        match self {
            OpKind::Insert => 1,
            OpKind::Delete => -1,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::Insert => f.write_str("Insert"),
            OpKind::Delete => f.write_str("Delete"),
        }
    }
}

/// A single text mutation, stamped with the version its author saw.
///
/// `index` counts chars (Unicode scalar values) in the text produced by all
/// operations before this one in its sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    id: OpId,
    kind: OpKind,
    index: usize,
    text: String,
    apply_at: u64,
}

// ── Construction ──────────────────────────────────────────────────────────

impl Operation {
    pub fn new(id: OpId, kind: OpKind, index: usize, text: impl Into<String>, apply_at: u64) -> Self {
        Self {
            id,
            kind,
            index,
            text: text.into(),
            apply_at,
        }
    }

    /// An insert of `text` at `index`, with a fresh id from `ids`.
    pub fn insert<G>(ids: &G, index: usize, text: impl Into<String>, apply_at: u64) -> Self
    where
        G: IdGenerator + ?Sized,
    {
        Self::new(ids.next_id(), OpKind::Insert, index, text, apply_at)
    }

    /// A delete of `text` expected at `index`, with a fresh id from `ids`.
    pub fn delete<G>(ids: &G, index: usize, text: impl Into<String>, apply_at: u64) -> Self
    where
        G: IdGenerator + ?Sized,
    {
        Self::new(ids.next_id(), OpKind::Delete, index, text, apply_at)
    }

    /// The same operation restamped with another authoring version.
    pub fn with_version(&self, apply_at: u64) -> Self {
        Self {
            apply_at,
            ..self.clone()
        }
    }
}

// ── Accessors ─────────────────────────────────────────────────────────────

impl Operation {
    pub fn id(&self) -> OpId {
        self.id
    }

    pub fn kind(&self) -> OpKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn apply_at(&self) -> u64 {
        self.apply_at
    }

    /// Payload length in chars.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Net change in text length this operation causes when it applies.
    pub fn signed_len(&self) -> i64 {
        self.kind.sign() * self.len() as i64
    }
}

// ── Transform ─────────────────────────────────────────────────────────────

impl Operation {
    /// Transform against operations applied since this one was authored.
    ///
    /// `prior` is scanned in order; every operation positioned at or before
    /// the running adjusted index shifts it by its signed length. The result
    /// is stamped one past the last prior operation's version. An empty
    /// `prior` returns an identical copy.
    pub fn transform(&self, prior: &[Operation]) -> Operation {
        self.transform_all(prior)
    }

    /// Transform against a single operation.
    pub fn transform_one(&self, prior: &Operation) -> Operation {
        self.transform(std::slice::from_ref(prior))
    }

    /// [`Operation::transform`] over any ordered sequence of operations.
    pub fn transform_all<'a, I>(&self, prior: I) -> Operation
    where
        I: IntoIterator<Item = &'a Operation>,
    {
        let mut offset = 0i64;
        let mut last_apply_at = None;
        for op in prior {
            last_apply_at = Some(op.apply_at);
            if op.index as i64 > self.index as i64 + offset {
                continue;
            }
            offset += op.signed_len();
        }

        let Some(last_apply_at) = last_apply_at else {
            return self.clone();
        };
        Operation {
            id: self.id,
            kind: self.kind,
            index: (self.index as i64 + offset).max(0) as usize,
            text: self.text.clone(),
            apply_at: last_apply_at + 1,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Op{{kind={}, index={}, text='{}', apply_at={}}}",
            self.kind, self.index, self.text, self.apply_at
        )
    }
}

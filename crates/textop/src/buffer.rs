//! Live text buffer addressed by char index.
//!
//! Applying an operation is split in two so callers can check an edit on
//! several buffers before committing any of them: [`TextBuffer::plan`]
//! validates and resolves char indices to byte ranges, [`TextBuffer::commit`]
//! performs the resolved edit.

use std::ops::Range;

use tracing::warn;

use crate::config::DeleteMismatchPolicy;
use crate::error::DocumentError;
use crate::operation::{OpKind, Operation};

#[derive(Debug, Clone, Default)]
pub(crate) struct TextBuffer {
    text: String,
    chars: usize,
}

/// A resolved edit, ready to commit.
#[derive(Debug)]
pub(crate) enum Splice<'op> {
    Insert { at: usize, text: &'op str, chars: usize },
    Remove { range: Range<usize>, chars: usize },
    /// Mismatching delete dropped under [`DeleteMismatchPolicy::Skip`].
    Skip,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.chars
    }

    pub fn plan<'op>(
        &self,
        op: &'op Operation,
        policy: DeleteMismatchPolicy,
    ) -> Result<Splice<'op>, DocumentError> {
        match op.kind() {
            OpKind::Insert => {
                let at = self.byte_offset(op.index()).ok_or(DocumentError::OutOfBounds {
                    index: op.index(),
                    len: self.chars,
                })?;
                Ok(Splice::Insert {
                    at,
                    text: op.text(),
                    chars: op.len(),
                })
            }
            OpKind::Delete => {
                let chars = op.len();
                if let Some(range) = self.byte_range(op.index(), chars) {
                    if &self.text[range.clone()] == op.text() {
                        return Ok(Splice::Remove { range, chars });
                    }
                }

                let found: String = self.text.chars().skip(op.index()).take(chars).collect();
                match policy {
                    DeleteMismatchPolicy::Skip => {
                        warn!(
                            id = %op.id(),
                            index = op.index(),
                            expected = op.text(),
                            found = %found,
                            "skipping non-matching delete"
                        );
                        Ok(Splice::Skip)
                    }
                    DeleteMismatchPolicy::Reject => Err(DocumentError::DeleteMismatch {
                        index: op.index(),
                        expected: op.text().to_string(),
                        found,
                    }),
                }
            }
        }
    }

    pub fn commit(&mut self, splice: Splice<'_>) {
        match splice {
            Splice::Insert { at, text, chars } => {
                self.text.insert_str(at, text);
                self.chars += chars;
            }
            Splice::Remove { range, chars } => {
                self.text.replace_range(range, "");
                self.chars -= chars;
            }
            Splice::Skip => {}
        }
    }

    /// Plan and commit in one step.
    pub fn apply(&mut self, op: &Operation, policy: DeleteMismatchPolicy) -> Result<(), DocumentError> {
        let splice = self.plan(op, policy)?;
        self.commit(splice);
        Ok(())
    }

    fn byte_offset(&self, index: usize) -> Option<usize> {
        if index == self.chars {
            return Some(self.text.len());
        }
        self.text.char_indices().nth(index).map(|(at, _)| at)
    }

    fn byte_range(&self, index: usize, chars: usize) -> Option<Range<usize>> {
        if index.checked_add(chars)? > self.chars {
            return None;
        }
        let start = self.byte_offset(index)?;
        let end = self.text[start..]
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(at, _)| start + at);
        Some(start..end)
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            chars: text.chars().count(),
        }
    }
}

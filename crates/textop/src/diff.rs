//! Turning a text diff into an operation stream.

use textop_diff::{Chunk, Patch};

use crate::canonical::CanonicalDocument;
use crate::id::IdGenerator;
use crate::operation::Operation;

/// A text-diff capability: ordered equal/insert/delete runs from `src` to `dst`.
pub trait TextDiff {
    fn diff(&self, src: &str, dst: &str) -> Patch;
}

/// Myers diff from `textop-diff`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MyersDiff;

impl TextDiff for MyersDiff {
    fn diff(&self, src: &str, dst: &str) -> Patch {
        textop_diff::diff(src, dst)
    }
}

impl<F> TextDiff for F
where
    F: Fn(&str, &str) -> Patch,
{
    fn diff(&self, src: &str, dst: &str) -> Patch {
        self(src, dst)
    }
}

/// Operations that turn `src` (at version `version`) into `dst`.
///
/// Each insert or delete run becomes one operation at the running char
/// offset, which advances over equal and inserted text but not deleted text.
/// Versions start at `version` and rise by one per operation, so replaying the
/// stream in order on a document holding `src` at `version` yields `dst`.
pub fn diff_to_ops<D, G>(src: &str, version: u64, dst: &str, differ: &D, ids: &G) -> Vec<Operation>
where
    D: TextDiff + ?Sized,
    G: IdGenerator + ?Sized,
{
    let mut ops = Vec::new();
    let mut offset = 0usize;
    let mut apply_at = version;

    for chunk in differ.diff(src, dst) {
        let len = chunk.char_len();
        match chunk {
            Chunk::Equal(_) => offset += len,
            Chunk::Insert(text) => {
                ops.push(Operation::insert(ids, offset, text, apply_at));
                apply_at += 1;
                offset += len;
            }
            Chunk::Delete(text) => {
                ops.push(Operation::delete(ids, offset, text, apply_at));
                apply_at += 1;
            }
        }
    }
    ops
}

/// Operations that turn `from`'s text into `to`'s, stamped from `from`'s
/// current version with ids from `from`'s generator.
pub fn diff_documents(from: &CanonicalDocument, to: &CanonicalDocument) -> Vec<Operation> {
    diff_to_ops(from.text(), from.version(), to.text(), &MyersDiff, from.ids())
}

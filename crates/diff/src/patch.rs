//! Diff output types and helpers that read or reshape them.

// ── Types ─────────────────────────────────────────────────────────────────

/// One run of a diff between a source and a destination string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Text present in both strings.
    Equal(String),
    /// Text present only in the destination.
    Insert(String),
    /// Text present only in the source.
    Delete(String),
}

/// An ordered diff: replaying the chunks over the source yields the destination.
pub type Patch = Vec<Chunk>;

impl Chunk {
    pub fn text(&self) -> &str {
        match self {
            Chunk::Equal(s) | Chunk::Insert(s) | Chunk::Delete(s) => s,
        }
    }

    /// Number of chars in this run.
    pub fn char_len(&self) -> usize {
        self.text().chars().count()
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, Chunk::Equal(_))
    }

    fn same_kind(&self, other: &Chunk) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    fn text_mut(&mut self) -> &mut String {
        match self {
            Chunk::Equal(s) | Chunk::Insert(s) | Chunk::Delete(s) => s,
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────

/// Merge consecutive chunks of the same kind and drop empty ones.
pub fn normalize(patch: Patch) -> Patch {
    let mut result: Patch = Vec::with_capacity(patch.len());
    for chunk in patch {
        if chunk.text().is_empty() {
            continue;
        }
        match result.last_mut() {
            Some(last) if last.same_kind(&chunk) => last.text_mut().push_str(chunk.text()),
            _ => result.push(chunk),
        }
    }
    result
}

/// Rebuild the source string a patch was computed from.
pub fn patch_src(patch: &[Chunk]) -> String {
    patch
        .iter()
        .filter(|c| !matches!(c, Chunk::Insert(_)))
        .map(Chunk::text)
        .collect()
}

/// Rebuild the destination string a patch produces.
pub fn patch_dst(patch: &[Chunk]) -> String {
    patch
        .iter()
        .filter(|c| !matches!(c, Chunk::Delete(_)))
        .map(Chunk::text)
        .collect()
}

//! Operation id generation.
//!
//! Ids must be unique across every document that may ever compare histories
//! (a view and its upstream at minimum), so documents never mint ids on their
//! own: they are handed an [`IdGenerator`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use crate::operation::OpId;

/// Source of fresh operation ids.
pub trait IdGenerator {
    fn next_id(&self) -> OpId;
}

/// Shared handle to a generator, as stored by documents and workspaces.
pub type SharedIds = Arc<dyn IdGenerator + Send + Sync>;

/// Monotonic counter, safe to share between threads.
#[derive(Debug, Default)]
pub struct AtomicIdGenerator {
    next: AtomicU64,
}

impl AtomicIdGenerator {
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// A generator whose first id is `first`.
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// The id the next call to [`IdGenerator::next_id`] will return.
    pub fn peek(&self) -> OpId {
        OpId(self.next.load(Ordering::Relaxed))
    }

    pub fn shared(self) -> SharedIds {
        Arc::new(self)
    }
}

impl IdGenerator for AtomicIdGenerator {
    fn next_id(&self) -> OpId {
        OpId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self) -> OpId {
        (**self).next_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Arc<G> {
    fn next_id(&self) -> OpId {
        (**self).next_id()
    }
}

/// The generator used by documents built without an explicit one.
pub fn process_ids() -> SharedIds {
    static IDS: OnceLock<SharedIds> = OnceLock::new();
    IDS.get_or_init(|| AtomicIdGenerator::new().shared()).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential() {
        let ids = AtomicIdGenerator::starting_at(7);
        assert_eq!(ids.next_id(), OpId(7));
        assert_eq!(ids.next_id(), OpId(8));
        assert_eq!(ids.peek(), OpId(9));
    }

    #[test]
    fn shared_handles_draw_from_one_counter() {
        let ids = AtomicIdGenerator::new().shared();
        let other = ids.clone();
        let a = ids.next_id();
        let b = other.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn process_ids_never_repeat() {
        let a = process_ids().next_id();
        let b = process_ids().next_id();
        assert!(b > a);
    }
}

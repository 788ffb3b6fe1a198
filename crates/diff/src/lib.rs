//! textop-diff - character-level text diff.
//!
//! Produces an ordered list of [`Chunk`]s (equal, insert, delete runs) that
//! turns one string into another. All lengths and positions are counted in
//! Unicode scalar values (Rust `char`s), never in bytes.

pub mod myers;
pub mod patch;

pub use myers::{common_prefix, common_suffix, diff};
pub use patch::{normalize, patch_dst, patch_src, Chunk, Patch};

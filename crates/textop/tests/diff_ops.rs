use proptest::prelude::*;
use textop::{diff_to_ops, AtomicIdGenerator, CanonicalDocument, MyersDiff, OpKind};

fn replay(src: &str, dst: &str) -> CanonicalDocument {
    let ids = AtomicIdGenerator::new().shared();
    let mut doc = CanonicalDocument::with_ids(src, ids.clone());
    let ops = diff_to_ops(src, doc.version(), dst, &MyersDiff, &ids);
    doc.apply_all(ops).unwrap();
    doc
}

proptest! {
    #[test]
    fn replaying_ops_reaches_target(src in "[ab ]{0,12}", dst in "[ab ]{0,12}") {
        let doc = replay(&src, &dst);
        prop_assert_eq!(doc.text(), dst.as_str());
    }

    #[test]
    fn replaying_unicode_ops_reaches_target(src in "\\PC{0,24}", dst in "\\PC{0,24}") {
        let doc = replay(&src, &dst);
        prop_assert_eq!(doc.text(), dst.as_str());
    }

    #[test]
    fn versions_are_consecutive(src in "[abc]{0,10}", dst in "[abc]{0,10}", start in 1u64..50) {
        let ids = AtomicIdGenerator::new();
        let ops = diff_to_ops(&src, start, &dst, &MyersDiff, &ids);
        for (n, op) in ops.iter().enumerate() {
            prop_assert_eq!(op.apply_at(), start + n as u64);
            prop_assert!(!op.is_empty());
        }
    }
}

#[test]
fn easy_diff() {
    let doc = replay("The quick brown fox", "The quick red fox jumps");
    assert_eq!(doc.text(), "The quick red fox jumps");
}

#[test]
fn weird_diff() {
    let doc = replay("aaaaabbbbbccccc", "cccccbbbbbaaaaa");
    assert_eq!(doc.text(), "cccccbbbbbaaaaa");
}

#[test]
fn pure_insert_and_pure_delete() {
    let ids = AtomicIdGenerator::new();
    let grow = diff_to_ops("", 1, "hello", &MyersDiff, &ids);
    assert_eq!(grow.len(), 1);
    assert_eq!(grow[0].kind(), OpKind::Insert);
    assert_eq!(grow[0].index(), 0);

    let shrink = diff_to_ops("hello", 1, "", &MyersDiff, &ids);
    assert_eq!(shrink.len(), 1);
    assert_eq!(shrink[0].kind(), OpKind::Delete);
    assert_eq!(shrink[0].text(), "hello");
}

use textop::{AtomicIdGenerator, CanonicalDocument, DocumentError};

fn doc(base: &str) -> CanonicalDocument {
    CanonicalDocument::with_ids(base, AtomicIdGenerator::new().shared())
}

#[test]
fn interleaved_view_and_upstream_edits() {
    let mut ace = doc("ACE");
    ace.insert(1, "BBBB", ace.version()).unwrap();
    let mut view = ace.as_of(ace.version() - 1).unwrap();
    view.insert(&mut ace, 2, "DDDD", view.version()).unwrap();

    ace.insert(5, "CCC", ace.version()).unwrap();
    view.insert(&mut ace, 0, "AAA", view.version()).unwrap();
    let end = view.text().chars().count();
    view.insert(&mut ace, end, "FFFF", view.version()).unwrap();

    assert_eq!(ace.text(), "AAAABBBBCCCCDDDDEFFFF");
    assert_eq!(view.text(), "AAAACDDDDEFFFF");
    assert_eq!(ace.version(), 6);
    assert_eq!(view.version(), 4);
}

#[test]
fn view_forked_before_the_base_text() {
    let mut d = doc("abc");
    let mut view = d.as_of(0).unwrap();
    view.insert(&mut d, 0, "xy", 0).unwrap();

    assert_eq!(view.text(), "xy");
    assert_eq!(d.text(), "abcxy");
    assert_eq!(d.version(), 2);
}

#[test]
fn view_forked_at_a_later_version() {
    let mut d = doc("abc");
    d.insert(3, "d", 1).unwrap();
    d.insert(0, "z", 2).unwrap();

    let mut view = d.as_of(2).unwrap();
    assert_eq!(view.text(), "abcd");
    view.insert(&mut d, 4, "!", 2).unwrap();

    assert_eq!(view.text(), "abcd!");
    assert_eq!(d.text(), "zabcd!");
}

#[test]
fn sibling_views_share_one_upstream() {
    let mut d = doc("0123456789");
    let mut left = d.as_of(1).unwrap();
    let mut right = d.as_of(1).unwrap();

    left.insert(&mut d, 0, "A", 1).unwrap();
    right.insert(&mut d, 10, "B", 1).unwrap();
    left.delete(&mut d, 1, "0", 2).unwrap();

    assert_eq!(d.text(), "A123456789B");
    assert_eq!(left.text(), "A123456789");
    assert_eq!(right.text(), "0123456789B");
}

#[test]
fn view_ops_list_prefix_then_local_edits() {
    let mut d = doc("ab");
    d.insert(2, "c", 1).unwrap();
    let mut view = d.as_of(2).unwrap();
    let id = view.insert(&mut d, 0, "x", 2).unwrap();

    let ops: Vec<_> = view.ops(&d).unwrap().collect();
    assert_eq!(ops.len(), 3);
    assert_eq!(ops[0].text(), "ab");
    assert_eq!(ops[1].text(), "c");
    assert_eq!(ops[2].id(), id);
}

#[test]
fn view_rejects_a_different_upstream() {
    let mut a = doc("same");
    let b = doc("same");
    let view = a.as_of(1).unwrap();
    assert!(matches!(view.ops(&b), Err(DocumentError::UpstreamMismatch)));
    a.insert(0, "x", 1).unwrap();
    assert!(view.ops(&a).is_ok());
}

use pick_bot::matcher::signature::{shape_fingerprint, shape_signature};
use pick_bot::{Document, DocumentTree, DomSnapshot, is_structurally_equal};

use crate::common::{el, rows_page, todo_page};

mod common;

/// `ul` holding the given `li` elements.
fn list(items: Vec<DomSnapshot>) -> Document {
    Document::from_snapshot(&DomSnapshot::new("ul").children(items))
}

fn li() -> DomSnapshot {
    DomSnapshot::new("li")
}

// =========================================================================
// Positive matches
// =========================================================================

#[test]
fn identical_rows_match() {
    let doc = rows_page();
    assert!(is_structurally_equal(&doc, el(&doc, "/0/0/0"), el(&doc, "/0/0/2")));
}

#[test]
fn text_values_and_other_attributes_are_ignored() {
    let doc = list(vec![
        li().attr("class", "row").attr("data-id", "1").value("first"),
        li().attr("class", "row").attr("data-id", "2").value("second"),
    ]);
    assert!(is_structurally_equal(&doc, el(&doc, "/0"), el(&doc, "/1")));
}

#[test]
fn rows_in_different_lists_match_when_parents_share_a_tag() {
    let doc = Document::from_snapshot(
        &DomSnapshot::new("div")
            .child(DomSnapshot::new("ul").child(li().attr("class", "row")))
            .child(DomSnapshot::new("ul").child(li().attr("class", "row"))),
    );
    assert!(is_structurally_equal(&doc, el(&doc, "/0/0"), el(&doc, "/1/0")));
}

// =========================================================================
// Mismatches
// =========================================================================

#[test]
fn different_tags_do_not_match() {
    let doc = list(vec![li(), DomSnapshot::new("div")]);
    assert!(!is_structurally_equal(&doc, el(&doc, "/0"), el(&doc, "/1")));
}

#[test]
fn different_parent_tags_do_not_match() {
    let doc = Document::from_snapshot(
        &DomSnapshot::new("div")
            .child(DomSnapshot::new("ul").child(li()))
            .child(DomSnapshot::new("ol").child(li())),
    );
    assert!(
        !is_structurally_equal(&doc, el(&doc, "/0/0"), el(&doc, "/1/0")),
        "only the direct parent tag is compared, and it differs"
    );
}

#[test]
fn co_positioned_class_or_id_must_agree() {
    let doc = list(vec![
        li().attr("class", "row"),
        li().attr("class", "row selected"),
        li().attr("id", "a"),
        li().attr("id", "b"),
    ]);
    assert!(!is_structurally_equal(&doc, el(&doc, "/0"), el(&doc, "/1")), "class differs");
    assert!(!is_structurally_equal(&doc, el(&doc, "/2"), el(&doc, "/3")), "id differs");
}

#[test]
fn child_count_must_agree() {
    let doc = list(vec![
        li().child(DomSnapshot::new("span")),
        li().child(DomSnapshot::new("span")).child(DomSnapshot::new("span")),
    ]);
    assert!(!is_structurally_equal(&doc, el(&doc, "/0"), el(&doc, "/1")));
}

#[test]
fn children_are_compared_recursively() {
    let doc = list(vec![
        li().child(DomSnapshot::new("span").child(DomSnapshot::new("b"))),
        li().child(DomSnapshot::new("span").child(DomSnapshot::new("i"))),
    ]);
    assert!(
        !is_structurally_equal(&doc, el(&doc, "/0"), el(&doc, "/1")),
        "grandchildren differ in tag"
    );
}

// =========================================================================
// Positional attribute comparison (documented quirk)
// =========================================================================

#[test]
fn attribute_order_matters_for_class_and_id() {
    // Same class and id, declared in opposite order: index 0 compares the
    // class value of one against the id value of the other.
    let doc = list(vec![
        li().attr("class", "row").attr("id", "r1"),
        li().attr("id", "r1").attr("class", "row"),
    ]);
    assert!(!is_structurally_equal(&doc, el(&doc, "/0"), el(&doc, "/1")));
}

#[test]
fn class_shifted_by_another_attribute_is_not_compared() {
    let doc = list(vec![
        li().attr("data-k", "1").attr("class", "alpha"),
        li().attr("class", "beta"),
    ]);
    assert!(
        is_structurally_equal(&doc, el(&doc, "/0"), el(&doc, "/1")),
        "index 0 pairs data-k with class and is skipped; index 1 has no partner"
    );
}

#[test]
fn equal_class_and_id_values_in_same_slots_match() {
    let doc = list(vec![
        li().attr("class", "row").attr("id", "x"),
        li().attr("class", "row").attr("id", "x"),
    ]);
    assert!(is_structurally_equal(&doc, el(&doc, "/0"), el(&doc, "/1")));
}

#[test]
fn match_is_not_transitive() {
    let doc = list(vec![
        li().attr("class", "x"),
        li().attr("data-k", "1"),
        li().attr("class", "y"),
    ]);
    let (a, b, c) = (el(&doc, "/0"), el(&doc, "/1"), el(&doc, "/2"));
    assert!(is_structurally_equal(&doc, a, b));
    assert!(is_structurally_equal(&doc, b, c));
    assert!(!is_structurally_equal(&doc, a, c));
}

// =========================================================================
// Symmetry and reflexivity
// =========================================================================

#[test]
fn match_is_symmetric_and_reflexive_across_a_page() {
    let doc = todo_page();
    let all: Vec<_> = doc.walk().into_iter().map(|(e, _)| e).collect();

    for a in &all {
        assert!(is_structurally_equal(&doc, *a, *a), "{} not reflexive", doc.describe(*a));
        for b in &all {
            assert_eq!(
                is_structurally_equal(&doc, *a, *b),
                is_structurally_equal(&doc, *b, *a),
                "asymmetric for {} / {}",
                doc.describe(*a),
                doc.describe(*b)
            );
        }
    }
}

// =========================================================================
// Shape signatures
// =========================================================================

#[test]
fn shape_signature_renders_matched_features() {
    let doc = rows_page();
    assert_eq!(shape_signature(&doc, el(&doc, "/0/0/1")), "ul>li[class=row](span)");
    assert_eq!(shape_signature(&doc, doc.root()), ">body(div[id=app](ul(li[class=row](span),li[class=row](span),li[class=row](span))))");
}

#[test]
fn sibling_rows_share_a_fingerprint() {
    let doc = todo_page();
    let first = shape_fingerprint(&doc, el(&doc, "/0/0/1/0"));
    let third = shape_fingerprint(&doc, el(&doc, "/0/0/1/2"));
    let add = shape_fingerprint(&doc, el(&doc, "/0/0/2"));
    assert_eq!(first, third);
    assert_ne!(first, add);
    assert_eq!(first.len(), 12);
    assert!(doc.tag_name(doc.root()).is_some());
}

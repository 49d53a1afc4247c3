use crate::dom::dom_model::ElementId;
use crate::dom::tree::DocumentTree;

/// Attribute names whose values take part in structural comparison.
pub const COMPARED_ATTRIBUTES: [&str; 2] = ["class", "id"];

/// Decide whether `a` and `b` are "the same kind of thing": same tag, same
/// parent tag, same class/id where co-positioned, same child shape.
///
/// Attributes are compared by position, not by name. At each index of `a`'s
/// attribute list the pair is checked only when *both* names are `class` or
/// `id`; every other index is skipped. So `<li class="x" id="y">` and
/// `<li id="y" class="x">` are compared value-against-value (`x` vs `y`) and
/// differ, while `<li data-k="1" class="x">` and `<li class="z">` never look
/// at the classes at all. The relation is symmetric and reflexive but not
/// transitive.
pub fn is_structurally_equal<T: DocumentTree + ?Sized>(
    tree: &T,
    a: ElementId,
    b: ElementId,
) -> bool {
    if tree.tag_name(a) != tree.tag_name(b) {
        return false;
    }

    let parent_tag_a = tree.parent(a).and_then(|p| tree.tag_name(p));
    let parent_tag_b = tree.parent(b).and_then(|p| tree.tag_name(p));
    if parent_tag_a != parent_tag_b {
        return false;
    }

    if !compared_attributes_agree(tree, a, b) {
        return false;
    }

    let children_a = tree.children(a);
    let children_b = tree.children(b);
    if children_a.len() != children_b.len() {
        return false;
    }

    children_a
        .iter()
        .zip(children_b)
        .all(|(ca, cb)| is_structurally_equal(tree, *ca, *cb))
}

fn compared_attributes_agree<T: DocumentTree + ?Sized>(tree: &T, a: ElementId, b: ElementId) -> bool {
    let attrs_b = tree.attributes(b);

    tree.attributes(a).iter().enumerate().all(|(i, attr_a)| {
        let Some(attr_b) = attrs_b.get(i) else {
            return true;
        };
        if !is_compared(&attr_a.name) || !is_compared(&attr_b.name) {
            return true;
        }
        tree.attribute(a, &attr_a.name) == tree.attribute(b, &attr_b.name)
    })
}

fn is_compared(name: &str) -> bool {
    COMPARED_ATTRIBUTES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::document::Document;
    use crate::dom::dom_model::DomSnapshot;

    #[test]
    fn parentless_elements_compare_on_their_own_shape() {
        let doc = Document::from_snapshot(&DomSnapshot::new("ul"));
        assert!(is_structurally_equal(&doc, doc.root(), doc.root()));
    }

    #[test]
    fn unknown_handles_never_match_known_ones() {
        let doc = Document::from_snapshot(&DomSnapshot::new("ul"));
        assert!(!is_structurally_equal(&doc, doc.root(), ElementId(99)));
    }
}

use sha1::{Digest, Sha1};

use crate::dom::dom_model::ElementId;
use crate::dom::tree::DocumentTree;
use crate::matcher::structural::COMPARED_ATTRIBUTES;

/// Canonical rendering of the parts of an element the matcher looks at,
/// e.g. `ul>li[class=row](span)`.
///
/// Only class/id values are rendered, in declaration order. Because the
/// matcher pairs attributes by position, a shared signature is a strong hint
/// of a match but not a guarantee in either direction.
pub fn shape_signature<T: DocumentTree + ?Sized>(tree: &T, el: ElementId) -> String {
    let parent_tag = tree
        .parent(el)
        .and_then(|p| tree.tag_name(p))
        .unwrap_or("");
    format!("{}>{}", parent_tag, subtree_signature(tree, el))
}

fn subtree_signature<T: DocumentTree + ?Sized>(tree: &T, el: ElementId) -> String {
    let mut out = tree.tag_name(el).unwrap_or("?").to_string();

    let keyed: Vec<String> = tree
        .attributes(el)
        .iter()
        .filter(|a| COMPARED_ATTRIBUTES.contains(&a.name.as_str()))
        .map(|a| format!("{}={}", a.name, a.value))
        .collect();
    if !keyed.is_empty() {
        out.push_str(&format!("[{}]", keyed.join(",")));
    }

    let children = tree.children(el);
    if !children.is_empty() {
        let inner: Vec<String> = children
            .iter()
            .map(|c| subtree_signature(tree, *c))
            .collect();
        out.push_str(&format!("({})", inner.join(",")));
    }
    out
}

/// Short SHA-1 of the shape signature, for grouping and trace output.
pub fn shape_fingerprint<T: DocumentTree + ?Sized>(tree: &T, el: ElementId) -> String {
    let mut hasher = Sha1::new();
    hasher.update(shape_signature(tree, el).as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}

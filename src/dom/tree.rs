use crate::dom::dom_model::{Attribute, ElementId, Highlight};
use crate::dom::error::DomError;

/// Read access to a rendered element tree, plus the few writes the picker
/// needs (highlights, activation, input values).
///
/// Unknown handles read as empty: no tag, no parent, no attributes, no
/// children. Only the writing operations report `DomError`.
pub trait DocumentTree {
    /// The container the first picking pass scans.
    fn root_container(&self) -> Option<ElementId>;

    fn tag_name(&self, el: ElementId) -> Option<&str>;

    fn parent(&self, el: ElementId) -> Option<ElementId>;

    fn attributes(&self, el: ElementId) -> &[Attribute];

    fn children(&self, el: ElementId) -> &[ElementId];

    fn highlight(&self, el: ElementId) -> Highlight;

    fn set_highlight(&mut self, el: ElementId, highlight: Highlight);

    fn can_activate(&self, el: ElementId) -> bool;

    /// Simulate a user click.
    fn activate(&mut self, el: ElementId) -> Result<(), DomError>;

    fn set_value(&mut self, el: ElementId, value: &str) -> Result<(), DomError>;

    fn is_input(&self, el: ElementId) -> bool {
        self.tag_name(el)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("input"))
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
        self.attributes(el)
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Every element below `el` in document (pre-)order, excluding `el`.
    fn descendants(&self, el: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(el).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Ancestors of `el`, nearest first.
    fn ancestors(&self, el: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut current = self.parent(el);
        while let Some(p) = current {
            out.push(p);
            current = self.parent(p);
        }
        out
    }
}

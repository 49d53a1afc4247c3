use std::collections::BTreeSet;

use crate::dom::dom_model::ElementId;
use crate::dom::tree::DocumentTree;

/// Hover/click interception on individual elements.
///
/// Both operations are idempotent: attaching twice or detaching an element
/// that was never attached does nothing.
pub trait EventWiring {
    fn attach(&mut self, el: ElementId);
    fn detach(&mut self, el: ElementId);
    fn is_attached(&self, el: ElementId) -> bool;
}

/// What the host should do with a click after the picker saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Default behaviour and propagation suppressed.
    Suppressed,
    /// Nobody intercepted it; the page handles the click.
    PassThrough,
}

/// In-process listener table.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    attached: BTreeSet<ElementId>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}

impl EventWiring for ListenerRegistry {
    fn attach(&mut self, el: ElementId) {
        self.attached.insert(el);
    }

    fn detach(&mut self, el: ElementId) {
        self.attached.remove(&el);
    }

    fn is_attached(&self, el: ElementId) -> bool {
        self.attached.contains(&el)
    }
}

/// Nearest element at or above `target` with a listener attached, i.e. the
/// element whose handler sees an event dispatched on `target`.
pub fn route<T, W>(tree: &T, wiring: &W, target: ElementId) -> Option<ElementId>
where
    T: DocumentTree + ?Sized,
    W: EventWiring + ?Sized,
{
    std::iter::once(target)
        .chain(tree.ancestors(target))
        .find(|el| wiring.is_attached(*el))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::document::Document;
    use crate::dom::dom_model::DomSnapshot;

    #[test]
    fn attach_and_detach_are_idempotent() {
        let mut wiring = ListenerRegistry::new();
        wiring.attach(ElementId(1));
        wiring.attach(ElementId(1));
        assert_eq!(wiring.len(), 1);
        wiring.detach(ElementId(1));
        wiring.detach(ElementId(1));
        wiring.detach(ElementId(7));
        assert!(wiring.is_empty());
    }

    #[test]
    fn events_bubble_to_nearest_listener() {
        let doc = Document::from_snapshot(
            &DomSnapshot::new("ul").child(DomSnapshot::new("li").child(DomSnapshot::new("span"))),
        );
        let li = doc.children(doc.root())[0];
        let span = doc.children(li)[0];

        let mut wiring = ListenerRegistry::new();
        assert_eq!(route(&doc, &wiring, span), None);

        wiring.attach(doc.root());
        wiring.attach(li);
        assert_eq!(route(&doc, &wiring, span), Some(li));
        assert_eq!(route(&doc, &wiring, doc.root()), Some(doc.root()));
    }
}

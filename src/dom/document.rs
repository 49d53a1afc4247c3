use crate::dom::dom_model::{Attribute, DomSnapshot, ElementId, ElementLocator, Highlight};
use crate::dom::error::DomError;
use crate::dom::tree::DocumentTree;

/// Id of the element whose first child is the picking surface.
pub const DEFAULT_HOST_ID: &str = "app";

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: Vec<Attribute>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    highlight: Highlight,
    value: Option<String>,
    activatable: bool,
    connected: bool,
    activations: u32,
}

/// Arena-backed element tree used as the picker's host outside a browser.
///
/// Built from a `DomSnapshot`. Element handles are indices into the arena
/// and stay valid after `remove`, which only disconnects the subtree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: ElementId,
    host_id: String,
}

impl Document {
    pub fn from_snapshot(snapshot: &DomSnapshot) -> Self {
        let mut doc = Document {
            nodes: Vec::new(),
            root: ElementId(0),
            host_id: DEFAULT_HOST_ID.to_string(),
        };
        doc.root = doc.insert(snapshot, None);
        doc
    }

    /// Parse a YAML (or JSON) snapshot.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        let snapshot: DomSnapshot = serde_yaml::from_str(content)?;
        Ok(Self::from_snapshot(&snapshot))
    }

    pub fn with_host_id(mut self, host_id: &str) -> Self {
        self.host_id = host_id.to_string();
        self
    }

    fn insert(&mut self, snapshot: &DomSnapshot, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node {
            tag: snapshot.tag.clone(),
            attributes: snapshot.attributes.clone(),
            parent,
            children: vec![],
            highlight: Highlight::None,
            value: snapshot.value.clone(),
            activatable: snapshot.activatable,
            connected: true,
            activations: 0,
        });

        for child in &snapshot.children {
            let child_id = self.insert(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn host_id(&self) -> &str {
        &self.host_id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_connected(&self, el: ElementId) -> bool {
        self.nodes.get(el.0).is_some_and(|n| n.connected)
    }

    pub fn value(&self, el: ElementId) -> Option<&str> {
        self.nodes.get(el.0).and_then(|n| n.value.as_deref())
    }

    pub fn activation_count(&self, el: ElementId) -> u32 {
        self.nodes.get(el.0).map_or(0, |n| n.activations)
    }

    /// First connected element carrying `id="<id>"`, in document order.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|el| self.is_connected(*el))
            .find(|el| self.attribute(*el, "id") == Some(id))
    }

    pub fn resolve(&self, locator: &ElementLocator) -> Option<ElementId> {
        match locator {
            ElementLocator::Id(id) => self.element_by_id(id),
            ElementLocator::Path(path) => path.iter().try_fold(self.root, |el, idx| {
                self.nodes.get(el.0)?.children.get(*idx).copied()
            }),
        }
    }

    /// Path locator for a connected element.
    pub fn locator_of(&self, el: ElementId) -> Option<ElementLocator> {
        if !self.is_connected(el) {
            return None;
        }
        let mut path = Vec::new();
        let mut current = el;
        while let Some(parent) = self.parent(current) {
            let idx = self.children(parent).iter().position(|c| *c == current)?;
            path.push(idx);
            current = parent;
        }
        if current != self.root {
            return None;
        }
        path.reverse();
        Some(ElementLocator::Path(path))
    }

    /// Disconnect `el` and its subtree from the document.
    pub fn remove(&mut self, el: ElementId) -> Result<(), DomError> {
        if !self.is_connected(el) {
            return Err(match self.nodes.get(el.0) {
                Some(_) => DomError::Detached(el),
                None => DomError::UnknownElement(el),
            });
        }

        if let Some(parent) = self.nodes[el.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != el);
        }

        let mut stack = vec![el];
        while let Some(next) = stack.pop() {
            let node = &mut self.nodes[next.0];
            node.connected = false;
            stack.extend(node.children.iter().copied());
        }
        Ok(())
    }

    /// Short opening-tag rendering, e.g. `<li class="row">`.
    pub fn describe(&self, el: ElementId) -> String {
        let Some(node) = self.nodes.get(el.0) else {
            return format!("<unknown {}>", el);
        };
        let mut out = format!("<{}", node.tag);
        for attr in &node.attributes {
            out.push_str(&format!(" {}=\"{}\"", attr.name, attr.value));
        }
        out.push('>');
        out
    }

    /// Every connected element with its depth, in document order.
    pub fn walk(&self) -> Vec<(ElementId, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((el, depth)) = stack.pop() {
            out.push((el, depth));
            for child in self.children(el).iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        out
    }

    /// Indented dump of the tree with locators, values and highlights.
    pub fn render_outline(&self) -> String {
        let mut out = String::new();
        for (el, depth) in self.walk() {
            let locator = self
                .locator_of(el)
                .map(|l| l.to_string())
                .unwrap_or_default();
            out.push_str(&format!("{}{} {}", "  ".repeat(depth), locator, self.describe(el)));
            if let Some(value) = self.value(el) {
                out.push_str(&format!(" value={:?}", value));
            }
            let highlight = self.highlight(el);
            if highlight.is_set() {
                out.push_str(&format!(" [{}]", highlight.outline()));
            }
            out.push('\n');
        }
        out
    }

    fn live_node_mut(&mut self, el: ElementId) -> Result<&mut Node, DomError> {
        match self.nodes.get_mut(el.0) {
            Some(node) if node.connected => Ok(node),
            Some(_) => Err(DomError::Detached(el)),
            None => Err(DomError::UnknownElement(el)),
        }
    }
}

impl DocumentTree for Document {
    fn root_container(&self) -> Option<ElementId> {
        let host = self.element_by_id(&self.host_id)?;
        self.children(host).first().copied()
    }

    fn tag_name(&self, el: ElementId) -> Option<&str> {
        self.nodes.get(el.0).map(|n| n.tag.as_str())
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.nodes.get(el.0).and_then(|n| n.parent)
    }

    fn attributes(&self, el: ElementId) -> &[Attribute] {
        self.nodes
            .get(el.0)
            .map(|n| n.attributes.as_slice())
            .unwrap_or(&[])
    }

    fn children(&self, el: ElementId) -> &[ElementId] {
        self.nodes
            .get(el.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    fn highlight(&self, el: ElementId) -> Highlight {
        self.nodes.get(el.0).map_or(Highlight::None, |n| n.highlight)
    }

    fn set_highlight(&mut self, el: ElementId, highlight: Highlight) {
        if let Some(node) = self.nodes.get_mut(el.0) {
            node.highlight = highlight;
        }
    }

    fn can_activate(&self, el: ElementId) -> bool {
        self.nodes.get(el.0).is_some_and(|n| n.activatable)
    }

    fn activate(&mut self, el: ElementId) -> Result<(), DomError> {
        let node = self.live_node_mut(el)?;
        if !node.activatable {
            return Err(DomError::NotActivatable(el));
        }
        node.activations += 1;
        Ok(())
    }

    fn set_value(&mut self, el: ElementId, value: &str) -> Result<(), DomError> {
        if !self.is_input(el) {
            return match self.nodes.get(el.0) {
                Some(_) => Err(DomError::NotAnInput(el)),
                None => Err(DomError::UnknownElement(el)),
            };
        }
        let node = self.live_node_mut(el)?;
        node.value = Some(value.to_string());
        Ok(())
    }
}

use crate::dom::dom_model::{ElementId, Highlight};
use crate::dom::tree::DocumentTree;
use crate::picker::picker_model::{ActionKind, PickerState};

/// Which bucket a clicked candidate's prediction lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickRole {
    /// First pass: the prediction becomes the loop targets.
    LoopUnit,
    /// The prediction becomes the click targets.
    ClickTarget,
    /// The prediction becomes the input targets.
    InputTarget,
}

impl ClickRole {
    pub fn highlight(&self) -> Highlight {
        match self {
            ClickRole::LoopUnit => Highlight::Blue,
            ClickRole::ClickTarget | ClickRole::InputTarget => Highlight::Green,
        }
    }
}

// Scan filter and click outcome live side by side so a new kind has to
// answer both.
impl ActionKind {
    /// Whether a scan candidate can be predicted while this kind is active.
    pub fn accepts<T: DocumentTree + ?Sized>(&self, tree: &T, el: ElementId) -> bool {
        match self {
            ActionKind::Click => tree.can_activate(el) && !tree.is_input(el),
            ActionKind::Input => tree.is_input(el),
            ActionKind::None => true,
        }
    }

    pub fn click_role(&self) -> ClickRole {
        match self {
            ActionKind::None => ClickRole::LoopUnit,
            ActionKind::Click => ClickRole::ClickTarget,
            ActionKind::Input => ClickRole::InputTarget,
        }
    }
}

impl PickerState {
    pub fn bucket_for(&self, role: ClickRole) -> &Vec<ElementId> {
        match role {
            ClickRole::LoopUnit => &self.loop_targets,
            ClickRole::ClickTarget => &self.click_targets,
            ClickRole::InputTarget => &self.input_targets,
        }
    }

    pub fn bucket_for_mut(&mut self, role: ClickRole) -> &mut Vec<ElementId> {
        match role {
            ClickRole::LoopUnit => &mut self.loop_targets,
            ClickRole::ClickTarget => &mut self.click_targets,
            ClickRole::InputTarget => &mut self.input_targets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::document::Document;
    use crate::dom::dom_model::DomSnapshot;

    #[test]
    fn kinds_filter_candidates() {
        let doc = Document::from_snapshot(
            &DomSnapshot::new("form")
                .child(DomSnapshot::new("input"))
                .child(DomSnapshot::new("button"))
                .child(DomSnapshot::new("span").inert()),
        );
        let kids = doc.children(doc.root()).to_vec();
        let (input, button, span) = (kids[0], kids[1], kids[2]);

        assert!(ActionKind::Input.accepts(&doc, input));
        assert!(!ActionKind::Input.accepts(&doc, button));
        assert!(ActionKind::Click.accepts(&doc, button));
        assert!(!ActionKind::Click.accepts(&doc, input), "inputs are filled, not clicked");
        assert!(!ActionKind::Click.accepts(&doc, span));
        assert!(ActionKind::None.accepts(&doc, span));
    }

    #[test]
    fn roles_pick_bucket_and_colour() {
        assert_eq!(ActionKind::None.click_role().highlight(), Highlight::Blue);
        assert_eq!(ActionKind::Input.click_role(), ClickRole::InputTarget);
        assert_eq!(ActionKind::Click.click_role().highlight(), Highlight::Green);
    }
}

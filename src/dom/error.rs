use crate::dom::dom_model::ElementId;

/// Failures raised by a document host when the picker touches an element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("element {0} does not exist in this document")]
    UnknownElement(ElementId),

    /// The element was removed from the tree, e.g. by an earlier activation.
    #[error("element {0} is no longer attached to the document")]
    Detached(ElementId),

    #[error("element {0} is not an input and cannot take a value")]
    NotAnInput(ElementId),

    #[error("element {0} cannot be activated")]
    NotActivatable(ElementId),
}

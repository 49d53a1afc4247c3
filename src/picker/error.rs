use crate::dom::error::DomError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    /// The document has no picking surface to scan or wire up.
    #[error("picking surface not found in document")]
    MissingRootContainer,

    #[error(transparent)]
    Dom(#[from] DomError),
}

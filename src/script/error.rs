use crate::dom::dom_model::ElementLocator;
use crate::dom::error::DomError;
use crate::picker::error::PickerError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("no element matches locator '{0}'")]
    UnresolvedLocator(ElementLocator),

    #[error(transparent)]
    Picker(#[from] PickerError),

    #[error(transparent)]
    Dom(#[from] DomError),
}

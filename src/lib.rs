//! Teach-by-example element picker.
//!
//! Point at one element, get every structurally similar element predicted,
//! record the predictions as loop units, click targets or input targets,
//! then replay the recorded actions.

pub mod bot;
pub mod cli;
pub mod dom;
pub mod matcher;
pub mod picker;
pub mod report;
pub mod script;
pub mod trace;
pub mod wiring;

pub use crate::{
    bot::runner::{BotRunner, PlaybackSummary},
    dom::{
        document::Document,
        dom_model::{Attribute, DomSnapshot, ElementId, ElementLocator, Highlight},
        error::DomError,
        tree::DocumentTree,
    },
    matcher::structural::is_structurally_equal,
    picker::{
        error::PickerError,
        machine::Picker,
        picker_model::{ActionKind, PickerState, Stage, Step},
    },
    wiring::listeners::{ClickDisposition, EventWiring, ListenerRegistry},
};

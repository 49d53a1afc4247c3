use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dom::dom_model::ElementId;

/// Role assigned to elements picked from now on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// First pass: picking the repeating unit.
    #[default]
    None,
    Click,
    Input,
}

/// Coarse interaction mode gating hover prediction and click selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Idle,
    Picking,
    /// Loop targets are fixed; clicks are swallowed but select nothing.
    LoopLocked,
    /// Playback in progress; clicks reach the page.
    Running,
}

/// Progress marker inside the picking flow. Decides the scan root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    #[default]
    NotStarted = 0,
    ChoosingLoop = 1,
    LoopLocked = 2,
    ChoosingTargets = 3,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("step must be between 0 and 3, got {0}")]
pub struct InvalidStep(pub u8);

impl TryFrom<u8> for Step {
    type Error = InvalidStep;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Step::NotStarted),
            1 => Ok(Step::ChoosingLoop),
            2 => Ok(Step::LoopLocked),
            3 => Ok(Step::ChoosingTargets),
            other => Err(InvalidStep(other)),
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step as u8
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Everything the picker remembers between notifications.
///
/// `PickerState::new()` is the reset value. Buckets hold handles only; the
/// document owns the elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PickerState {
    pub stage: Stage,
    pub step: Step,
    pub action_kind: ActionKind,

    // ---- Buckets ----
    pub prediction: Vec<ElementId>, // rebuilt on every hover
    pub loop_targets: Vec<ElementId>,
    pub click_targets: Vec<ElementId>,
    pub input_targets: Vec<ElementId>,

    /// How many times the user re-confirmed the current loop selection.
    pub selected_count: u32,
    /// Text entered for the input action.
    pub input_value: String,
    /// Whether the input-value entry field is surfaced.
    pub show_input_value: bool,
}

impl PickerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Member of loop, click or input targets.
    pub fn is_recorded(&self, el: ElementId) -> bool {
        self.loop_targets.contains(&el)
            || self.click_targets.contains(&el)
            || self.input_targets.contains(&el)
    }

    pub fn action_in_progress(&self) -> bool {
        self.action_kind != ActionKind::None
    }

    /// One-line status, e.g. `stage=picking step=1 kind=none prediction=3 loop=0 ...`.
    pub fn summary(&self) -> String {
        format!(
            "stage={:?} step={} kind={:?} prediction={} loop={} click={} input={} selected={}",
            self.stage,
            self.step,
            self.action_kind,
            self.prediction.len(),
            self.loop_targets.len(),
            self.click_targets.len(),
            self.input_targets.len(),
            self.selected_count,
        )
        .to_lowercase()
    }
}

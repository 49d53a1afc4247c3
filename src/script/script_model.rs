use serde::{Deserialize, Serialize};

use crate::{
    bot::runner::PlaybackSummary,
    dom::dom_model::{ElementLocator, Highlight},
    picker::picker_model::{ActionKind, Stage, Step},
};

/// A recorded picker session: the commands a user issued, in order, with
/// checks in between. Deserialized from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionScript {
    /// Human-readable name for this session
    pub name: String,

    /// Ordered list of steps to replay against the picker
    pub steps: Vec<ScriptStep>,
}

/// A single user command or notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    StartPicking,

    /// Pointer moves over an element
    Hover { target: ElementLocator },

    /// User clicks an element (intercepted or passed to the page)
    Click { target: ElementLocator },

    /// Lock the loop selection and move to the given step
    LockLoop {
        #[serde(default = "default_lock_step")]
        step: Step,
    },

    ChooseClick,
    ChooseInput,
    SaveAction,
    ResetAction,
    ResetToStart,
    ResetAll,

    /// Type into the input-value field
    SetInputValue { value: String },

    /// Run the bot; falls back to the entered input value
    Run {
        #[serde(default)]
        input_value: Option<String>,
    },

    /// Page removes an element on its own
    Remove { target: ElementLocator },

    /// Check picker and page state
    Expect { checks: Vec<Check> },
}

fn default_lock_step() -> Step {
    Step::LoopLocked
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketName {
    Prediction,
    LoopTargets,
    ClickTargets,
    InputTargets,
}

/// A single check against the picker or the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    Stage { expected: Stage },

    Step { expected: Step },

    ActionKind { expected: ActionKind },

    /// Number of elements in a bucket
    BucketSize { bucket: BucketName, expected: usize },

    /// Bucket contains the element
    BucketContains {
        bucket: BucketName,
        target: ElementLocator,
    },

    SelectedCount { expected: u32 },

    InputFieldVisible { expected: bool },

    Highlight {
        target: ElementLocator,
        expected: Highlight,
    },

    /// Current value of an input; `None` means never set
    Value {
        target: ElementLocator,
        expected: Option<String>,
    },

    /// How many times the page saw the element activated
    Activations {
        target: ElementLocator,
        expected: u32,
    },
}

/// Result of evaluating a single check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckResult {
    /// Which step this check belongs to (0-indexed)
    pub step_index: usize,

    pub check: Check,

    pub passed: bool,

    /// Actual value found (for debugging failed checks)
    pub actual: Option<String>,

    /// Human-readable failure message
    pub message: Option<String>,
}

/// Result of replaying a complete session script.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptResult {
    pub script_name: String,

    /// Whether all steps ran and all checks passed
    pub passed: bool,

    pub steps_run: usize,

    pub check_results: Vec<CheckResult>,

    /// One entry per successful `run` step
    pub playbacks: Vec<PlaybackSummary>,

    /// Error message if a step failed outright
    pub error: Option<String>,
}

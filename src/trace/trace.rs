use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{dom::dom_model::ElementId, picker::picker_model::PickerState};

/// One line of the JSONL picker trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub seq: u64,

    pub command: String,

    pub stage: String,
    pub step: u8,
    pub action_kind: String,

    pub target: Option<String>,
    pub shape: Option<String>,

    // ---- Bucket sizes after the command ----
    pub prediction: usize,
    pub loop_targets: usize,
    pub click_targets: usize,
    pub input_targets: usize,

    pub note: Option<String>,
}

impl TraceEvent {
    pub fn now(seq: u64, command: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            seq,
            command: command.to_string(),
            stage: String::new(),
            step: 0,
            action_kind: String::new(),
            target: None,
            shape: None,
            prediction: 0,
            loop_targets: 0,
            click_targets: 0,
            input_targets: 0,
            note: None,
        }
    }

    pub fn with_state(mut self, state: &PickerState) -> Self {
        self.stage = format!("{:?}", state.stage);
        self.step = state.step.into();
        self.action_kind = format!("{:?}", state.action_kind);
        self.prediction = state.prediction.len();
        self.loop_targets = state.loop_targets.len();
        self.click_targets = state.click_targets.len();
        self.input_targets = state.input_targets.len();
        self
    }

    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn with_shape(mut self, fingerprint: impl ToString) -> Self {
        self.shape = Some(fingerprint.to_string());
        self
    }

    pub fn with_note(mut self, note: impl ToString) -> Self {
        self.note = Some(note.to_string());
        self
    }
}

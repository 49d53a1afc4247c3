use tracing::debug;

use crate::dom::document::Document;
use crate::dom::dom_model::{ElementId, ElementLocator};
use crate::dom::tree::DocumentTree;
use crate::picker::machine::Picker;
use crate::picker::picker_model::PickerState;
use crate::script::context::ScriptContext;
use crate::script::error::ScriptError;
use crate::script::script_model::{
    BucketName, Check, CheckResult, ScriptResult, ScriptStep, SessionScript,
};
use crate::wiring::listeners::{ClickDisposition, ListenerRegistry};

/// A picker driving the in-memory document host.
pub type DocumentPicker = Picker<Document, ListenerRegistry>;

/// Replays a `SessionScript` step by step against a picker.
pub struct ScriptRunner;

impl ScriptRunner {
    /// Run a complete script.
    ///
    /// Stops at the first failing step; checks that fail do not stop the
    /// script but mark it failed.
    pub fn run(script: &SessionScript, picker: &mut DocumentPicker) -> ScriptResult {
        let mut ctx = ScriptContext::new();

        for (i, step) in script.steps.iter().enumerate() {
            ctx.current_step = i;
            debug!(script = %script.name, step = i, ?step, "script step");

            if let Err(e) = Self::execute_step(step, i, picker, &mut ctx) {
                return ScriptResult {
                    script_name: script.name.clone(),
                    passed: false,
                    steps_run: i + 1,
                    check_results: ctx.check_results,
                    playbacks: ctx.playbacks,
                    error: Some(format!("Step {} failed: {}", i, e)),
                };
            }
        }

        ScriptResult {
            script_name: script.name.clone(),
            passed: ctx.all_passed(),
            steps_run: script.steps.len(),
            check_results: ctx.check_results,
            playbacks: ctx.playbacks,
            error: None,
        }
    }

    fn execute_step(
        step: &ScriptStep,
        step_index: usize,
        picker: &mut DocumentPicker,
        ctx: &mut ScriptContext,
    ) -> Result<(), ScriptError> {
        match step {
            ScriptStep::StartPicking => picker.start_picking()?,

            ScriptStep::Hover { target } => {
                let el = resolve(picker.tree(), target)?;
                picker.hover(el)?;
            }

            ScriptStep::Click { target } => {
                let el = resolve(picker.tree(), target)?;
                // Clicks nobody intercepted reach the page
                if picker.click(el) == ClickDisposition::PassThrough
                    && picker.tree().can_activate(el)
                {
                    picker.tree_mut().activate(el)?;
                }
            }

            ScriptStep::LockLoop { step } => picker.lock_loop_step(*step)?,
            ScriptStep::ChooseClick => picker.choose_click_action(),
            ScriptStep::ChooseInput => picker.choose_input_action(),
            ScriptStep::SaveAction => picker.save_action(),
            ScriptStep::ResetAction => picker.reset_action_in_progress(),
            ScriptStep::ResetToStart => picker.reset_to_start()?,
            ScriptStep::ResetAll => picker.reset_all(),
            ScriptStep::SetInputValue { value } => picker.set_input_value(value),

            ScriptStep::Run { input_value } => {
                let value = input_value
                    .clone()
                    .unwrap_or_else(|| picker.state().input_value.clone());
                let summary = picker.run(&value)?;
                ctx.record_playback(summary);
            }

            ScriptStep::Remove { target } => {
                let el = resolve(picker.tree(), target)?;
                picker.tree_mut().remove(el)?;
            }

            ScriptStep::Expect { checks } => {
                let results = checks
                    .iter()
                    .map(|check| Self::evaluate(check, step_index, picker))
                    .collect();
                ctx.record_checks(results);
            }
        }
        Ok(())
    }

    /// Evaluate a single check against the current picker and page state.
    fn evaluate(check: &Check, step_index: usize, picker: &DocumentPicker) -> CheckResult {
        let state = picker.state();
        let doc = picker.tree();

        // (passed, expected, actual)
        let outcome: Result<(bool, String, String), ScriptError> = match check {
            Check::Stage { expected } => Ok(compare(expected, &state.stage)),
            Check::Step { expected } => Ok(compare(expected, &state.step)),
            Check::ActionKind { expected } => Ok(compare(expected, &state.action_kind)),
            Check::SelectedCount { expected } => Ok(compare(expected, &state.selected_count)),
            Check::InputFieldVisible { expected } => {
                Ok(compare(expected, &state.show_input_value))
            }

            Check::BucketSize { bucket, expected } => {
                Ok(compare(expected, &bucket_of(state, *bucket).len()))
            }

            Check::BucketContains { bucket, target } => resolve(doc, target).map(|el| {
                let members = bucket_of(state, *bucket);
                (
                    members.contains(&el),
                    format!("{:?} contains {}", bucket, target),
                    format!("{} members", members.len()),
                )
            }),

            Check::Highlight { target, expected } => {
                resolve(doc, target).map(|el| compare(expected, &doc.highlight(el)))
            }

            Check::Value { target, expected } => resolve(doc, target).map(|el| {
                let actual = doc.value(el);
                (
                    actual == expected.as_deref(),
                    format!("{:?}", expected),
                    format!("{:?}", actual),
                )
            }),

            Check::Activations { target, expected } => {
                resolve(doc, target).map(|el| compare(expected, &doc.activation_count(el)))
            }
        };

        match outcome {
            Ok((passed, expected, actual)) => CheckResult {
                step_index,
                check: check.clone(),
                passed,
                message: if passed {
                    None
                } else {
                    Some(format!("expected {}, got {}", expected, actual))
                },
                actual: Some(actual),
            },
            Err(e) => CheckResult {
                step_index,
                check: check.clone(),
                passed: false,
                actual: None,
                message: Some(e.to_string()),
            },
        }
    }
}

fn compare<V: PartialEq + std::fmt::Debug>(expected: &V, actual: &V) -> (bool, String, String) {
    (
        expected == actual,
        format!("{:?}", expected),
        format!("{:?}", actual),
    )
}

fn bucket_of(state: &PickerState, bucket: BucketName) -> &[ElementId] {
    match bucket {
        BucketName::Prediction => &state.prediction,
        BucketName::LoopTargets => &state.loop_targets,
        BucketName::ClickTargets => &state.click_targets,
        BucketName::InputTargets => &state.input_targets,
    }
}

fn resolve(doc: &Document, locator: &ElementLocator) -> Result<ElementId, ScriptError> {
    doc.resolve(locator)
        .ok_or_else(|| ScriptError::UnresolvedLocator(locator.clone()))
}

use serde::Serialize;
use tracing::info;

use crate::dom::tree::DocumentTree;
use crate::picker::error::PickerError;
use crate::picker::machine::clear_recorded;
use crate::picker::picker_model::{PickerState, Stage, Step};
use crate::wiring::listeners::EventWiring;

/// What a playback actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlaybackSummary {
    pub inputs_filled: usize,
    pub clicks: usize,
}

/// Replays recorded input and click targets.
pub struct BotRunner;

impl BotRunner {
    /// Fill every input target with `input_value`, then activate every click
    /// target in bucket order, then reset the picker to step 0.
    ///
    /// An empty `input_value` leaves input targets untouched. The first host
    /// error aborts playback as-is: actions already applied stay applied and
    /// the stage stays `Running`.
    pub fn run<T, W>(
        tree: &mut T,
        wiring: &mut W,
        state: &mut PickerState,
        input_value: &str,
    ) -> Result<PlaybackSummary, PickerError>
    where
        T: DocumentTree + ?Sized,
        W: EventWiring + ?Sized,
    {
        state.stage = Stage::Running;
        let mut summary = PlaybackSummary::default();

        if !input_value.is_empty() {
            for el in &state.input_targets {
                tree.set_value(*el, input_value)?;
                summary.inputs_filled += 1;
            }
        }

        for el in &state.click_targets {
            tree.activate(*el)?;
            summary.clicks += 1;
        }

        info!(
            inputs_filled = summary.inputs_filled,
            clicks = summary.clicks,
            "playback finished"
        );

        state.stage = Stage::Idle;
        clear_recorded(tree, wiring, state);
        state.step = Step::NotStarted;

        Ok(summary)
    }
}

use tracing::{debug, warn};

use crate::{
    bot::runner::{BotRunner, PlaybackSummary},
    dom::{
        dom_model::{ElementId, Highlight},
        tree::DocumentTree,
    },
    matcher::signature::shape_fingerprint,
    picker::{
        action::ClickRole,
        error::PickerError,
        picker_model::{ActionKind, PickerState, Stage, Step},
        scanner::{self, ScanOutcome},
    },
    trace::{logger::TraceLogger, trace::TraceEvent},
    wiring::listeners::{ClickDisposition, EventWiring, ListenerRegistry, route},
};

/// The selection state machine, bound to one document and its listeners.
///
/// Every entry point takes `&mut self` and runs to completion; a host that
/// delivers events from several threads must put the whole picker behind a
/// single lock.
pub struct Picker<T, W = ListenerRegistry> {
    tree: T,
    wiring: W,
    state: PickerState,
    tracer: TraceLogger,
    seq: u64,
}

impl<T: DocumentTree, W: EventWiring> Picker<T, W> {
    pub fn new(tree: T, wiring: W) -> Self {
        Picker {
            tree,
            wiring,
            state: PickerState::new(),
            tracer: TraceLogger::disabled(),
            seq: 0,
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn action_kind(&self) -> ActionKind {
        self.state.action_kind
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    pub fn wiring(&self) -> &W {
        &self.wiring
    }

    // =====================================================================
    // Notifications
    // =====================================================================

    /// Pointer moved over `target`. Ignored unless a listener sits at or
    /// above it; `Ok(None)` also covers the inert locked-loop stage.
    pub fn hover(&mut self, target: ElementId) -> Result<Option<ScanOutcome>, PickerError> {
        if route(&self.tree, &self.wiring, target).is_none() {
            return Ok(None);
        }

        let outcome = scanner::scan(&mut self.tree, &mut self.state, target)?;
        if outcome.is_some() {
            self.record("hover", Some(target));
        }
        Ok(outcome)
    }

    /// Click on `target`, captured by the nearest listener.
    pub fn click(&mut self, target: ElementId) -> ClickDisposition {
        if route(&self.tree, &self.wiring, target).is_none() {
            return ClickDisposition::PassThrough;
        }

        match self.state.stage {
            Stage::Running => ClickDisposition::PassThrough,
            Stage::LoopLocked => {
                debug!(element = %target, "click swallowed while loop is locked");
                ClickDisposition::Suppressed
            }
            Stage::Idle | Stage::Picking => {
                self.click_candidate(target);
                ClickDisposition::Suppressed
            }
        }
    }

    // =====================================================================
    // Commands
    // =====================================================================

    pub fn start_picking(&mut self) -> Result<(), PickerError> {
        let root = self
            .tree
            .root_container()
            .ok_or(PickerError::MissingRootContainer)?;
        self.wiring.attach(root);
        self.state.step = Step::ChoosingLoop;
        self.state.stage = Stage::Picking;
        self.record("start_picking", Some(root));
        Ok(())
    }

    /// Record the current prediction under the role of the active action.
    pub fn click_candidate(&mut self, el: ElementId) {
        if matches!(self.state.stage, Stage::Running | Stage::LoopLocked) {
            warn!(element = %el, stage = ?self.state.stage, "candidate click ignored");
            return;
        }

        let role = self.state.action_kind.click_role();
        self.tree.set_highlight(el, role.highlight());

        match role {
            ClickRole::LoopUnit => {
                if self.state.loop_targets.contains(&el) {
                    self.state.selected_count += 1;
                } else {
                    self.state.selected_count = 1;
                    paint(&mut self.tree, &self.state.loop_targets, Highlight::None);
                    self.state.loop_targets = self.state.prediction.clone();
                }
            }
            ClickRole::ClickTarget | ClickRole::InputTarget => {
                if !self.state.bucket_for(role).contains(&el) {
                    let prediction = self.state.prediction.clone();
                    *self.state.bucket_for_mut(role) = prediction;
                }
            }
        }

        self.record("click_candidate", Some(el));
    }

    /// Freeze the loop targets and move interception onto them.
    pub fn lock_loop_step(&mut self, step: Step) -> Result<(), PickerError> {
        let root = self
            .tree
            .root_container()
            .ok_or(PickerError::MissingRootContainer)?;

        self.state.step = step;

        if self.state.action_in_progress() {
            paint(&mut self.tree, &self.state.click_targets, Highlight::Green);
            paint(&mut self.tree, &self.state.input_targets, Highlight::Green);
        } else {
            paint(&mut self.tree, &self.state.loop_targets, Highlight::Blue);
        }

        self.wiring.detach(root);
        for unit in &self.state.loop_targets {
            self.wiring.attach(*unit);
        }

        self.state.stage = Stage::LoopLocked;
        self.record("lock_loop_step", None);
        Ok(())
    }

    pub fn choose_click_action(&mut self) {
        self.choose_action(ActionKind::Click);
    }

    pub fn choose_input_action(&mut self) {
        self.choose_action(ActionKind::Input);
    }

    fn choose_action(&mut self, kind: ActionKind) {
        self.state.action_kind = kind;
        self.state.step = Step::ChoosingTargets;
        self.state.stage = Stage::Picking;
        self.record("choose_action", None);
    }

    /// Confirm the targets of the current action.
    ///
    /// Input actions take two confirmations: the first shows the value
    /// field, the second moves back to step 2.
    pub fn save_action(&mut self) {
        match self.state.action_kind {
            ActionKind::Click => {
                paint(&mut self.tree, &self.state.click_targets, Highlight::Green);
                self.state.step = Step::LoopLocked;
                self.state.stage = Stage::LoopLocked;
                self.state.show_input_value = false;
            }
            ActionKind::Input => {
                if !self.state.show_input_value {
                    paint(&mut self.tree, &self.state.input_targets, Highlight::Green);
                    self.state.show_input_value = true;
                } else {
                    self.state.step = Step::LoopLocked;
                }
            }
            ActionKind::None => {
                debug!("save_action without an action in progress");
                return;
            }
        }
        self.record("save_action", None);
    }

    /// Abandon the action being declared and go back to the locked loop.
    /// The targets stay recorded but lose their highlight and listeners.
    /// Without a click action in progress the input targets are released.
    pub fn reset_action_in_progress(&mut self) {
        self.state.step = Step::LoopLocked;
        self.state.show_input_value = false;
        self.state.input_value.clear();

        let bucket = match self.state.action_kind {
            ActionKind::Click => &self.state.click_targets,
            ActionKind::Input | ActionKind::None => &self.state.input_targets,
        };
        release(&mut self.tree, &mut self.wiring, bucket);

        self.state.action_kind = ActionKind::None;
        self.state.stage = Stage::LoopLocked;
        self.record("reset_action_in_progress", None);
    }

    pub fn reset_all(&mut self) {
        clear_recorded(&mut self.tree, &mut self.wiring, &mut self.state);
        self.record("reset_all", None);
    }

    /// Back to the very beginning: surface unwired, buckets empty, step 0.
    pub fn reset_to_start(&mut self) -> Result<(), PickerError> {
        let root = self
            .tree
            .root_container()
            .ok_or(PickerError::MissingRootContainer)?;
        self.wiring.detach(root);
        clear_recorded(&mut self.tree, &mut self.wiring, &mut self.state);
        self.state.step = Step::NotStarted;
        self.state.stage = Stage::Idle;
        self.record("reset_to_start", None);
        Ok(())
    }

    pub fn set_input_value(&mut self, value: &str) {
        self.state.input_value = value.to_string();
    }

    /// Replay the recorded actions, then reset to step 0.
    pub fn run(&mut self, input_value: &str) -> Result<PlaybackSummary, PickerError> {
        let result = BotRunner::run(&mut self.tree, &mut self.wiring, &mut self.state, input_value);
        match &result {
            Ok(_) => self.record("run", None),
            Err(e) => {
                warn!("playback stopped: {}", e);
                self.record_with_note("run_failed", None, Some(e.to_string()));
            }
        }
        result
    }

    fn record(&mut self, command: &str, target: Option<ElementId>) {
        self.record_with_note(command, target, None);
    }

    fn record_with_note(&mut self, command: &str, target: Option<ElementId>, note: Option<String>) {
        debug!(command, state = %self.state.summary(), "picker transition");

        if self.tracer.is_enabled() {
            let mut event = TraceEvent::now(self.seq, command).with_state(&self.state);
            if let Some(el) = target {
                event = event
                    .with_target(el)
                    .with_shape(shape_fingerprint(&self.tree, el));
            }
            if let Some(note) = note {
                event = event.with_note(note);
            }
            self.tracer.log(&event);
        }
        self.seq += 1;
    }
}

fn paint<T: DocumentTree + ?Sized>(tree: &mut T, elements: &[ElementId], highlight: Highlight) {
    for el in elements {
        tree.set_highlight(*el, highlight);
    }
}

fn release<T, W>(tree: &mut T, wiring: &mut W, elements: &[ElementId])
where
    T: DocumentTree + ?Sized,
    W: EventWiring + ?Sized,
{
    for el in elements {
        tree.set_highlight(*el, Highlight::None);
        wiring.detach(*el);
    }
}

/// Unwire and unpaint every recorded element and empty all buckets.
/// Leaves stage and step alone. Idempotent.
pub fn clear_recorded<T, W>(tree: &mut T, wiring: &mut W, state: &mut PickerState)
where
    T: DocumentTree + ?Sized,
    W: EventWiring + ?Sized,
{
    release(tree, wiring, &state.click_targets);
    release(tree, wiring, &state.loop_targets);
    release(tree, wiring, &state.input_targets);
    paint(tree, &state.prediction, Highlight::None);

    state.click_targets.clear();
    state.loop_targets.clear();
    state.input_targets.clear();
    state.prediction.clear();
    state.selected_count = 0;
    state.input_value.clear();
    state.action_kind = ActionKind::None;
    state.show_input_value = false;
}

use crate::bot::runner::PlaybackSummary;
use crate::script::script_model::CheckResult;

/// Tracks progress and collected results while a script replays.
#[derive(Debug, Clone, Default)]
pub struct ScriptContext {
    /// Current step index (0-based)
    pub current_step: usize,

    pub check_results: Vec<CheckResult>,

    pub playbacks: Vec<PlaybackSummary>,
}

impl ScriptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_checks(&mut self, results: Vec<CheckResult>) {
        self.check_results.extend(results);
    }

    pub fn record_playback(&mut self, summary: PlaybackSummary) {
        self.playbacks.push(summary);
    }

    pub fn all_passed(&self) -> bool {
        self.check_results.iter().all(|r| r.passed)
    }
}

use pick_bot::trace::logger::TraceLogger;
use pick_bot::{
    BotRunner, ClickDisposition, DocumentTree, DomError, Highlight, ListenerRegistry, PickerError,
    PickerState, PlaybackSummary, Stage, Step,
};

use crate::common::{el, recorded_todo_picker, task_button, task_input, todo_page};

mod common;

// =========================================================================
// Playback
// =========================================================================

#[test]
fn run_fills_inputs_then_clicks() {
    let mut p = recorded_todo_picker();

    let summary = p.run("hello").unwrap();

    assert_eq!(
        summary,
        PlaybackSummary {
            inputs_filled: 3,
            clicks: 3
        }
    );
    for i in 0..3 {
        let input = el(p.tree(), &task_input(i));
        let button = el(p.tree(), &task_button(i));
        assert_eq!(p.tree().value(input), Some("hello"));
        assert_eq!(p.tree().activation_count(button), 1);
    }
}

#[test]
fn run_resets_the_session() {
    let mut p = recorded_todo_picker();
    p.run("hello").unwrap();

    assert_eq!(p.step(), Step::NotStarted);
    assert_eq!(p.stage(), Stage::Idle);
    assert!(p.state().click_targets.is_empty());
    assert!(p.state().input_targets.is_empty());
    assert!(p.state().loop_targets.is_empty());
    assert!(p.wiring().is_empty());

    let button = el(p.tree(), &task_button(0));
    assert_eq!(p.tree().highlight(button), Highlight::None);
}

#[test]
fn empty_input_value_leaves_inputs_untouched() {
    let mut p = recorded_todo_picker();

    let summary = p.run("").unwrap();

    assert_eq!(summary.inputs_filled, 0);
    assert_eq!(summary.clicks, 3);
    let input = el(p.tree(), &task_input(0));
    assert_eq!(p.tree().value(input), None);
}

#[test]
fn run_with_nothing_recorded_only_resets() {
    let mut doc = todo_page();
    let mut wiring = ListenerRegistry::new();
    let mut state = PickerState::new();

    let summary = BotRunner::run(&mut doc, &mut wiring, &mut state, "x").unwrap();

    assert_eq!(summary, PlaybackSummary::default());
    assert_eq!(state, PickerState::new());
}

#[test]
fn clicks_follow_bucket_order() {
    let mut doc = todo_page();
    let mut wiring = ListenerRegistry::new();
    let (second, first) = (el(&doc, &task_button(1)), el(&doc, &task_button(0)));
    let mut state = PickerState {
        click_targets: vec![second, first],
        ..PickerState::new()
    };

    // First button is gone; the one ahead of it in the bucket still gets clicked
    doc.remove(first).unwrap();
    let err = BotRunner::run(&mut doc, &mut wiring, &mut state, "").unwrap_err();

    assert_eq!(err, PickerError::Dom(DomError::Detached(first)));
    assert_eq!(doc.activation_count(second), 1, "earlier click already applied");
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn removed_target_aborts_playback_mid_way() {
    let mut p = recorded_todo_picker();
    let gone = el(p.tree(), &task_button(1));
    p.tree_mut().remove(gone).unwrap();

    let err = p.run("hello").unwrap_err();

    assert_eq!(err, PickerError::Dom(DomError::Detached(gone)));
    assert_eq!(p.stage(), Stage::Running, "no rollback after a host error");
    assert_eq!(p.state().click_targets.len(), 3, "buckets are kept");

    let first = el(p.tree(), &task_button(0));
    assert_eq!(p.tree().activation_count(first), 1);
    let input = el(p.tree(), &task_input(2));
    assert_eq!(p.tree().value(input), Some("hello"), "inputs were filled first");
}

#[test]
fn clicks_pass_through_while_running() {
    let mut p = recorded_todo_picker();
    let gone = el(p.tree(), &task_button(2));
    p.tree_mut().remove(gone).unwrap();
    assert!(p.run("").is_err());

    let button = el(p.tree(), &task_button(0));
    assert_eq!(p.click(button), ClickDisposition::PassThrough);
}

#[test]
fn filling_a_non_input_is_an_error() {
    let mut doc = todo_page();
    let mut wiring = ListenerRegistry::new();
    let button = el(&doc, &task_button(0));
    let mut state = PickerState {
        input_targets: vec![button],
        ..PickerState::new()
    };

    let err = BotRunner::run(&mut doc, &mut wiring, &mut state, "v").unwrap_err();

    assert_eq!(err, PickerError::Dom(DomError::NotAnInput(button)));
    assert_eq!(state.stage, Stage::Running);
}

#[test]
fn failed_playback_is_traced_with_the_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.jsonl");
    let mut p = recorded_todo_picker().with_tracer(TraceLogger::new(path.to_str().unwrap()));
    let gone = el(p.tree(), &task_button(0));
    p.tree_mut().remove(gone).unwrap();

    assert!(p.run("x").is_err());

    let content = std::fs::read_to_string(&path).unwrap();
    let last: serde_json::Value = serde_json::from_str(content.lines().last().unwrap()).unwrap();
    assert_eq!(last["command"], "run_failed");
    assert_eq!(last["stage"], "Running");
    assert!(
        last["note"].as_str().unwrap().contains("no longer attached"),
        "{}",
        last
    );
}

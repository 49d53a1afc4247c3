use tracing::trace;

use crate::dom::dom_model::{ElementId, Highlight};
use crate::dom::tree::DocumentTree;
use crate::matcher::structural::is_structurally_equal;
use crate::picker::error::PickerError;
use crate::picker::picker_model::{PickerState, Stage, Step};

/// Elements a hover is matched against, and the colour the hovered element
/// gets in this pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateGroup {
    pub collection: Vec<ElementId>,
    pub color: Highlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    pub candidates: usize,
    pub matched: usize,
}

/// Candidates for the current step.
///
/// While choosing loop elements this is the whole picking surface. Every
/// later step only looks inside the chosen loop targets.
pub fn candidate_group<T: DocumentTree + ?Sized>(
    tree: &T,
    state: &PickerState,
) -> Result<CandidateGroup, PickerError> {
    if state.step == Step::ChoosingLoop {
        let root = tree
            .root_container()
            .ok_or(PickerError::MissingRootContainer)?;
        return Ok(CandidateGroup {
            collection: tree.descendants(root),
            color: Highlight::Red,
        });
    }

    let collection = state
        .loop_targets
        .iter()
        .flat_map(|unit| tree.descendants(*unit))
        .collect();
    Ok(CandidateGroup {
        collection,
        color: Highlight::Green,
    })
}

/// Rebuild `state.prediction` from everything that structurally matches
/// `hovered`, and repaint the candidates.
///
/// Recorded elements keep their highlight and are never predicted. Returns
/// `None` when the loop is locked and hovering is inert.
pub fn scan<T: DocumentTree + ?Sized>(
    tree: &mut T,
    state: &mut PickerState,
    hovered: ElementId,
) -> Result<Option<ScanOutcome>, PickerError> {
    if state.stage == Stage::LoopLocked {
        return Ok(None);
    }

    let CandidateGroup { collection, color } = candidate_group(&*tree, state)?;

    if !state.is_recorded(hovered) {
        tree.set_highlight(hovered, color);
    }

    state.prediction = Vec::new();

    for candidate in &collection {
        if state.is_recorded(*candidate) {
            continue;
        }

        if is_structurally_equal(&*tree, *candidate, hovered)
            && state.action_kind.accepts(&*tree, *candidate)
        {
            tree.set_highlight(*candidate, Highlight::Red);
            state.prediction.push(*candidate);
        } else {
            tree.set_highlight(*candidate, Highlight::None);
        }
    }

    trace!(
        hovered = %hovered,
        candidates = collection.len(),
        matched = state.prediction.len(),
        "scan"
    );

    Ok(Some(ScanOutcome {
        candidates: collection.len(),
        matched: state.prediction.len(),
    }))
}

//! Selection mutation.
//!
//! Rewrites the tree to record a choice at one stage occurrence. The
//! input tree is never mutated in place: callers get a fresh root on
//! success and keep the tree they passed in untouched on failure.

use crate::index::StageRef;
use journey_core::{ChoiceId, JourneyError, JourneyResult, Stage};

/// Produce a new tree in which the stage at `at` selects `choice`.
///
/// The returned root is a fresh value, so reference-based change
/// detection in the host always fires. Every selection strictly below
/// the target stage is cleared: the branch being replaced is abandoned,
/// and the subtree behind the newly chosen choice starts unselected.
///
/// Fails with a not-found error when `at` does not resolve to a stage in
/// the tree (wrong path, or a different stage id at that path) or when
/// the resolved stage does not own `choice`. The operation never creates
/// a stage.
pub fn set_selection(tree: &Stage, at: &StageRef, choice: ChoiceId) -> JourneyResult<Stage> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "set_selection",
        stage = at.id.get(),
        path = %at.path,
        choice = choice.get()
    )
    .entered();

    let mut next = tree.clone();
    let target = next
        .stage_at_mut(&at.path)
        .ok_or_else(|| JourneyError::StageNotFound {
            id: at.id,
            path: at.path.clone(),
        })?;
    if target.id() != at.id {
        return Err(JourneyError::StageNotFound {
            id: at.id,
            path: at.path.clone(),
        });
    }
    target.select_local(choice)?;
    target.clear_descendant_selections();
    Ok(next)
}

//! Default path resolution.
//!
//! When nothing has been chosen anywhere yet, the host asks for a
//! deterministic initial path and applies it stage by stage, exactly as
//! if the user had clicked through each stage. Terminal choices are never
//! auto-selected: a leaf stage ends the path and waits for an explicit
//! first choice.

use crate::index::StageRef;
use journey_core::{ChoiceId, PathKey, Stage};

/// One step of the default path: the stage occurrence to act on and the
/// choice to select there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultStep {
    /// Stage occurrence the step applies to.
    pub at: StageRef,
    /// Choice to select.
    pub choice: ChoiceId,
}

/// Compute the default path through `tree`, root to leaf.
///
/// At each stage the preference has two levels, in order:
/// 1. a choice owning a nested stage always beats a terminal choice;
/// 2. among those, the one whose subtree reaches the greatest depth wins,
///    ties going to the lowest display index.
///
/// Depth comparison never resurrects a terminal choice. A stage whose
/// choices are all terminal contributes no step. Repeated calls on the
/// same tree return the same path.
#[must_use]
pub fn resolve_default_path(tree: &Stage) -> Vec<DefaultStep> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("resolve_default_path", root = tree.id().get()).entered();

    let mut steps = Vec::new();
    descend(tree, PathKey::root(), &mut steps);

    #[cfg(feature = "tracing")]
    tracing::debug!(steps = steps.len(), "default path resolved");

    steps
}

fn descend(stage: &Stage, path: PathKey, steps: &mut Vec<DefaultStep>) {
    let mut best: Option<(usize, usize, ChoiceId, &Stage)> = None;
    for (index, choice) in stage.choices().iter().enumerate() {
        let Some(next) = choice.next() else {
            continue;
        };
        let depth = 1 + subtree_depth(next);
        // Strict comparison keeps the first (lowest-index) choice on ties.
        if best.as_ref().is_none_or(|&(d, ..)| depth > d) {
            best = Some((depth, index, choice.id(), next));
        }
    }

    let Some((_, index, choice, next)) = best else {
        // Genuine leaf: every choice is terminal, the user chooses here.
        return;
    };
    steps.push(DefaultStep {
        at: StageRef::new(stage.id(), path.clone()),
        choice,
    });
    descend(next, path.child(index), steps);
}

/// Greatest number of stage-to-stage hops reachable below `stage`.
fn subtree_depth(stage: &Stage) -> usize {
    stage
        .choices()
        .iter()
        .filter_map(|choice| choice.next())
        .map(|next| 1 + subtree_depth(next))
        .max()
        .unwrap_or(0)
}

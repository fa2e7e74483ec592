//! Selection reconciliation.
//!
//! Given a newly chosen choice at one stage occurrence, recompute the
//! authoritative selection set: ancestor-path selections are preserved,
//! disjoint branches are left alone, and everything inside the branch
//! being replaced (the previous selection at the same stage and anything
//! deeper) is pruned. For any sequence of selections the result equals
//! the set obtained by walking `current` pointers from the root of the
//! tree produced by [`crate::set_selection`] with the same choice.

use crate::index::{PathIndex, StageRef};
use journey_core::{ChoiceId, JourneyError, JourneyResult, PathRelation, SelectionSet};

/// Recompute the selection set after choosing `choice` at `at`.
///
/// A previously selected id is retained iff its owning occurrence is a
/// strict ancestor of `at` or lies on a diverged branch; ids at or below
/// `at` are discarded. Ids that no longer resolve in the index cannot lie
/// on any lineage and are dropped.
///
/// Fails with a not-found error when `at` is not an occurrence in the
/// index or does not own `choice`. Callers must not fall back to a
/// root-level reset on failure; the previous set stays authoritative.
pub fn reconcile(
    index: &PathIndex,
    previous: &SelectionSet,
    at: &StageRef,
    choice: ChoiceId,
) -> JourneyResult<SelectionSet> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "reconcile",
        stage = at.id.get(),
        path = %at.path,
        choice = choice.get()
    )
    .entered();

    let occurrence = index.resolve(at).ok_or_else(|| JourneyError::StageNotFound {
        id: at.id,
        path: at.path.clone(),
    })?;
    if !occurrence.choice_ids.contains(&choice) {
        return Err(JourneyError::ChoiceNotFound {
            id: choice,
            stage: at.id,
        });
    }

    let mut next = SelectionSet::new();
    for &id in previous {
        let Some(owner) = index.owner_of(id) else {
            continue;
        };
        match owner.path.relation(&at.path) {
            PathRelation::AncestorOf | PathRelation::Diverged => {
                next.insert(id);
            }
            PathRelation::Equal | PathRelation::DescendantOf => {}
        }
    }
    next.insert(choice);

    #[cfg(feature = "tracing")]
    tracing::debug!(kept = next.len(), dropped = previous.len() + 1 - next.len(), "reconciled");

    Ok(next)
}

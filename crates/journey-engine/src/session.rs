//! Journey session: the single owner of tree + selection state.
//!
//! The host UI holds one [`Journey`] and drives it with complete,
//! synchronous interactions: each accepted selection runs the mutation
//! and the reconciliation to completion, then commits the new tree and
//! the new selection set together. There is never a window where the two
//! halves disagree, and a failed interaction changes nothing.

use crate::index::{PathIndex, StageRef};
use crate::mutate::set_selection;
use crate::reconcile::reconcile;
use crate::resolve::resolve_default_path;
use journey_core::{Choice, ChoiceId, JourneyResult, SelectionSet, Stage};

/// Collaborator receiving terminal choices the user wants to discuss.
///
/// The engine calls [`DiscussionSink::discuss`] exactly once per terminal
/// selection, with the full choice payload and a free-text prompt, and
/// never touches tree state for it. The return value is not consumed.
pub trait DiscussionSink {
    /// Stage a terminal choice for discussion.
    fn discuss(&mut self, choice: &Choice, prompt: &str);
}

/// Sink that drops everything; for hosts without a discussion surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiscussionSink for NullSink {
    fn discuss(&mut self, _choice: &Choice, _prompt: &str) {}
}

/// What a selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Terminal choice, handed to the discussion sink; tree untouched.
    Discussed,
    /// Navigation applied; tree and selection set were replaced.
    Navigated,
}

/// A live journey: one tree plus the selection set derived from it.
#[derive(Debug, Clone)]
pub struct Journey {
    tree: Stage,
    selected: SelectionSet,
    // Selection changes never alter tree structure, so the index built at
    // load time stays valid for the life of the session.
    index: PathIndex,
}

impl Journey {
    /// Start a session over `tree`.
    ///
    /// The tree is validated and indexed up front; malformed input is
    /// refused here rather than surfacing mid-interaction. The initial
    /// selection set is derived from any pre-selections the seed carries.
    pub fn new(tree: Stage) -> JourneyResult<Self> {
        tree.validate()?;
        let index = PathIndex::build(&tree)?;
        let selected = tree.selection_set();
        Ok(Self {
            tree,
            selected,
            index,
        })
    }

    /// The current tree.
    #[must_use]
    pub fn tree(&self) -> &Stage {
        &self.tree
    }

    /// The current selection set.
    #[must_use]
    pub fn selected(&self) -> &SelectionSet {
        &self.selected
    }

    /// The stage index for the current tree.
    #[must_use]
    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    /// Whether a choice id is currently selected.
    #[must_use]
    pub fn is_selected(&self, choice: ChoiceId) -> bool {
        self.selected.contains(&choice)
    }

    /// The active lineage, root-downward.
    #[must_use]
    pub fn active_lineage(&self) -> Vec<ChoiceId> {
        self.tree.walk_selected().collect()
    }

    /// Handle one user selection.
    ///
    /// A terminal choice is routed to `sink` before any tree lookup and
    /// leaves all state untouched. Anything else navigates: the target
    /// occurrence records the choice, unreachable selections are pruned,
    /// and both halves of the session state are replaced together.
    pub fn select(
        &mut self,
        at: &StageRef,
        choice: &Choice,
        prompt: &str,
        sink: &mut dyn DiscussionSink,
    ) -> JourneyResult<SelectOutcome> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "journey_select",
            stage = at.id.get(),
            choice = choice.id().get(),
            terminal = choice.is_terminal()
        )
        .entered();

        if choice.is_terminal() {
            sink.discuss(choice, prompt);
            return Ok(SelectOutcome::Discussed);
        }

        self.navigate(at, choice.id())?;
        Ok(SelectOutcome::Navigated)
    }

    /// Apply a non-terminal selection at a stage occurrence.
    pub fn navigate(&mut self, at: &StageRef, choice: ChoiceId) -> JourneyResult<()> {
        let next_tree = set_selection(&self.tree, at, choice)?;
        let next_selected = reconcile(&self.index, &self.selected, at, choice)?;
        // Commit both halves together.
        self.tree = next_tree;
        self.selected = next_selected;
        Ok(())
    }

    /// Resolve and apply the default path, one stage at a time, when no
    /// selection exists anywhere yet. Returns the number of stages
    /// selected. A session with any existing selection is left alone.
    pub fn start(&mut self) -> JourneyResult<usize> {
        if !self.selected.is_empty() {
            return Ok(0);
        }
        let steps = resolve_default_path(&self.tree);
        for step in &steps {
            self.navigate(&step.at, step.choice)?;
        }
        Ok(steps.len())
    }

    /// Clear every selection, tree and set together.
    pub fn reset(&mut self) {
        self.tree.clear_all_selections();
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journey_core::{PathKey, StageId};

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<(ChoiceId, String)>,
    }

    impl DiscussionSink for RecordingSink {
        fn discuss(&mut self, choice: &Choice, prompt: &str) {
            self.calls.push((choice.id(), prompt.to_string()));
        }
    }

    fn sample_tree() -> Stage {
        Stage::new(1, "s1")
            .choice(Choice::new(10, "a").then(
                Stage::new(2, "s2").choice(Choice::new(20, "c")),
            ))
            .choice(Choice::new(11, "d").then(
                Stage::new(3, "s3").choice(Choice::new(30, "e").then(
                    Stage::new(4, "s4").choice(Choice::new(40, "f")),
                )),
            ))
    }

    #[test]
    fn terminal_choice_routes_to_sink_once() {
        let mut journey = Journey::new(sample_tree()).unwrap();
        let mut sink = RecordingSink::default();

        let terminal = Choice::new(99, "talk about this");
        let before_tree = journey.tree().clone();
        let outcome = journey
            .select(&StageRef::root(1u64), &terminal, "tell me more", &mut sink)
            .unwrap();

        assert_eq!(outcome, SelectOutcome::Discussed);
        assert_eq!(sink.calls.len(), 1);
        assert_eq!(sink.calls[0], (ChoiceId::new(99), "tell me more".to_string()));
        // Tree state untouched by a terminal selection.
        assert_eq!(journey.tree(), &before_tree);
        assert!(journey.selected().is_empty());
    }

    #[test]
    fn navigation_commits_tree_and_set_together() {
        let mut journey = Journey::new(sample_tree()).unwrap();
        let mut sink = RecordingSink::default();

        let picked = journey.tree().choices()[0].clone();
        let outcome = journey
            .select(&StageRef::root(1u64), &picked, "", &mut sink)
            .unwrap();

        assert_eq!(outcome, SelectOutcome::Navigated);
        assert!(sink.calls.is_empty());
        assert!(journey.is_selected(ChoiceId::new(10)));
        assert_eq!(journey.selected(), &journey.tree().selection_set());
    }

    #[test]
    fn failed_navigation_changes_nothing() {
        let mut journey = Journey::new(sample_tree()).unwrap();
        journey.navigate(&StageRef::root(1u64), ChoiceId::new(10)).unwrap();
        let tree_before = journey.tree().clone();
        let selected_before = journey.selected().clone();

        // Choice 30 lives two levels down, not at the root.
        let err = journey
            .navigate(&StageRef::root(1u64), ChoiceId::new(30))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(journey.tree(), &tree_before);
        assert_eq!(journey.selected(), &selected_before);
    }

    #[test]
    fn start_applies_default_path() {
        let mut journey = Journey::new(sample_tree()).unwrap();
        let applied = journey.start().unwrap();

        // D (deeper branch) then E; F is terminal and never auto-picked.
        assert_eq!(applied, 2);
        assert_eq!(
            journey.active_lineage(),
            vec![ChoiceId::new(11), ChoiceId::new(30)]
        );
        assert_eq!(journey.selected(), &journey.tree().selection_set());
    }

    #[test]
    fn start_is_a_no_op_once_anything_is_selected() {
        let mut journey = Journey::new(sample_tree()).unwrap();
        journey.navigate(&StageRef::root(1u64), ChoiceId::new(10)).unwrap();
        assert_eq!(journey.start().unwrap(), 0);
        assert_eq!(journey.active_lineage(), vec![ChoiceId::new(10)]);
    }

    #[test]
    fn seed_preselection_counts_as_started() {
        let tree = Stage::new(1, "s1")
            .choice(Choice::new(10, "a"))
            .with_current(10u64);
        let mut journey = Journey::new(tree).unwrap();
        assert_eq!(journey.selected(), &SelectionSet::from([ChoiceId::new(10)]));
        assert_eq!(journey.start().unwrap(), 0);
    }

    #[test]
    fn new_rejects_malformed_trees() {
        let tree = Stage::new(1, "root").choice(Choice::new(10, "a").then(Stage::new(2, "empty")));
        let err = Journey::new(tree).unwrap_err();
        assert!(err.is_invalid_tree());
        assert_eq!(
            err,
            journey_core::JourneyError::EmptyStage { id: StageId::new(2) }
        );
    }

    #[test]
    fn reset_clears_both_halves() {
        let mut journey = Journey::new(sample_tree()).unwrap();
        journey.start().unwrap();
        assert!(!journey.selected().is_empty());

        journey.reset();
        assert!(journey.selected().is_empty());
        assert!(journey.active_lineage().is_empty());
        assert_eq!(journey.tree().selection_set(), SelectionSet::new());
    }

    #[test]
    fn changing_an_ancestor_prunes_the_abandoned_branch() {
        let mut journey = Journey::new(sample_tree()).unwrap();
        journey.navigate(&StageRef::root(1u64), ChoiceId::new(10)).unwrap();
        journey
            .navigate(&StageRef::new(2u64, PathKey::new([0])), ChoiceId::new(20))
            .unwrap();
        assert_eq!(
            journey.selected(),
            &SelectionSet::from([ChoiceId::new(10), ChoiceId::new(20)])
        );

        journey.navigate(&StageRef::root(1u64), ChoiceId::new(11)).unwrap();
        assert_eq!(journey.selected(), &SelectionSet::from([ChoiceId::new(11)]));
        assert_eq!(journey.selected(), &journey.tree().selection_set());
    }
}

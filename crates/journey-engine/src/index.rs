//! Flattened stage index.
//!
//! Stage ids may repeat across branches, so the index maps each id to
//! *all* of its occurrences, each carrying the structural [`PathKey`] and
//! the choice ids that occurrence owns. Built by one depth-first
//! traversal; linear in the size of the tree and a pure function of it.

use journey_core::{ChoiceId, JourneyError, JourneyResult, PathKey, Stage, StageId};
use std::collections::{BTreeSet, HashMap};

/// Names one physical stage occurrence: stage id plus structural path.
///
/// Every engine entry point that targets a stage takes one of these,
/// never a bare id: the UI always has the exact occurrence because it is
/// rendering one physical node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StageRef {
    /// Stage id at this occurrence.
    pub id: StageId,
    /// Structural address of the occurrence.
    pub path: PathKey,
}

impl StageRef {
    /// Create a reference to the occurrence of `id` at `path`.
    #[must_use]
    pub fn new(id: impl Into<StageId>, path: PathKey) -> Self {
        Self {
            id: id.into(),
            path,
        }
    }

    /// Reference the root occurrence.
    #[must_use]
    pub fn root(id: impl Into<StageId>) -> Self {
        Self::new(id, PathKey::root())
    }
}

/// Index record for one stage occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// The occurrence this record describes.
    pub at: StageRef,
    /// Choice ids owned by the stage at this occurrence.
    pub choice_ids: BTreeSet<ChoiceId>,
}

/// Flattened index of every stage occurrence in a tree.
#[derive(Debug, Clone, Default)]
pub struct PathIndex {
    by_stage: HashMap<StageId, Vec<Occurrence>>,
    owner_by_choice: HashMap<ChoiceId, StageRef>,
    stages: usize,
}

impl PathIndex {
    /// Build the index by a full depth-first traversal of `tree`.
    ///
    /// Refuses malformed trees: a stage with zero choices or a choice id
    /// appearing more than once.
    pub fn build(tree: &Stage) -> JourneyResult<Self> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("index_build", root = tree.id().get()).entered();

        let mut index = Self::default();
        index.visit(tree, PathKey::root())?;

        #[cfg(feature = "tracing")]
        tracing::debug!(stages = index.stages, "index built");

        Ok(index)
    }

    fn visit(&mut self, stage: &Stage, path: PathKey) -> JourneyResult<()> {
        if stage.choices().is_empty() {
            return Err(JourneyError::EmptyStage { id: stage.id() });
        }

        let at = StageRef::new(stage.id(), path.clone());
        let mut choice_ids = BTreeSet::new();
        for choice in stage.choices() {
            if self.owner_by_choice.insert(choice.id(), at.clone()).is_some() {
                return Err(JourneyError::DuplicateChoiceId { id: choice.id() });
            }
            choice_ids.insert(choice.id());
        }
        self.by_stage
            .entry(stage.id())
            .or_default()
            .push(Occurrence { at, choice_ids });
        self.stages += 1;

        for (i, choice) in stage.choices().iter().enumerate() {
            if let Some(next) = choice.next() {
                self.visit(next, path.child(i))?;
            }
        }
        Ok(())
    }

    /// All occurrences of a stage id, in traversal order.
    #[must_use]
    pub fn occurrences(&self, id: StageId) -> &[Occurrence] {
        self.by_stage.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Resolve one exact occurrence, matching both id and path.
    #[must_use]
    pub fn resolve(&self, at: &StageRef) -> Option<&Occurrence> {
        self.occurrences(at.id).iter().find(|o| o.at.path == at.path)
    }

    /// The occurrence owning a choice id, if the choice exists anywhere
    /// in the indexed tree.
    #[must_use]
    pub fn owner_of(&self, choice: ChoiceId) -> Option<&StageRef> {
        self.owner_by_choice.get(&choice)
    }

    /// Number of stage occurrences indexed.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages
    }
}

//! Stage/choice tree model.
//!
//! A [`Stage`] is one decision point presenting an ordered list of
//! [`Choice`]s; a choice either owns a nested stage or is terminal. The
//! tree is strict by construction (choices own their nested stage as a
//! value, so sharing and cycles cannot be expressed). Selection changes
//! rewrite the tree rather than mutating shared state: the engine clones,
//! edits the clone along one lineage, and hands back a fresh root.

use crate::error::{JourneyError, JourneyResult};
use crate::path::PathKey;
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a stage.
///
/// Not unique across the tree: seed data reuses the same small ids for
/// stages recurring at the same depth in different branches. Engine
/// lookups therefore always pair a stage id with a [`PathKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageId(u64);

impl StageId {
    /// Create a stage id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for StageId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a choice. Unique across the whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChoiceId(u64);

impl ChoiceId {
    /// Create a choice id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ChoiceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The set of choice ids currently highlighted across the tree, one per
/// stage along the active lineage.
pub type SelectionSet = BTreeSet<ChoiceId>;

/// A choice within a stage.
///
/// A choice with no nested stage is *terminal*: selecting it does not
/// navigate the tree, it is routed to the discussion collaborator
/// instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    id: ChoiceId,
    owner: Option<StageId>,
    title: String,
    detail: Option<String>,
    next: Option<Box<Stage>>,
}

impl Choice {
    /// Create a terminal choice with the given id and title.
    #[must_use]
    pub fn new(id: impl Into<ChoiceId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner: None,
            title: title.into(),
            detail: None,
            next: None,
        }
    }

    /// Attach the stage this choice advances to.
    #[must_use]
    pub fn then(mut self, stage: Stage) -> Self {
        self.next = Some(Box::new(stage));
        self
    }

    /// Set a longer description.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The choice id.
    #[must_use]
    pub fn id(&self) -> ChoiceId {
        self.id
    }

    /// Back-reference to the stage holding this choice. `None` until the
    /// choice is attached to a stage.
    #[must_use]
    pub fn owner(&self) -> Option<StageId> {
        self.owner
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Longer description, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// The stage this choice advances to, if any.
    #[must_use]
    pub fn next(&self) -> Option<&Stage> {
        self.next.as_deref()
    }

    /// Whether this choice ends navigation (owns no nested stage).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }

    fn next_mut(&mut self) -> Option<&mut Stage> {
        self.next.as_deref_mut()
    }
}

/// One decision point in the journey tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    id: StageId,
    title: String,
    choices: Vec<Choice>,
    current: Option<ChoiceId>,
}

impl Stage {
    /// Create a stage with the given id and title.
    #[must_use]
    pub fn new(id: impl Into<StageId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            choices: Vec::new(),
            current: None,
        }
    }

    /// Append a choice. Insertion order is display order and is
    /// significant for default-path tie-breaks.
    #[must_use]
    pub fn choice(mut self, mut choice: Choice) -> Self {
        choice.owner = Some(self.id);
        self.choices.push(choice);
        self
    }

    /// Set choices from a vec.
    #[must_use]
    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        for choice in &mut self.choices {
            choice.owner = Some(self.id);
        }
        self
    }

    /// Pre-select a choice (seed payloads may carry one).
    #[must_use]
    pub fn with_current(mut self, choice: impl Into<ChoiceId>) -> Self {
        self.current = Some(choice.into());
        self
    }

    /// The stage id.
    #[must_use]
    pub fn id(&self) -> StageId {
        self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The choices, in display order.
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// The currently chosen choice at this stage, if any.
    #[must_use]
    pub fn current(&self) -> Option<ChoiceId> {
        self.current
    }

    /// Look up an owned choice by id.
    #[must_use]
    pub fn choice_by_id(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }

    /// Display index of an owned choice.
    #[must_use]
    pub fn choice_index(&self, id: ChoiceId) -> Option<usize> {
        self.choices.iter().position(|c| c.id == id)
    }

    /// Whether every choice here is terminal. A leaf stage ends the
    /// default path: the user must make an explicit choice.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.choices.iter().all(Choice::is_terminal)
    }

    /// Descend to the stage addressed by `path`, if it exists.
    #[must_use]
    pub fn stage_at(&self, path: &PathKey) -> Option<&Stage> {
        let mut stage = self;
        for &index in path.indices() {
            stage = stage.choices.get(index)?.next()?;
        }
        Some(stage)
    }

    /// Mutable variant of [`Stage::stage_at`].
    pub fn stage_at_mut(&mut self, path: &PathKey) -> Option<&mut Stage> {
        let mut stage = self;
        for &index in path.indices() {
            stage = stage.choices.get_mut(index)?.next_mut()?;
        }
        Some(stage)
    }

    /// Record `choice` as the current selection at this stage.
    ///
    /// Fails with [`JourneyError::ChoiceNotFound`] when the stage does not
    /// own the choice; the stage is left unchanged.
    pub fn select_local(&mut self, choice: ChoiceId) -> JourneyResult<()> {
        if self.choice_by_id(choice).is_none() {
            return Err(JourneyError::ChoiceNotFound {
                id: choice,
                stage: self.id,
            });
        }
        self.current = Some(choice);
        Ok(())
    }

    /// Clear every selection strictly below this stage, across all choice
    /// subtrees. The selection at this stage itself is untouched.
    pub fn clear_descendant_selections(&mut self) {
        for choice in &mut self.choices {
            if let Some(next) = choice.next_mut() {
                next.clear_all_selections();
            }
        }
    }

    /// Clear every selection at and below this stage.
    pub fn clear_all_selections(&mut self) {
        self.current = None;
        self.clear_descendant_selections();
    }

    /// Walk `current` pointers from this stage downward, yielding the
    /// selected choice id at each stage along the active lineage.
    ///
    /// This walk is the authoritative definition of the selection set:
    /// after every mutation the reconciled set must equal exactly the ids
    /// this walk produces.
    #[must_use]
    pub fn walk_selected(&self) -> SelectedLineage<'_> {
        SelectedLineage { stage: Some(self) }
    }

    /// Collect [`Stage::walk_selected`] into a [`SelectionSet`].
    #[must_use]
    pub fn selection_set(&self) -> SelectionSet {
        self.walk_selected().collect()
    }

    /// Check structural invariants for this stage and everything below:
    /// every stage owns at least one choice, choice ids are unique across
    /// the tree, and any `current` pointer names an owned choice.
    pub fn validate(&self) -> JourneyResult<()> {
        let mut seen = BTreeSet::new();
        self.validate_inner(&mut seen)
    }

    fn validate_inner(&self, seen: &mut BTreeSet<ChoiceId>) -> JourneyResult<()> {
        if self.choices.is_empty() {
            return Err(JourneyError::EmptyStage { id: self.id });
        }
        if let Some(current) = self.current
            && self.choice_by_id(current).is_none()
        {
            return Err(JourneyError::DanglingSelection {
                stage: self.id,
                choice: current,
            });
        }
        for choice in &self.choices {
            if !seen.insert(choice.id) {
                return Err(JourneyError::DuplicateChoiceId { id: choice.id });
            }
            if let Some(next) = choice.next() {
                next.validate_inner(seen)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the active lineage produced by [`Stage::walk_selected`].
#[derive(Debug)]
pub struct SelectedLineage<'a> {
    stage: Option<&'a Stage>,
}

impl Iterator for SelectedLineage<'_> {
    type Item = ChoiceId;

    fn next(&mut self) -> Option<ChoiceId> {
        let stage = self.stage.take()?;
        let current = stage.current?;
        let choice = stage.choice_by_id(current)?;
        self.stage = choice.next();
        Some(current)
    }
}

//! JSON wire format for the initial tree payload.
//!
//! The engine accepts a journey tree as a plain nested data structure
//! (ids, ordered choice lists, optional nested stage). This module holds
//! the serde mirror types for that payload and the validated conversion
//! into a [`Stage`] tree. The tree is never persisted back.
//!
//! Only available with the `serde` feature.

use crate::error::JourneyResult;
use crate::stage::{Choice, Stage};
use serde::{Deserialize, Serialize};

/// Wire form of a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSpec {
    /// Stage id (may recur across branches).
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Choices in display order.
    #[serde(default)]
    pub choices: Vec<ChoiceSpec>,
    /// Pre-selected choice id, if the seed carries one.
    #[serde(default)]
    pub current: Option<u64>,
}

/// Wire form of a choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceSpec {
    /// Choice id (unique across the tree).
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub detail: Option<String>,
    /// Nested stage this choice advances to; absent for terminal choices.
    #[serde(default)]
    pub next: Option<Box<StageSpec>>,
}

impl StageSpec {
    /// Build a validated [`Stage`] tree from this payload.
    ///
    /// Refuses malformed input: a stage with zero choices, duplicate
    /// choice ids, or a pre-selection naming a choice the stage does not
    /// own.
    pub fn into_tree(self) -> JourneyResult<Stage> {
        let tree = self.build();
        tree.validate()?;
        Ok(tree)
    }

    fn build(self) -> Stage {
        let mut stage = Stage::new(self.id, self.title);
        for choice in self.choices {
            stage = stage.choice(choice.build());
        }
        if let Some(current) = self.current {
            stage = stage.with_current(current);
        }
        stage
    }
}

impl ChoiceSpec {
    fn build(self) -> Choice {
        let mut choice = Choice::new(self.id, self.title);
        if let Some(detail) = self.detail {
            choice = choice.with_detail(detail);
        }
        if let Some(next) = self.next {
            choice = choice.then(next.build());
        }
        choice
    }
}

impl TryFrom<StageSpec> for Stage {
    type Error = crate::error::JourneyError;

    fn try_from(spec: StageSpec) -> JourneyResult<Stage> {
        spec.into_tree()
    }
}

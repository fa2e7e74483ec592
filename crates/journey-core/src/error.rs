//! Error types for the journey crates.

use crate::path::PathKey;
use crate::stage::{ChoiceId, StageId};
use std::fmt;

/// Errors surfaced by tree construction and navigation.
///
/// Lookup failures (`StageNotFound`, `ChoiceNotFound`) are surfaced to the
/// caller and never silently recovered by guessing a fallback selection.
/// The remaining variants describe malformed input trees and are fatal at
/// load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyError {
    /// A referenced stage occurrence does not exist in the current tree.
    StageNotFound {
        /// Stage id the caller asked for.
        id: StageId,
        /// Structural address of the occurrence the caller asked for.
        path: PathKey,
    },
    /// A referenced choice does not exist at the named stage.
    ChoiceNotFound {
        /// Choice id the caller asked for.
        id: ChoiceId,
        /// Stage the lookup was scoped to.
        stage: StageId,
    },
    /// A stage owns zero choices.
    EmptyStage {
        /// Offending stage id.
        id: StageId,
    },
    /// The same choice id appears more than once in the tree.
    DuplicateChoiceId {
        /// Offending choice id.
        id: ChoiceId,
    },
    /// A stage's current selection references a choice it does not own.
    DanglingSelection {
        /// Stage carrying the selection.
        stage: StageId,
        /// Choice id the selection points at.
        choice: ChoiceId,
    },
}

impl JourneyError {
    /// Whether this is a lookup failure (a referenced stage occurrence or
    /// choice does not exist in the current tree).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            JourneyError::StageNotFound { .. } | JourneyError::ChoiceNotFound { .. }
        )
    }

    /// Whether this describes a malformed input tree.
    #[must_use]
    pub fn is_invalid_tree(&self) -> bool {
        !self.is_not_found()
    }
}

impl fmt::Display for JourneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JourneyError::StageNotFound { id, path } => {
                write!(f, "no stage {id} at path {path}")
            }
            JourneyError::ChoiceNotFound { id, stage } => {
                write!(f, "stage {stage} owns no choice {id}")
            }
            JourneyError::EmptyStage { id } => {
                write!(f, "invalid tree: stage {id} has no choices")
            }
            JourneyError::DuplicateChoiceId { id } => {
                write!(f, "invalid tree: choice id {id} appears more than once")
            }
            JourneyError::DanglingSelection { stage, choice } => {
                write!(
                    f,
                    "invalid tree: stage {stage} selects choice {choice} it does not own"
                )
            }
        }
    }
}

impl std::error::Error for JourneyError {}

/// Result type for journey operations.
pub type JourneyResult<T> = Result<T, JourneyError>;

#![forbid(unsafe_code)]

//! Core data model for the journey decision-tree navigator.
//!
//! A journey is a strict tree of alternating [`Stage`] and [`Choice`]
//! nodes: a stage presents an ordered set of choices, and a choice may
//! own a nested stage (or be terminal). This crate holds the tree types,
//! the structural [`PathKey`] addressing scheme, validation, and the
//! JSON wire format for the initial tree payload (behind the `serde`
//! feature). The navigation algorithms live in `journey-engine`.
//!
//! # Example
//!
//! ```
//! use journey_core::{Choice, Stage};
//!
//! let tree = Stage::new(1, "Pick a direction")
//!     .choice(Choice::new(10, "Explore").then(
//!         Stage::new(2, "How deep?").choice(Choice::new(20, "All the way")),
//!     ))
//!     .choice(Choice::new(11, "Discuss this instead"));
//!
//! assert_eq!(tree.choices().len(), 2);
//! assert!(tree.choices()[1].is_terminal());
//! ```

pub mod error;
pub mod path;
pub mod stage;
#[cfg(feature = "serde")]
pub mod wire;

pub use error::{JourneyError, JourneyResult};
pub use path::{PathKey, PathRelation};
pub use stage::{Choice, ChoiceId, SelectionSet, Stage, StageId};

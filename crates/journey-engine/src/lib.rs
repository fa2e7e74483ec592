#![forbid(unsafe_code)]

//! Navigation engine for journey decision trees.
//!
//! All operations here are pure, synchronous functions over immutable
//! inputs: mutation produces a fresh tree, reconciliation produces a
//! fresh selection set, and the [`Journey`] session commits both halves
//! together or not at all. There is no I/O and no shared mutable state.
//!
//! # Example
//!
//! ```
//! use journey_core::{Choice, ChoiceId, Stage};
//! use journey_engine::Journey;
//!
//! let tree = Stage::new(1, "Start")
//!     .choice(Choice::new(10, "Go deeper").then(
//!         Stage::new(2, "Next").choice(Choice::new(20, "Leaf")),
//!     ))
//!     .choice(Choice::new(11, "Just chat"));
//!
//! let mut journey = Journey::new(tree).unwrap();
//! journey.start().unwrap();
//! assert!(journey.selected().contains(&ChoiceId::new(10)));
//! ```

pub mod index;
pub mod mutate;
pub mod reconcile;
pub mod resolve;
pub mod session;

pub use index::{Occurrence, PathIndex, StageRef};
pub use mutate::set_selection;
pub use reconcile::reconcile;
pub use resolve::{DefaultStep, resolve_default_path};
pub use session::{DiscussionSink, Journey, NullSink, SelectOutcome};

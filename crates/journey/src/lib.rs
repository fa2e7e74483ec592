#![forbid(unsafe_code)]

//! Guided decision-journey navigation engine.
//!
//! One import surface over the journey crate family:
//!
//! - [`journey_core`]: the stage/choice tree model, structural path
//!   keys, validation, and the JSON wire format (`serde` feature).
//! - [`journey_engine`]: indexing, selection mutation and
//!   reconciliation, default-path resolution, and the [`Journey`]
//!   session facade.
//!
//! # Quick start
//!
//! ```
//! use journey::prelude::*;
//!
//! let tree = Stage::new(1, "Where to begin?")
//!     .choice(Choice::new(10, "Map the problem").then(
//!         Stage::new(2, "Pick a lens").choice(Choice::new(20, "Customers")),
//!     ))
//!     .choice(Choice::new(11, "Ask a question"));
//!
//! let mut journey = Journey::new(tree)?;
//! journey.start()?;
//! assert_eq!(journey.active_lineage(), vec![ChoiceId::new(10)]);
//! # Ok::<(), journey::Error>(())
//! ```

pub use journey_core::{
    Choice, ChoiceId, JourneyError, JourneyResult, PathKey, PathRelation, SelectionSet, Stage,
    StageId,
};
pub use journey_engine::{
    DefaultStep, DiscussionSink, Journey, NullSink, Occurrence, PathIndex, SelectOutcome,
    StageRef, reconcile, resolve_default_path, set_selection,
};

/// Top-level error type, re-exported for host code.
pub type Error = JourneyError;

/// Standard result type for journey APIs.
pub type Result<T> = JourneyResult<T>;

pub use journey_core as core;
pub use journey_engine as engine;

/// Common imports for host applications.
pub mod prelude {
    pub use crate::{
        Choice, ChoiceId, DiscussionSink, Journey, PathKey, SelectOutcome, SelectionSet, Stage,
        StageId, StageRef,
    };
}

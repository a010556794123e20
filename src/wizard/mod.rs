//! Project creation wizard
//!
//! A branching sequence of steps that accumulates a project draft and
//! commits it to the catalog store. The step sequence depends on the
//! project type chosen at step two; state transitions live in a pure
//! reducer so the whole flow is testable without a terminal.

pub mod commit;
pub mod draft;
pub mod interactive;
pub mod selectors;
pub mod steps;

pub use commit::{commit, CommitError, CommitOutcome};
pub use draft::{apply, Draft, DraftStats, WizardEvent};
pub use interactive::WizardSession;
pub use steps::{steps_for, StepId};

//! Transition execution and autonomous stepping.
//!
//! The transition engine validates and executes a single requested move;
//! the choice resolver computes what is reachable; the life engine
//! composes the two to advance an instance without external commands.
//! Everything runs synchronously on the caller's thread.

mod choices;
mod life;
mod transition;

pub use life::{StepError, StepMode, StepOutcome, StepPolicy};
pub use transition::TransitionError;

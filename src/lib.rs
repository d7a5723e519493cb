//! Volition: a pure functional state machine runtime
//!
//! Volition models machines as two kinds of values: a [`Definition`] —
//! built once, frozen behind an `Arc`, and shared by reference — and
//! [`Instance`] snapshots that carry the current state, keyed data, and
//! stepping bookkeeping. Every operation returns a new instance; nothing
//! is mutated in place.
//!
//! # Core Concepts
//!
//! - **State**: an opaque identifier; the `"any"` sentinel wildcards
//!   either side of a transition or validator lookup
//! - **Transform**: a pure data rewrite fired by a transition, with
//!   generic exit (`state -> any`) and entry (`any -> state`) hooks
//! - **Validator**: a pure predicate over instance data gating a move;
//!   rejection is a normal outcome, not an error
//! - **Life**: an instance [given life](Instance::give_life) advances
//!   itself through [`Instance::act`], retrying validator-rejected
//!   targets as pending choices
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use volition::{transitions, validators, Definition, Instance, StepMode, StepOutcome};
//!
//! let definition = Definition::build(
//!     transitions![
//!         ["idle", "running"],
//!         ["running", "done"],
//!     ],
//!     validators![
//!         ["running", "done", |data: &volition::Data| {
//!             data.get("ready").and_then(|v| v.as_bool()).unwrap_or(false)
//!         }],
//!     ],
//! )?;
//!
//! let instance = Instance::create(definition, "idle").give_life(None);
//!
//! // idle -> running is unguarded.
//! let (instance, _) = instance.act(StepMode::Sequential)?;
//! assert_eq!(instance.state().as_str(), "running");
//!
//! // running -> done is gated on data.ready; the step parks as pending.
//! let (instance, outcome) = instance.act(StepMode::Sequential)?;
//! assert!(matches!(outcome, StepOutcome::Pending { .. }));
//!
//! // Satisfy the validator and retry.
//! let instance = instance.set_data("ready", json!(true));
//! let (instance, _) = instance.act(StepMode::Sequential)?;
//! assert_eq!(instance.state().as_str(), "done");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Concurrency
//!
//! Execution is synchronous with no suspension points. Instances are
//! immutable values, so concurrent readers of one snapshot never race,
//! and any number of instances can share one frozen definition across
//! threads. Serializing updates to one *logical* instance is the
//! caller's job (e.g. a compare-and-swap wrapper around the current
//! snapshot); the runtime neither provides nor detects such wrapping.

pub mod builder;
pub mod core;
pub mod instance;
pub mod snapshot;
pub mod step;

// Re-export commonly used types
pub use builder::{BuildError, DefinitionBuilder};
pub use core::{
    Data, Definition, State, StateEntry, Transform, TransitionLog, TransitionRecord,
    TransitionTriple, Validator, ValidatorTriple, RESERVED_NAMES,
};
pub use instance::Instance;
pub use snapshot::{Snapshot, SnapshotError};
pub use step::{StepError, StepMode, StepOutcome, StepPolicy, TransitionError};

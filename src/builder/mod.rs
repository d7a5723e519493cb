//! Builder API for constructing machine definitions.
//!
//! Definitions are mutable only here, during construction; `build` freezes
//! them into a shared, read-only structure. The `transitions!` and
//! `validators!` macros assemble the triple lists consumed by
//! [`Definition::build`](crate::Definition::build).

pub mod definition;
pub mod error;
pub mod macros;

pub use definition::DefinitionBuilder;
pub use error::BuildError;

//! Build errors for definition construction.

use thiserror::Error;

/// Errors that can occur when building machine definitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("'{name}' is a reserved identifier and cannot be registered as a state")]
    ReservedName { name: String },
}

//! State identifiers and the reserved wildcard.
//!
//! States are opaque, equality-comparable names. One sentinel, spelled
//! `"any"`, is the wildcard that matches every state on the relevant side
//! of a transition or validator lookup. The legacy spelling `"*"` is
//! accepted for compatibility and normalized to the canonical sentinel at
//! construction time, so lookups only ever compare one spelling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical spelling of the wildcard.
const ANY_NAME: &str = "any";

/// Compatibility spelling, rewritten to the canonical one on construction.
const ANY_SYNONYM: &str = "*";

/// Identifiers naming instance internals. Registering any of these as a
/// state fails the build with [`BuildError::ReservedName`].
///
/// [`BuildError::ReservedName`]: crate::builder::BuildError::ReservedName
pub const RESERVED_NAMES: [&str; 3] = ["state", "data", "definition"];

/// An opaque state identifier.
///
/// # Example
///
/// ```rust
/// use volition::State;
///
/// let running = State::new("running");
/// assert_eq!(running.as_str(), "running");
///
/// // Both wildcard spellings normalize to the same sentinel.
/// assert_eq!(State::new("*"), State::any());
/// assert!(State::new("any").is_any());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct State(String);

impl State {
    /// Create a state identifier, normalizing the wildcard synonym.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == ANY_SYNONYM {
            return Self::any();
        }
        State(name)
    }

    /// The wildcard sentinel matching "any state".
    pub fn any() -> Self {
        State(ANY_NAME.to_string())
    }

    /// Whether this is the wildcard sentinel.
    pub fn is_any(&self) -> bool {
        self.0 == ANY_NAME
    }

    /// Whether this name collides with an instance-internal identifier.
    pub fn is_reserved(&self) -> bool {
        RESERVED_NAMES.contains(&self.0.as_str())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<State> for String {
    fn from(state: State) -> Self {
        state.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

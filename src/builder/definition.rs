//! Builder for constructing machine definitions.

use crate::builder::error::BuildError;
use crate::core::{Definition, State, Transform, Validator};
use std::sync::Arc;

/// Builder for constructing definitions with a fluent API.
///
/// The builder is the only mutable view of a definition. `build` freezes
/// the result behind an `Arc`; readers never see further mutation.
///
/// # Example
///
/// ```rust
/// use volition::DefinitionBuilder;
///
/// let definition = DefinitionBuilder::new()
///     .transition("idle", "running")?
///     .transition("running", "done")?
///     .build();
///
/// assert!(definition.has_state(&"idle".into()));
/// # Ok::<(), volition::BuildError>(())
/// ```
pub struct DefinitionBuilder {
    definition: Definition,
}

impl DefinitionBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            definition: Definition::default(),
        }
    }

    /// Declare a state. Registering the wildcard is a no-op; it is
    /// addressed in lookups, never declared.
    pub fn state(mut self, name: impl Into<State>) -> Result<Self, BuildError> {
        let state = name.into();
        ensure_unreserved(&state)?;
        if !state.is_any() {
            self.definition.states.insert(state);
        }
        Ok(self)
    }

    /// Remove a state and its outgoing entry. Transitions elsewhere that
    /// still name it as a target keep their slot, but the target is no
    /// longer declared, so moving there fails with `UnknownState`.
    pub fn remove_state(mut self, name: impl Into<State>) -> Result<Self, BuildError> {
        let state = name.into();
        ensure_unreserved(&state)?;
        self.definition.states.remove(&state);
        self.definition.entries.remove(&state);
        Ok(self)
    }

    /// Register a transition with no data rewrite (identity).
    pub fn transition(
        self,
        from: impl Into<State>,
        to: impl Into<State>,
    ) -> Result<Self, BuildError> {
        self.insert_transition(from.into(), to.into(), None)
    }

    /// Register a transition with a data rewrite.
    pub fn transition_with(
        self,
        from: impl Into<State>,
        to: impl Into<State>,
        transform: Transform,
    ) -> Result<Self, BuildError> {
        self.insert_transition(from.into(), to.into(), Some(transform))
    }

    /// Register a validator gating `from -> to`. Validator endpoints do
    /// not declare states.
    pub fn validator(
        mut self,
        from: impl Into<State>,
        to: impl Into<State>,
        validator: Validator,
    ) -> Result<Self, BuildError> {
        let (from, to) = (from.into(), to.into());
        ensure_unreserved(&from)?;
        ensure_unreserved(&to)?;
        self.definition
            .entries
            .entry(from)
            .or_default()
            .put_validator(to, validator);
        Ok(self)
    }

    pub(crate) fn insert_transition(
        mut self,
        from: State,
        to: State,
        transform: Option<Transform>,
    ) -> Result<Self, BuildError> {
        ensure_unreserved(&from)?;
        ensure_unreserved(&to)?;
        if !from.is_any() {
            self.definition.states.insert(from.clone());
        }
        if !to.is_any() {
            self.definition.states.insert(to.clone());
            self.definition.entries.entry(to.clone()).or_default();
        }
        self.definition
            .entries
            .entry(from)
            .or_default()
            .put_transition(to, transform);
        Ok(self)
    }

    /// Freeze the definition. No further mutation is possible.
    pub fn build(self) -> Arc<Definition> {
        Arc::new(self.definition)
    }
}

impl Default for DefinitionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_unreserved(state: &State) -> Result<(), BuildError> {
    if state.is_reserved() {
        return Err(BuildError::ReservedName {
            name: state.as_str().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Data;

    #[test]
    fn fluent_api_builds_definition() {
        let def = DefinitionBuilder::new()
            .transition("idle", "running")
            .unwrap()
            .transition("running", "done")
            .unwrap()
            .build();

        assert!(def.has_state(&State::new("idle")));
        assert!(def.has_state(&State::new("done")));
        assert_eq!(def.state_count(), 3);
    }

    #[test]
    fn reserved_names_fail_as_states() {
        for name in crate::RESERVED_NAMES {
            let result = DefinitionBuilder::new().state(name);
            assert!(
                matches!(result, Err(BuildError::ReservedName { .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn reserved_names_fail_as_transition_endpoints() {
        let result = DefinitionBuilder::new().transition("idle", "state");
        assert!(matches!(result, Err(BuildError::ReservedName { .. })));

        let result = DefinitionBuilder::new().transition("data", "idle");
        assert!(matches!(result, Err(BuildError::ReservedName { .. })));
    }

    #[test]
    fn reserved_names_fail_as_validator_endpoints() {
        let result = DefinitionBuilder::new().validator(
            "definition",
            "idle",
            Validator::new(|_: &Data| true),
        );
        assert!(matches!(result, Err(BuildError::ReservedName { .. })));
    }

    #[test]
    fn declaring_the_wildcard_is_a_no_op() {
        let def = DefinitionBuilder::new().state("any").unwrap().build();
        assert_eq!(def.state_count(), 0);
    }

    #[test]
    fn remove_state_drops_entry_and_declaration() {
        let def = DefinitionBuilder::new()
            .transition("a", "b")
            .unwrap()
            .transition("b", "c")
            .unwrap()
            .remove_state("b")
            .unwrap()
            .build();

        assert!(!def.has_state(&State::new("b")));
        assert!(def.entry(&State::new("b")).is_none());
        // a's transition toward b survives, but b is undeclared now.
        assert!(def
            .entry(&State::new("a"))
            .unwrap()
            .has_target(&State::new("b")));
    }

    #[test]
    fn transition_with_stores_the_rewrite() {
        let def = DefinitionBuilder::new()
            .transition_with(
                "idle",
                "running",
                Transform::new(|mut data: Data| {
                    data.insert("started".to_string(), serde_json::json!(true));
                    data
                }),
            )
            .unwrap()
            .build();

        assert!(def
            .transform(&State::new("idle"), &State::new("running"))
            .is_some());
    }

    #[test]
    fn endpoints_get_entries_even_without_outgoing_transitions() {
        let def = DefinitionBuilder::new()
            .transition("a", "b")
            .unwrap()
            .build();

        // Terminal states still resolve to an (empty) entry.
        assert!(def.entry(&State::new("b")).is_some());
        assert_eq!(def.entry(&State::new("b")).unwrap().targets().count(), 0);
    }
}

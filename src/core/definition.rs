//! Shared machine definitions.
//!
//! A [`Definition`] maps each state to its outgoing transition functions and
//! validator predicates. It is built once (see [`crate::builder`]), frozen
//! behind an `Arc`, and then only read: every instance referencing it shares
//! the same structure, and instance operations never mutate it.
//!
//! The declared state set derives from transition endpoints. The wildcard
//! is addressed in lookups (its entry holds the generic exit/entry hooks)
//! but is never a declared state, and validator endpoints declare nothing.

use crate::core::state::State;
use crate::core::transform::{Transform, Validator};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A transition triple: source, target, and optional data rewrite.
pub type TransitionTriple = (State, State, Option<Transform>);

/// A validator triple: source, target, and gating predicate.
pub type ValidatorTriple = (State, State, Validator);

/// Outgoing transitions and validators for a single state.
///
/// Transitions keep registration order; that order drives choice
/// resolution. Re-registering a target replaces the stored function but
/// keeps the original position.
#[derive(Clone, Debug, Default)]
pub struct StateEntry {
    pub(crate) transitions: Vec<(State, Option<Transform>)>,
    pub(crate) validators: Vec<(State, Validator)>,
}

impl StateEntry {
    /// Targets of the outgoing transitions, in registration order.
    pub fn targets(&self) -> impl Iterator<Item = &State> {
        self.transitions.iter().map(|(to, _)| to)
    }

    /// Whether a transition toward `to` is registered.
    pub fn has_target(&self, to: &State) -> bool {
        self.transitions.iter().any(|(t, _)| t == to)
    }

    /// The transform registered toward `to`, if one was supplied.
    pub fn transform_to(&self, to: &State) -> Option<&Transform> {
        self.transitions
            .iter()
            .find(|(t, _)| t == to)
            .and_then(|(_, transform)| transform.as_ref())
    }

    /// The validator registered toward `to`.
    pub fn validator_for(&self, to: &State) -> Option<&Validator> {
        self.validators
            .iter()
            .find(|(t, _)| t == to)
            .map(|(_, validator)| validator)
    }

    pub(crate) fn put_transition(&mut self, to: State, transform: Option<Transform>) {
        match self.transitions.iter_mut().find(|(t, _)| *t == to) {
            Some(slot) => slot.1 = transform,
            None => self.transitions.push((to, transform)),
        }
    }

    pub(crate) fn put_validator(&mut self, to: State, validator: Validator) {
        match self.validators.iter_mut().find(|(t, _)| *t == to) {
            Some(slot) => slot.1 = validator,
            None => self.validators.push((to, validator)),
        }
    }
}

/// An immutable, shared machine definition.
#[derive(Clone, Debug, Default)]
pub struct Definition {
    pub(crate) states: HashSet<State>,
    pub(crate) entries: HashMap<State, StateEntry>,
}

impl Definition {
    /// Build a shared definition from transition and validator triples.
    ///
    /// Derives the state set from the transition endpoints, registers every
    /// state, then every transition, then every validator. Fails if any
    /// endpoint is a reserved identifier.
    ///
    /// # Example
    ///
    /// ```rust
    /// use volition::{transitions, validators, Data, Definition};
    ///
    /// let definition = Definition::build(
    ///     transitions![
    ///         ["idle", "running"],
    ///         ["running", "done"],
    ///     ],
    ///     validators![
    ///         ["running", "done", |data: &Data| data.contains_key("ready")],
    ///     ],
    /// )?;
    ///
    /// assert!(definition.has_state(&"running".into()));
    /// # Ok::<(), volition::BuildError>(())
    /// ```
    pub fn build(
        transitions: impl IntoIterator<Item = TransitionTriple>,
        validators: impl IntoIterator<Item = ValidatorTriple>,
    ) -> Result<Arc<Self>, crate::builder::BuildError> {
        let mut builder = crate::builder::DefinitionBuilder::new();
        for (from, to, transform) in transitions {
            builder = builder.insert_transition(from, to, transform)?;
        }
        for (from, to, validator) in validators {
            builder = builder.validator(from, to, validator)?;
        }
        Ok(builder.build())
    }

    /// Whether `state` is declared. The wildcard is never declared.
    pub fn has_state(&self, state: &State) -> bool {
        self.states.contains(state)
    }

    /// The declared states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    /// Number of declared states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// The entry for `state`, including the wildcard's entry when asked.
    pub fn entry(&self, state: &State) -> Option<&StateEntry> {
        self.entries.get(state)
    }

    /// The transform registered for `from -> to`, if any.
    pub fn transform(&self, from: &State, to: &State) -> Option<&Transform> {
        self.entries.get(from).and_then(|e| e.transform_to(to))
    }

    /// The validator registered for `from -> to`, if any.
    pub fn validator(&self, from: &State, to: &State) -> Option<&Validator> {
        self.entries.get(from).and_then(|e| e.validator_for(to))
    }
}

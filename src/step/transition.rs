//! Single-transition execution.
//!
//! A requested move runs a three-stage pipeline over the instance data:
//! the generic exit hook (`current -> any`), the specific transition
//! function (`current -> target`), then the generic entry hook
//! (`any -> target`). Each stage defaults to identity, so a move toward
//! any declared state succeeds unless a validator rejects it.

use crate::core::{State, TransitionRecord};
use crate::instance::Instance;
use chrono::Utc;
use thiserror::Error;

/// Errors fatal to a requested move.
///
/// Validator rejection is deliberately not here: a rejected move returns
/// the instance unchanged, and callers detect it by comparing states.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("unknown state '{state}'")]
    UnknownState { state: String },

    #[error("instance has no bound definition")]
    NoDefinition,
}

impl Instance {
    /// Whether the validator registered for `from -> to` admits the
    /// instance's current data. Absent validators admit everything, and an
    /// unbound instance answers permissively.
    pub fn is_valid_transition(&self, from: &State, to: &State) -> bool {
        self.definition
            .as_ref()
            .and_then(|def| def.validator(from, to))
            .is_none_or(|validator| validator.check(&self.data))
    }

    /// Execute a single requested move, returning the resulting instance.
    ///
    /// Fails with [`TransitionError::NoDefinition`] when unbound and
    /// [`TransitionError::UnknownState`] when the target is not declared.
    /// A validator rejection is not a failure: the returned instance is
    /// unchanged, distinguishable only by its state.
    pub fn move_to(&self, to: impl Into<State>) -> Result<Instance, TransitionError> {
        let to = to.into();
        let Some(def) = self.definition.clone() else {
            return Err(TransitionError::NoDefinition);
        };
        if !def.has_state(&to) {
            return Err(TransitionError::UnknownState {
                state: to.to_string(),
            });
        }
        if !self.is_valid_transition(&self.state, &to) {
            tracing::debug!(from = %self.state, to = %to, "transition rejected by validator");
            return Ok(self.clone());
        }

        let from = self.state.clone();
        let any = State::any();
        let mut data = self.data.clone();
        if let Some(exit) = def.transform(&from, &any) {
            data = exit.apply(data);
        }
        if let Some(direct) = def.transform(&from, &to) {
            data = direct.apply(data);
        }
        if let Some(entry) = def.transform(&any, &to) {
            data = entry.apply(data);
        }

        let mut next = self.clone();
        next.state = to.clone();
        next.data = data;
        next.log = self.log.record(TransitionRecord {
            from: from.clone(),
            to: to.clone(),
            timestamp: Utc::now(),
            attempt: self.attempts + 1,
        });
        next.attempts = 0;
        tracing::trace!(from = %from, to = %to, "transition applied");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Data, Definition};
    use crate::{transitions, validators, Snapshot};
    use serde_json::json;
    use std::sync::Arc;

    fn push_marker(marker: &'static str) -> impl Fn(Data) -> Data + Send + Sync + 'static {
        move |mut data: Data| {
            let mut seen = data
                .get("order")
                .and_then(|v| v.as_array().cloned())
                .unwrap_or_default();
            seen.push(json!(marker));
            data.insert("order".to_string(), json!(seen));
            data
        }
    }

    fn hook_definition() -> Arc<Definition> {
        Definition::build(
            transitions![
                ["idle", "running", push_marker("direct")],
                ["idle", "any", push_marker("exit")],
                ["any", "running", push_marker("entry")],
            ],
            validators![],
        )
        .unwrap()
    }

    #[test]
    fn move_to_unknown_state_fails() {
        let def = Definition::build(transitions![["idle", "running"]], validators![]).unwrap();
        let instance = Instance::create(def, "idle");

        let result = instance.move_to("nowhere");
        assert!(matches!(
            result,
            Err(TransitionError::UnknownState { .. })
        ));
    }

    #[test]
    fn move_to_the_wildcard_is_unknown() {
        let def = hook_definition();
        let instance = Instance::create(def, "idle");

        assert!(matches!(
            instance.move_to("any"),
            Err(TransitionError::UnknownState { .. })
        ));
    }

    #[test]
    fn unbound_instance_cannot_move() {
        let def = Definition::build(transitions![["idle", "running"]], validators![]).unwrap();
        let instance = Instance::create(def, "idle");
        let unbound = Snapshot::capture(&instance).restore();

        assert!(matches!(
            unbound.move_to("running"),
            Err(TransitionError::NoDefinition)
        ));
    }

    #[test]
    fn admitted_move_updates_state() {
        let def = Definition::build(transitions![["idle", "running"]], validators![]).unwrap();
        let instance = Instance::create(def, "idle");

        let moved = instance.move_to("running").unwrap();
        assert_eq!(moved.state(), &State::new("running"));
        assert_eq!(instance.state(), &State::new("idle"));
    }

    #[test]
    fn rejected_move_returns_the_instance_unchanged() {
        let def = Definition::build(
            transitions![["idle", "running"]],
            validators![["idle", "running", |_: &Data| false]],
        )
        .unwrap();
        let instance = Instance::create(def, "idle").set_data("k", json!(1));

        let result = instance.move_to("running").unwrap();
        assert_eq!(result.state(), instance.state());
        assert_eq!(result.data(), instance.data());
        assert!(result.log().is_empty());
    }

    #[test]
    fn pipeline_runs_exit_direct_entry_in_order() {
        let instance = Instance::create(hook_definition(), "idle");

        let moved = instance.move_to("running").unwrap();
        assert_eq!(
            moved.get("order"),
            Some(&json!(["exit", "direct", "entry"]))
        );
    }

    #[test]
    fn hooks_fire_without_a_direct_function() {
        let def = Definition::build(
            transitions![
                ["idle", "running"],
                ["any", "running", push_marker("entry")],
            ],
            validators![],
        )
        .unwrap();
        let instance = Instance::create(def, "idle");

        let moved = instance.move_to("running").unwrap();
        assert_eq!(moved.get("order"), Some(&json!(["entry"])));
    }

    #[test]
    fn moves_without_registered_transitions_still_succeed() {
        // Both hooks and the direct function default to identity, so any
        // declared target is admissible when no validator objects.
        let def = Definition::build(transitions![["idle", "running"]], validators![]).unwrap();
        let instance = Instance::create(def, "running");

        let moved = instance.move_to("idle").unwrap();
        assert_eq!(moved.state(), &State::new("idle"));
    }

    #[test]
    fn validator_runs_before_any_transform() {
        let def = Definition::build(
            transitions![["idle", "running", push_marker("direct")]],
            validators![["idle", "running", |data: &Data| {
                data.contains_key("order")
            }]],
        )
        .unwrap();
        let instance = Instance::create(def, "idle");

        // Validator sees pre-transform data; no marker exists yet.
        let result = instance.move_to("running").unwrap();
        assert_eq!(result.state(), &State::new("idle"));
        assert!(result.get("order").is_none());
    }

    #[test]
    fn successful_move_is_logged() {
        let def = Definition::build(transitions![["idle", "running"]], validators![]).unwrap();
        let instance = Instance::create(def, "idle");

        let moved = instance.move_to("running").unwrap();
        assert_eq!(moved.log().len(), 1);
        let record = &moved.log().records()[0];
        assert_eq!(record.from, State::new("idle"));
        assert_eq!(record.to, State::new("running"));
        assert_eq!(record.attempt, 1);
    }

    #[test]
    fn missing_validator_is_permissive() {
        let def = Definition::build(transitions![["idle", "running"]], validators![]).unwrap();
        let instance = Instance::create(def, "idle");

        assert!(instance.is_valid_transition(&State::new("idle"), &State::new("running")));
        assert!(instance.is_valid_transition(&State::new("running"), &State::new("idle")));
    }
}

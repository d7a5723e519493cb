//! Machine instances as immutable values.
//!
//! An [`Instance`] is a snapshot of one machine: its current state, keyed
//! data, a shared reference to the definition, and the stepping
//! bookkeeping used by the life engine. Every mutating operation returns a
//! new instance and leaves the original untouched, so concurrent readers
//! of one snapshot never race. Concurrent writers of one *logical*
//! instance need an external compare-and-swap wrapper; none is provided.

use crate::core::{Data, Definition, State, TransitionLog};
use crate::step::StepPolicy;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// An immutable snapshot of a machine instance.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use volition::{transitions, validators, Definition, Instance};
///
/// let definition = Definition::build(
///     transitions![["idle", "running"]],
///     validators![],
/// )?;
///
/// let instance = Instance::create(definition, "idle");
/// let updated = instance.set_data("attempts", json!(1));
///
/// // The original snapshot is unchanged.
/// assert!(instance.get("attempts").is_none());
/// assert_eq!(updated.get("attempts"), Some(&json!(1)));
/// # Ok::<(), volition::BuildError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Instance {
    pub(crate) id: Uuid,
    pub(crate) state: State,
    pub(crate) data: Data,
    pub(crate) definition: Option<Arc<Definition>>,
    pub(crate) alive: bool,
    pub(crate) step_policy: Option<StepPolicy>,
    pub(crate) pending_choice: Option<State>,
    pub(crate) last_completed: Option<State>,
    pub(crate) attempts: usize,
    pub(crate) log: TransitionLog,
    pub(crate) created_at: DateTime<Utc>,
}

impl Instance {
    /// Bind a definition and an initial state into a new, not-yet-alive
    /// instance with empty data.
    pub fn create(definition: Arc<Definition>, initial: impl Into<State>) -> Self {
        Instance {
            id: Uuid::new_v4(),
            state: initial.into(),
            data: Data::new(),
            definition: Some(definition),
            alive: false,
            step_policy: None,
            pending_choice: None,
            last_completed: None,
            attempts: 0,
            log: TransitionLog::new(),
            created_at: Utc::now(),
        }
    }

    /// Seed the instance with initial data.
    pub fn with_data(mut self, data: Data) -> Self {
        self.data = data;
        self
    }

    /// Attach (or replace) the definition reference.
    pub fn bind(&self, definition: Arc<Definition>) -> Self {
        let mut next = self.clone();
        next.definition = Some(definition);
        next
    }

    /// Unique instance identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The current state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The instance data.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// One value from the instance data.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The bound definition, if any.
    pub fn definition(&self) -> Option<&Arc<Definition>> {
        self.definition.as_ref()
    }

    /// Whether the instance is eligible for autonomous stepping.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// A previously attempted, validator-rejected autonomous target.
    pub fn pending_choice(&self) -> Option<&State> {
        self.pending_choice.as_ref()
    }

    /// The last autonomously completed target.
    pub fn last_completed(&self) -> Option<&State> {
        self.last_completed.as_ref()
    }

    /// Rejected tries since the last completed move.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// The log of completed transitions.
    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    /// When this instance was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Direct transition targets of the current state, in registration
    /// order. The wildcard is excluded; wildcard-reachable states are the
    /// choice resolver's concern.
    pub fn reachable_states(&self) -> Vec<&State> {
        self.definition
            .as_ref()
            .and_then(|def| def.entry(&self.state))
            .map(|entry| entry.targets().filter(|t| !t.is_any()).collect())
            .unwrap_or_default()
    }

    /// Merge one key/value pair into the data, returning a new instance.
    pub fn set_data(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut next = self.clone();
        next.data.insert(key.into(), value.into());
        next
    }

    /// Merge several key/value pairs into the data.
    pub fn merge_data(&self, pairs: impl IntoIterator<Item = (String, Value)>) -> Self {
        let mut next = self.clone();
        for (key, value) in pairs {
            next.data.insert(key, value);
        }
        next
    }

    /// Replace `data[key]` with `f(current)`. A missing key presents as
    /// `Value::Null`.
    pub fn update_data<F>(&self, key: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(&Value) -> Value,
    {
        let key = key.into();
        let current = self.data.get(&key).cloned().unwrap_or(Value::Null);
        let mut next = self.clone();
        next.data.insert(key, f(&current));
        next
    }

    /// Drop the named keys from the data.
    pub fn remove_keys<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut next = self.clone();
        for key in keys {
            next.data.remove(key.as_ref());
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{transitions, validators};
    use serde_json::json;

    fn definition() -> Arc<Definition> {
        Definition::build(
            transitions![["idle", "running"], ["running", "done"]],
            validators![],
        )
        .unwrap()
    }

    #[test]
    fn create_starts_not_alive_with_empty_data() {
        let instance = Instance::create(definition(), "idle");

        assert_eq!(instance.state(), &State::new("idle"));
        assert!(!instance.is_alive());
        assert!(instance.data().is_empty());
        assert!(instance.pending_choice().is_none());
        assert!(instance.last_completed().is_none());
        assert!(instance.log().is_empty());
    }

    #[test]
    fn with_data_seeds_initial_data() {
        let mut data = Data::new();
        data.insert("ready".to_string(), json!(false));

        let instance = Instance::create(definition(), "idle").with_data(data);
        assert_eq!(instance.get("ready"), Some(&json!(false)));
    }

    #[test]
    fn set_data_returns_a_new_snapshot() {
        let instance = Instance::create(definition(), "idle");
        let updated = instance.set_data("count", json!(3));

        assert!(instance.get("count").is_none());
        assert_eq!(updated.get("count"), Some(&json!(3)));
        assert_eq!(updated.state(), instance.state());
    }

    #[test]
    fn merge_data_inserts_every_pair() {
        let instance = Instance::create(definition(), "idle").merge_data([
            ("a".to_string(), json!(1)),
            ("b".to_string(), json!(2)),
        ]);

        assert_eq!(instance.get("a"), Some(&json!(1)));
        assert_eq!(instance.get("b"), Some(&json!(2)));
    }

    #[test]
    fn update_data_replaces_with_fn_result() {
        let instance = Instance::create(definition(), "idle").set_data("count", json!(2));
        let updated = instance.update_data("count", |v| json!(v.as_i64().unwrap_or(0) * 10));

        assert_eq!(updated.get("count"), Some(&json!(20)));
        assert_eq!(instance.get("count"), Some(&json!(2)));
    }

    #[test]
    fn update_data_presents_missing_keys_as_null() {
        let instance = Instance::create(definition(), "idle");
        let updated = instance.update_data("missing", |v| {
            assert!(v.is_null());
            json!("filled")
        });

        assert_eq!(updated.get("missing"), Some(&json!("filled")));
    }

    #[test]
    fn remove_keys_drops_named_keys() {
        let instance = Instance::create(definition(), "idle")
            .set_data("a", json!(1))
            .set_data("b", json!(2))
            .set_data("c", json!(3));

        let trimmed = instance.remove_keys(["a", "c"]);
        assert!(trimmed.get("a").is_none());
        assert_eq!(trimmed.get("b"), Some(&json!(2)));
        assert!(trimmed.get("c").is_none());
        assert_eq!(instance.data().len(), 3);
    }

    #[test]
    fn reachable_states_lists_direct_targets() {
        let instance = Instance::create(definition(), "idle");
        let reachable: Vec<_> = instance
            .reachable_states()
            .into_iter()
            .map(State::as_str)
            .collect();

        assert_eq!(reachable, ["running"]);
    }

    #[test]
    fn reachable_states_is_empty_for_terminal_states() {
        let instance = Instance::create(definition(), "done");
        assert!(instance.reachable_states().is_empty());
    }

    #[test]
    fn instances_sharing_a_definition_share_it_by_reference() {
        let def = definition();
        let a = Instance::create(def.clone(), "idle");
        let b = Instance::create(def.clone(), "running");

        assert!(Arc::ptr_eq(a.definition().unwrap(), b.definition().unwrap()));
    }

    #[test]
    fn bind_replaces_the_definition_reference() {
        let first = definition();
        let second = definition();
        let instance = Instance::create(first, "idle");
        let rebound = instance.bind(second.clone());

        assert!(Arc::ptr_eq(rebound.definition().unwrap(), &second));
    }
}

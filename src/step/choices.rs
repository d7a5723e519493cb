//! Choice resolution for autonomous stepping.

use crate::core::State;
use crate::instance::Instance;

impl Instance {
    /// The ordered, de-duplicated states reachable from the current state.
    ///
    /// Direct targets come first, in registration order, followed by
    /// wildcard-reachable targets not already present. The wildcard itself
    /// is never a choice. When the step policy carries a preference list
    /// for the current state, that list is returned instead, filtered to
    /// members of the resolved union and kept in preference order.
    ///
    /// An unbound instance resolves to no choices.
    pub fn choices(&self) -> Vec<State> {
        let Some(def) = self.definition.as_ref() else {
            return Vec::new();
        };

        let mut resolved: Vec<State> = Vec::new();
        if let Some(entry) = def.entry(&self.state) {
            for target in entry.targets() {
                if !target.is_any() && !resolved.contains(target) {
                    resolved.push(target.clone());
                }
            }
        }
        if let Some(wildcard) = def.entry(&State::any()) {
            for target in wildcard.targets() {
                if !target.is_any() && !resolved.contains(target) {
                    resolved.push(target.clone());
                }
            }
        }

        if let Some(preferred) = self.step_policy.as_ref().and_then(|p| p.get(&self.state)) {
            return preferred
                .iter()
                .filter(|s| resolved.contains(*s))
                .cloned()
                .collect();
        }

        resolved
    }
}

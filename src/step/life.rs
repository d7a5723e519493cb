//! Life, death, and autonomous stepping.
//!
//! An instance given life advances itself: each `act` call resolves the
//! choices reachable from the current state, picks a target under the
//! stepping mode, and drives the transition engine. A validator-rejected
//! step parks the target as pending; the next `act` call can attempt it
//! again once external conditions change. There is no built-in backoff or
//! retry bound; the caller owns the loop.

use crate::core::State;
use crate::instance::Instance;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::transition::TransitionError;

/// Per-state ordered preference lists constraining autonomous choices.
pub type StepPolicy = HashMap<State, Vec<State>>;

/// Rule used to pick the next target among resolved choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepMode {
    /// Walk the choice list in order, wrapping after the last entry.
    Sequential,
    /// Pick uniformly at random.
    Random,
    /// Re-attempt the pending target, or the first choice.
    FixedRepeat,
}

/// What a single autonomous step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The move was admitted; the instance now sits in the target state.
    Completed { to: State },
    /// The validator rejected the move; the target is held for retry.
    Pending { target: State },
}

/// Errors fatal to an `act` call.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("instance is not alive")]
    NotAlive,

    #[error("no reachable choices from state '{from}'")]
    NoChoices { from: String },

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl Instance {
    /// Make the instance eligible for autonomous stepping, installing an
    /// optional step policy and clearing prior stepping bookkeeping.
    pub fn give_life(&self, policy: Option<StepPolicy>) -> Self {
        let mut next = self.clone();
        next.alive = true;
        next.step_policy = policy;
        next.pending_choice = None;
        next.last_completed = None;
        next.attempts = 0;
        tracing::trace!(state = %next.state, "instance given life");
        next
    }

    /// Withdraw eligibility for autonomous stepping. Manual moves and data
    /// operations remain available.
    pub fn kill(&self) -> Self {
        let mut next = self.clone();
        next.alive = false;
        tracing::trace!(state = %next.state, "instance killed");
        next
    }

    /// Perform one autonomous step under `mode`.
    ///
    /// Picks a target among [`choices`](Instance::choices) and drives
    /// [`move_to`](Instance::move_to). A validator rejection is not an
    /// error: the step parks as [`StepOutcome::Pending`] and the same
    /// target is referenced on the next call.
    pub fn act(&self, mode: StepMode) -> Result<(Instance, StepOutcome), StepError> {
        if !self.alive {
            return Err(StepError::NotAlive);
        }
        if self.definition.is_none() {
            return Err(TransitionError::NoDefinition.into());
        }
        let choices = self.choices();
        if choices.is_empty() {
            return Err(StepError::NoChoices {
                from: self.state.to_string(),
            });
        }

        let index = match mode {
            StepMode::Sequential => {
                let reference = self.pending_choice.as_ref().or(self.last_completed.as_ref());
                let at = reference
                    .and_then(|r| choices.iter().position(|c| c == r))
                    .map(|i| i as i64)
                    .unwrap_or(-1);
                ((at + 1) as usize) % choices.len()
            }
            StepMode::Random => rand::thread_rng().gen_range(0..choices.len()),
            StepMode::FixedRepeat => self
                .pending_choice
                .as_ref()
                .and_then(|p| choices.iter().position(|c| c == p))
                .unwrap_or(0),
        };

        let target = choices[index].clone();
        let moved = self.move_to(target.clone())?;
        if moved.state == target {
            let mut next = moved;
            next.pending_choice = None;
            next.last_completed = Some(target.clone());
            tracing::debug!(to = %target, "autonomous step completed");
            Ok((next, StepOutcome::Completed { to: target }))
        } else {
            let mut next = moved;
            next.pending_choice = Some(target.clone());
            next.attempts += 1;
            tracing::debug!(target = %target, "autonomous step pending");
            Ok((next, StepOutcome::Pending { target }))
        }
    }
}

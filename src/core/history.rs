//! Transition log tracking.
//!
//! Immutable record of the transitions an instance has completed.
//! `record` returns a new log, leaving the original untouched.

use crate::core::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being transitioned from
    pub from: State,
    /// The state being transitioned to
    pub to: State,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
    /// Attempt number that completed the move (> 1 after pending retries)
    pub attempt: usize,
}

/// Ordered log of completed transitions.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use volition::{State, TransitionLog, TransitionRecord};
///
/// let log = TransitionLog::new();
/// let log = log.record(TransitionRecord {
///     from: State::new("idle"),
///     to: State::new("running"),
///     timestamp: Utc::now(),
///     attempt: 1,
/// });
///
/// assert_eq!(log.len(), 1);
/// assert_eq!(log.path().len(), 2); // idle -> running
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, returning a new log. The original is unchanged.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// The path of states traversed: the first `from`, then every `to`.
    pub fn path(&self) -> Vec<&State> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Wall-clock span from the first to the last recorded transition.
    /// `None` when the log is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All records in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether anything has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

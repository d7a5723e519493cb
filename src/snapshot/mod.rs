//! Snapshot and restore for machine instances.
//!
//! A [`Snapshot`] captures everything serializable about an instance:
//! state, data, life flag, stepping bookkeeping, and the transition log.
//! Transforms and validators live in the definition and are never
//! serialized, so a restored instance is unbound — `move_to` and `act`
//! fail with `NoDefinition` until a definition is attached again via
//! [`Snapshot::restore_with`] or [`Instance::bind`].

use crate::core::{Data, Definition, State, TransitionLog};
use crate::instance::Instance;
use crate::step::StepPolicy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable capture of a machine instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Identifier of the captured instance
    pub instance_id: Uuid,

    /// State at capture time
    pub state: State,

    /// Data at capture time
    pub data: Data,

    /// Whether the instance was eligible for autonomous stepping
    pub alive: bool,

    /// Installed step policy, if any
    pub step_policy: Option<StepPolicy>,

    /// Pending autonomous target, if a step was parked
    pub pending_choice: Option<State>,

    /// Last autonomously completed target
    pub last_completed: Option<State>,

    /// Rejected tries since the last completed move
    pub attempts: usize,

    /// Completed-transition log
    pub log: TransitionLog,

    /// When the captured instance was created
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    /// Capture an instance.
    pub fn capture(instance: &Instance) -> Self {
        Snapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            instance_id: instance.id,
            state: instance.state.clone(),
            data: instance.data.clone(),
            alive: instance.alive,
            step_policy: instance.step_policy.clone(),
            pending_choice: instance.pending_choice.clone(),
            last_completed: instance.last_completed.clone(),
            attempts: instance.attempts,
            log: instance.log.clone(),
            created_at: instance.created_at,
        }
    }

    /// Rebuild the instance without a definition. The result answers
    /// projections normally but cannot move or act until bound.
    pub fn restore(&self) -> Instance {
        Instance {
            id: self.instance_id,
            state: self.state.clone(),
            data: self.data.clone(),
            definition: None,
            alive: self.alive,
            step_policy: self.step_policy.clone(),
            pending_choice: self.pending_choice.clone(),
            last_completed: self.last_completed.clone(),
            attempts: self.attempts,
            log: self.log.clone(),
            created_at: self.created_at,
        }
    }

    /// Rebuild the instance and bind it to a definition.
    pub fn restore_with(&self, definition: Arc<Definition>) -> Instance {
        self.restore().bind(definition)
    }

    /// Encode as JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        serde_json::to_vec(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON bytes, checking the format version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_slice(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }
}

//! Checkpoint and restore functionality for state machine contexts.
//!
//! A checkpoint is a settled-only snapshot of a context: the current state
//! plus format metadata. Process-local bookkeeping (the debug gate and
//! sink, the previous state, the suspended-state stack, the in-progress
//! transition name) is not part of the snapshot; a context can only be
//! captured while settled.

use crate::core::{CurrentState, FsmContext, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a settled context.
///
/// # Example
///
/// ```rust
/// use statemap::checkpoint::Checkpoint;
/// use statemap::core::FsmContext;
/// use statemap::state_enum;
///
/// state_enum! {
///     enum JobState {
///         Queued,
///         Running,
///     }
/// }
///
/// let mut fsm: FsmContext<JobState> = FsmContext::new();
/// fsm.set_state(JobState::Running);
///
/// let checkpoint = Checkpoint::capture(&fsm).unwrap();
/// let json = checkpoint.to_json().unwrap();
///
/// let restored = Checkpoint::<JobState>::from_json(&json).unwrap().restore();
/// assert_eq!(restored.state().unwrap(), &JobState::Running);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// The state the machine was settled in
    pub state: S,
}

impl<S: State> Checkpoint<S> {
    /// Capture a snapshot of a settled context.
    ///
    /// Fails with [`CheckpointError::InTransition`] if the context has no
    /// current state; a machine must finish its transition before it can
    /// be checkpointed.
    pub fn capture(context: &FsmContext<S>) -> Result<Self, CheckpointError> {
        match context.current() {
            CurrentState::Settled(state) => Ok(Self {
                version: CHECKPOINT_VERSION,
                id: Uuid::new_v4(),
                timestamp: Utc::now(),
                state: state.clone(),
            }),
            CurrentState::InTransition => Err(CheckpointError::InTransition),
        }
    }

    /// Rebuild a context settled in the checkpointed state.
    ///
    /// Restored contexts start with an empty state stack, no previous
    /// state, and tracing off.
    pub fn restore(&self) -> FsmContext<S> {
        let mut context = FsmContext::new();
        context.set_state(self.state.clone());
        context
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON, validating the format version.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate_version()
    }

    /// Encode as a compact binary blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from a binary blob, validating the format version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate_version()
    }

    fn validate_version(self) -> Result<Self, CheckpointError> {
        if self.version == CHECKPOINT_VERSION {
            Ok(self)
        } else {
            Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            })
        }
    }
}

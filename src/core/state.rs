//! Core State trait for state machine states.
//!
//! Application states are opaque to the runtime: the context stores them,
//! hands them back, and reads their names for trace output. It never
//! constructs one, never inspects one beyond its name, and never decides
//! which one comes next.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// States are immutable values naming a position in a state machine.
/// A state-machine compiler emits one implementor per machine; the
/// [`state_enum!`](crate::state_enum) macro produces the same shape by
/// hand.
///
/// # Required Traits
///
/// - `Clone`: states move between the current slot, the previous-state
///   slot, and the suspended-state stack
/// - `PartialEq`: states must be comparable in transition logic and tests
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states must be serializable for
///   checkpointing
///
/// # Example
///
/// ```rust
/// use statemap::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum TaskState {
///     Pending,
///     Running,
///     Complete,
/// }
///
/// impl State for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///             Self::Complete => "Complete",
///         }
///     }
/// }
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's stable, human-readable name.
    ///
    /// The name identifies the state in trace output and error messages;
    /// it must not change between calls.
    fn name(&self) -> &str;
}

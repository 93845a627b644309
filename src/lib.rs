//! Statemap: runtime support for compiled state machines
//!
//! A state-machine compiler turns a transition table into application code;
//! this crate is the runtime that code leans on. The generated (or
//! hand-written) machine owns an [`FsmContext`] and drives it through a
//! small contract: settle on a state, clear it while a transition runs,
//! push and pop nested states, and optionally trace every move to a debug
//! sink. Which transition to take is entirely the caller's business: the
//! context tracks position, history, and the suspended-state stack,
//! nothing more.
//!
//! # Core Concepts
//!
//! - **State**: opaque named handles via the [`State`] trait
//! - **Context**: current-state tracking and push/pop nesting via [`FsmContext`]
//! - **Checkpoints**: settled-only snapshots via [`checkpoint::Checkpoint`]
//!
//! # Example
//!
//! ```rust
//! use statemap::core::{FsmContext, State};
//! use statemap::state_enum;
//!
//! state_enum! {
//!     enum DoorState {
//!         Open,
//!         Closed,
//!     }
//! }
//!
//! let mut fsm: FsmContext<DoorState> = FsmContext::new();
//! fsm.set_state(DoorState::Closed);
//!
//! // One transition, driven the way generated code drives it.
//! fsm.set_transition("open");
//! fsm.clear_state();
//! assert!(fsm.in_transition());
//! fsm.set_state(DoorState::Open);
//! fsm.set_transition("");
//!
//! assert_eq!(fsm.state().unwrap(), &DoorState::Open);
//! assert_eq!(fsm.previous_state().unwrap(), &DoorState::Closed);
//! ```

pub mod checkpoint;
pub mod core;
mod macros;

// Re-export commonly used types
pub use crate::core::{ContextError, CurrentState, DebugSink, FsmContext, State, WriterSink};

//! Core state-tracking types.
//!
//! This module contains the runtime core shared by every compiled state
//! machine:
//! - State identity via the `State` trait
//! - Current-state tracking, previous-state history, and the push/pop
//!   stack via `FsmContext`
//! - Line-oriented debug trace sinks
//!
//! Everything here is synchronous and in-memory; the only side effect is
//! optional trace output through a caller-supplied sink.

mod context;
mod error;
mod sink;
mod state;

pub use context::{CurrentState, FsmContext};
pub use error::ContextError;
pub use sink::{DebugSink, WriterSink};
pub use state::State;

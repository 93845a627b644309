//! Context error types.

use thiserror::Error;

/// Errors raised when the context's preconditions are violated.
///
/// Every variant is a caller error rather than a transient failure: the
/// context is in-memory and synchronous, so nothing here is retryable.
/// Applications typically treat these as bugs in generated transition
/// code or in their own dispatch logic.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// Current state read while the machine is in transition.
    #[error("current state is undefined while a transition is in progress")]
    StateUndefined,

    /// Previous state queried before any transition recorded one.
    #[error("previous state not set")]
    StateNotSet,

    /// Pop attempted when no state is suspended.
    #[error("popping an empty state stack")]
    EmptyStack,

    /// No transition with this name is defined in the current state.
    ///
    /// Raised by generated default handlers when dispatch falls through;
    /// the context itself never produces it.
    #[error("undefined transition (state: {state}, transition: {transition})")]
    TransitionUndefined {
        /// Name of the state that received the transition.
        state: String,
        /// Name of the transition that no handler matched.
        transition: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_identify_the_failed_operation() {
        assert_eq!(
            ContextError::StateNotSet.to_string(),
            "previous state not set"
        );
        assert_eq!(
            ContextError::EmptyStack.to_string(),
            "popping an empty state stack"
        );
    }

    #[test]
    fn undefined_transition_names_state_and_transition() {
        let error = ContextError::TransitionUndefined {
            state: "Idle".to_owned(),
            transition: "frob".to_owned(),
        };
        assert_eq!(
            error.to_string(),
            "undefined transition (state: Idle, transition: frob)"
        );
    }
}

//! The FSM context: current-state tracking and nested state stacking.
//!
//! `FsmContext` is the runtime half of a compiled state machine. Generated
//! transition code drives it through a small mutator surface: settle on a
//! state, clear it while a transition runs, suspend it for a nested push
//! transition, resume it with a pop. The context never validates which
//! transition is taken; that is entirely the caller's logic.

use super::error::ContextError;
use super::sink::DebugSink;
use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;

/// The context's view of where the machine is.
///
/// A machine is either settled in a state or between states while a
/// transition executes. Matching on this enum is the explicit form of
/// the "is there a current state" question.
///
/// # Example
///
/// ```rust
/// use statemap::core::{CurrentState, FsmContext};
/// use statemap::state_enum;
///
/// state_enum! {
///     enum Phase {
///         Ready,
///     }
/// }
///
/// let mut fsm: FsmContext<Phase> = FsmContext::new();
/// assert!(matches!(fsm.current(), CurrentState::InTransition));
///
/// fsm.set_state(Phase::Ready);
/// assert!(matches!(fsm.current(), CurrentState::Settled(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum CurrentState<S: State> {
    /// The machine is resting in a state.
    Settled(S),
    /// The machine is between states while a transition executes.
    InTransition,
}

impl<S: State> CurrentState<S> {
    /// The settled state, if any.
    pub fn settled(&self) -> Option<&S> {
        match self {
            Self::Settled(state) => Some(state),
            Self::InTransition => None,
        }
    }
}

/// Runtime context owned by one state machine instance.
///
/// Tracks the current state, the state a transition most recently left,
/// the stack of states suspended by push transitions, and the name of
/// the transition in progress. Optionally traces every state change to
/// a caller-supplied [`DebugSink`].
///
/// A new context starts in transition: there is no state until the
/// machine explicitly sets its initial one.
///
/// # Example
///
/// ```rust
/// use statemap::core::FsmContext;
/// use statemap::state_enum;
///
/// state_enum! {
///     enum Mode {
///         Normal,
///         Menu,
///     }
/// }
///
/// let mut fsm: FsmContext<Mode> = FsmContext::new();
/// fsm.set_state(Mode::Normal);
///
/// // A push transition suspends Normal and settles on Menu.
/// fsm.push_state(Mode::Menu);
/// assert_eq!(fsm.state_stack_depth(), 1);
///
/// // Popping resumes the suspended state.
/// fsm.pop_state().unwrap();
/// assert_eq!(fsm.state().unwrap(), &Mode::Normal);
/// ```
pub struct FsmContext<S: State> {
    state: CurrentState<S>,
    previous_state: Option<S>,
    transition: String,
    state_stack: Vec<S>,
    debug_enabled: bool,
    debug_sink: Option<Box<dyn DebugSink>>,
}

impl<S: State> Default for FsmContext<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> FsmContext<S> {
    /// Create a context with no current state.
    ///
    /// There is no state until the machine explicitly sets the initial
    /// state, so a fresh context reports [`in_transition`](Self::in_transition).
    pub fn new() -> Self {
        Self {
            state: CurrentState::InTransition,
            previous_state: None,
            transition: String::new(),
            state_stack: Vec::new(),
            debug_enabled: false,
            debug_sink: None,
        }
    }

    /// The current state, or [`ContextError::StateUndefined`] while the
    /// machine is in transition.
    ///
    /// Transition code issued from within a transition action sees the
    /// undefined condition; that is a bug in the caller, not a state the
    /// context can recover from.
    pub fn state(&self) -> Result<&S, ContextError> {
        self.state.settled().ok_or(ContextError::StateUndefined)
    }

    /// The current position as a tagged variant, for pattern matching.
    pub fn current(&self) -> &CurrentState<S> {
        &self.state
    }

    /// Is this machine between states?
    ///
    /// True from [`clear_state`](Self::clear_state) until the next
    /// [`set_state`](Self::set_state) or [`push_state`](Self::push_state),
    /// and on a fresh context before the initial state is set.
    pub fn in_transition(&self) -> bool {
        matches!(self.state, CurrentState::InTransition)
    }

    /// Unconditionally settle on `state`.
    ///
    /// No validation is performed; whether the transition is legal is
    /// decided by the code that chose it.
    pub fn set_state(&mut self, state: S) {
        self.trace(|| format!("NEW STATE    : {}", state.name()));
        self.state = CurrentState::Settled(state);
    }

    /// Leave the current state, marking the machine as in transition.
    ///
    /// The state being left is remembered and readable through
    /// [`previous_state`](Self::previous_state) until the next clear.
    pub fn clear_state(&mut self) {
        self.previous_state = match mem::replace(&mut self.state, CurrentState::InTransition) {
            CurrentState::Settled(state) => Some(state),
            CurrentState::InTransition => None,
        };
    }

    /// The state the most recent [`clear_state`](Self::clear_state) left.
    ///
    /// Fails with [`ContextError::StateNotSet`] if no clear has ever
    /// recorded one: querying history before any transition occurred is
    /// a caller error.
    pub fn previous_state(&self) -> Result<&S, ContextError> {
        self.previous_state
            .as_ref()
            .ok_or(ContextError::StateNotSet)
    }

    /// Settle on `state`, suspending the current state if there is one.
    ///
    /// With a settled current state, that state goes onto the stack for a
    /// later [`pop_state`](Self::pop_state). Mid-transition there is
    /// nothing to suspend and `state` simply becomes current; the stack is
    /// untouched. This operation never fails.
    pub fn push_state(&mut self, state: S) {
        self.trace(|| format!("PUSH TO STATE: {}", state.name()));
        if let CurrentState::Settled(suspended) =
            mem::replace(&mut self.state, CurrentState::Settled(state))
        {
            self.state_stack.push(suspended);
        }
    }

    /// Resume the most recently suspended state.
    ///
    /// Strict LIFO: the state restored is exactly the one that was
    /// current at the latest [`push_state`](Self::push_state) whose
    /// suspension has not yet been resumed. Fails with
    /// [`ContextError::EmptyStack`] when nothing is suspended.
    pub fn pop_state(&mut self) -> Result<(), ContextError> {
        let Some(state) = self.state_stack.pop() else {
            self.trace(|| "POPPING ON EMPTY STATE STACK.".to_owned());
            return Err(ContextError::EmptyStack);
        };
        self.trace(|| format!("POP TO STATE : {}", state.name()));
        self.state = CurrentState::Settled(state);
        Ok(())
    }

    /// Discard all suspended states.
    ///
    /// The current state is untouched. Used to reset push/pop bookkeeping
    /// outside the normal protocol, typically on machine reset.
    pub fn empty_state_stack(&mut self) {
        self.state_stack.clear();
    }

    /// Number of states currently suspended on the stack.
    pub fn state_stack_depth(&self) -> usize {
        self.state_stack.len()
    }

    /// Name of the transition in progress, or `""` when idle.
    pub fn transition(&self) -> &str {
        &self.transition
    }

    /// Record the name of the transition being processed.
    ///
    /// Transition-dispatch code sets this on entry and resets it to `""`
    /// on completion; the context only stores the slot.
    pub fn set_transition(&mut self, name: impl Into<String>) {
        self.transition = name.into();
    }

    /// Is debug tracing enabled?
    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    /// Enable or disable debug tracing.
    ///
    /// Output is only emitted when tracing is enabled and a sink is set.
    pub fn set_debug_enabled(&mut self, enabled: bool) {
        self.debug_enabled = enabled;
    }

    /// The debug sink, if one is set.
    ///
    /// Transition-dispatch code may write its own lines through this, in
    /// addition to the context's state-change traces.
    pub fn debug_sink_mut(&mut self) -> Option<&mut (dyn DebugSink + 'static)> {
        self.debug_sink.as_deref_mut()
    }

    /// Set the destination for debug trace lines.
    pub fn set_debug_sink(&mut self, sink: impl DebugSink + 'static) {
        self.debug_sink = Some(Box::new(sink));
    }

    /// Remove the debug sink, silencing trace output.
    pub fn clear_debug_sink(&mut self) {
        self.debug_sink = None;
    }

    fn trace(&mut self, line: impl FnOnce() -> String) {
        if self.debug_enabled {
            if let Some(sink) = self.debug_sink.as_deref_mut() {
                sink.line(&line());
            }
        }
    }
}

impl<S: State> fmt::Debug for FsmContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsmContext")
            .field("state", &self.state)
            .field("previous_state", &self.previous_state)
            .field("transition", &self.transition)
            .field("state_stack", &self.state_stack)
            .field("debug_enabled", &self.debug_enabled)
            .field("debug_sink", &self.debug_sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Active,
        Suspended,
        Done,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Active => "Active",
                Self::Suspended => "Suspended",
                Self::Done => "Done",
            }
        }
    }

    #[derive(Clone, Default)]
    struct CaptureSink {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl CaptureSink {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl DebugSink for CaptureSink {
        fn line(&mut self, line: &str) {
            self.lines.lock().unwrap().push(line.to_owned());
        }
    }

    #[test]
    fn new_context_is_in_transition() {
        let fsm: FsmContext<TestState> = FsmContext::new();
        assert!(fsm.in_transition());
        assert!(matches!(fsm.current(), CurrentState::InTransition));
        assert_eq!(fsm.state(), Err(ContextError::StateUndefined));
    }

    #[test]
    fn previous_state_before_any_clear_is_error() {
        let fsm: FsmContext<TestState> = FsmContext::new();
        assert_eq!(fsm.previous_state(), Err(ContextError::StateNotSet));
    }

    #[test]
    fn set_state_settles_the_machine() {
        let mut fsm = FsmContext::new();
        fsm.set_state(TestState::Idle);

        assert!(!fsm.in_transition());
        assert_eq!(fsm.state().unwrap(), &TestState::Idle);
    }

    #[test]
    fn set_state_tracks_most_recent() {
        let mut fsm = FsmContext::new();
        fsm.set_state(TestState::Idle);
        fsm.set_state(TestState::Active);
        fsm.set_state(TestState::Done);

        assert_eq!(fsm.state().unwrap(), &TestState::Done);
    }

    #[test]
    fn clear_state_records_previous_state() {
        let mut fsm = FsmContext::new();
        fsm.set_state(TestState::Active);
        fsm.clear_state();

        assert!(fsm.in_transition());
        assert_eq!(fsm.previous_state().unwrap(), &TestState::Active);
    }

    #[test]
    fn clear_state_while_in_transition_forgets_previous() {
        let mut fsm = FsmContext::new();
        fsm.set_state(TestState::Active);
        fsm.clear_state();
        fsm.clear_state();

        assert_eq!(fsm.previous_state(), Err(ContextError::StateNotSet));
    }

    #[test]
    fn push_then_pop_resumes_in_lifo_order() {
        let mut fsm = FsmContext::new();
        fsm.set_state(TestState::Idle);
        fsm.push_state(TestState::Active);
        fsm.push_state(TestState::Suspended);

        fsm.pop_state().unwrap();
        assert_eq!(fsm.state().unwrap(), &TestState::Active);

        fsm.pop_state().unwrap();
        assert_eq!(fsm.state().unwrap(), &TestState::Idle);

        assert_eq!(fsm.pop_state(), Err(ContextError::EmptyStack));
    }

    #[test]
    fn pop_on_empty_stack_is_error() {
        let mut fsm = FsmContext::new();
        fsm.set_state(TestState::Idle);

        assert_eq!(fsm.pop_state(), Err(ContextError::EmptyStack));
        // The current state survives the failed pop.
        assert_eq!(fsm.state().unwrap(), &TestState::Idle);
    }

    #[test]
    fn push_without_current_state_leaves_stack_untouched() {
        let mut fsm = FsmContext::new();
        fsm.push_state(TestState::Active);

        assert_eq!(fsm.state_stack_depth(), 0);
        assert_eq!(fsm.state().unwrap(), &TestState::Active);
    }

    #[test]
    fn empty_state_stack_discards_suspended_states() {
        let mut fsm = FsmContext::new();
        fsm.set_state(TestState::Idle);
        fsm.push_state(TestState::Active);
        fsm.push_state(TestState::Suspended);

        fsm.empty_state_stack();

        assert_eq!(fsm.state_stack_depth(), 0);
        assert_eq!(fsm.state().unwrap(), &TestState::Suspended);
        assert_eq!(fsm.pop_state(), Err(ContextError::EmptyStack));
    }

    #[test]
    fn interleaved_clear_and_push() {
        let mut fsm = FsmContext::new();
        fsm.set_state(TestState::Idle);
        fsm.clear_state();
        fsm.push_state(TestState::Active);

        assert!(!fsm.in_transition());
        assert_eq!(fsm.state().unwrap(), &TestState::Active);
        assert_eq!(fsm.previous_state().unwrap(), &TestState::Idle);
        assert_eq!(fsm.state_stack_depth(), 0);
    }

    #[test]
    fn transition_name_defaults_to_empty() {
        let fsm: FsmContext<TestState> = FsmContext::new();
        assert_eq!(fsm.transition(), "");
    }

    #[test]
    fn set_transition_round_trips() {
        let mut fsm: FsmContext<TestState> = FsmContext::new();
        fsm.set_transition("open");
        assert_eq!(fsm.transition(), "open");

        fsm.set_transition("");
        assert_eq!(fsm.transition(), "");
    }

    #[test]
    fn debug_lines_emitted_when_enabled_with_sink() {
        let sink = CaptureSink::default();
        let mut fsm = FsmContext::new();
        fsm.set_debug_enabled(true);
        fsm.set_debug_sink(sink.clone());

        fsm.set_state(TestState::Idle);
        fsm.push_state(TestState::Active);
        fsm.pop_state().unwrap();

        let lines = sink.lines();
        assert_eq!(
            lines,
            vec![
                "NEW STATE    : Idle",
                "PUSH TO STATE: Active",
                "POP TO STATE : Idle",
            ]
        );
    }

    #[test]
    fn failed_pop_traces_the_empty_stack() {
        let sink = CaptureSink::default();
        let mut fsm: FsmContext<TestState> = FsmContext::new();
        fsm.set_debug_enabled(true);
        fsm.set_debug_sink(sink.clone());

        assert_eq!(fsm.pop_state(), Err(ContextError::EmptyStack));
        assert_eq!(sink.lines(), vec!["POPPING ON EMPTY STATE STACK."]);
    }

    #[test]
    fn no_debug_output_when_disabled() {
        let sink = CaptureSink::default();
        let mut fsm = FsmContext::new();
        fsm.set_debug_sink(sink.clone());

        fsm.set_state(TestState::Idle);
        fsm.push_state(TestState::Active);

        assert!(sink.lines().is_empty());
    }

    #[test]
    fn no_debug_output_without_sink() {
        let mut fsm = FsmContext::new();
        fsm.set_debug_enabled(true);

        // Nothing to observe; the point is that tracing without a sink
        // does not panic.
        fsm.set_state(TestState::Idle);
        fsm.push_state(TestState::Active);
        fsm.pop_state().unwrap();
    }

    #[test]
    fn disabling_debug_silences_further_output() {
        let sink = CaptureSink::default();
        let mut fsm = FsmContext::new();
        fsm.set_debug_enabled(true);
        fsm.set_debug_sink(sink.clone());

        fsm.set_state(TestState::Idle);
        fsm.set_debug_enabled(false);
        fsm.set_state(TestState::Active);

        assert_eq!(sink.lines(), vec!["NEW STATE    : Idle"]);
    }

    #[test]
    fn clearing_the_sink_silences_further_output() {
        let sink = CaptureSink::default();
        let mut fsm = FsmContext::new();
        fsm.set_debug_enabled(true);
        fsm.set_debug_sink(sink.clone());

        fsm.set_state(TestState::Idle);
        fsm.clear_debug_sink();
        fsm.set_state(TestState::Active);

        assert_eq!(sink.lines(), vec!["NEW STATE    : Idle"]);
    }

    #[test]
    fn debug_sink_mut_exposes_the_sink() {
        let sink = CaptureSink::default();
        let mut fsm: FsmContext<TestState> = FsmContext::new();
        assert!(fsm.debug_sink_mut().is_none());

        fsm.set_debug_sink(sink.clone());
        fsm.debug_sink_mut().unwrap().line("TRANSITION   : open");

        assert_eq!(sink.lines(), vec!["TRANSITION   : open"]);
    }

    #[test]
    fn push_preserves_previous_state() {
        let mut fsm = FsmContext::new();
        fsm.set_state(TestState::Idle);
        fsm.clear_state();
        fsm.set_state(TestState::Active);
        fsm.push_state(TestState::Suspended);

        // Push suspends states without touching transition history.
        assert_eq!(fsm.previous_state().unwrap(), &TestState::Idle);
    }

    #[test]
    fn debug_format_omits_the_sink() {
        let mut fsm = FsmContext::new();
        fsm.set_state(TestState::Idle);

        let rendered = format!("{fsm:?}");
        assert!(rendered.contains("Settled(Idle)"));
        assert!(rendered.contains("debug_sink: false"));
    }
}

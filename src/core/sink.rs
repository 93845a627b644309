//! Line-oriented debug trace sinks.
//!
//! A sink receives one complete text line per traced operation. No sink
//! set is the normal "no logging" configuration.

use std::io::Write;

/// Destination for debug trace lines.
///
/// Implement this for custom capture targets; for anything that already
/// speaks [`std::io::Write`], wrap it in a [`WriterSink`].
pub trait DebugSink: Send {
    /// Receive one complete line, without a trailing newline.
    fn line(&mut self, line: &str);
}

/// Adapter exposing any [`std::io::Write`] as a [`DebugSink`].
///
/// Each trace line is written with a trailing newline. Write errors are
/// ignored; a failing sink never fails the state machine.
///
/// # Example
///
/// ```rust
/// use statemap::core::{FsmContext, WriterSink};
/// use statemap::state_enum;
///
/// state_enum! {
///     enum Phase {
///         Ready,
///     }
/// }
///
/// let mut fsm: FsmContext<Phase> = FsmContext::new();
/// fsm.set_debug_enabled(true);
/// fsm.set_debug_sink(WriterSink::new(std::io::stderr()));
/// fsm.set_state(Phase::Ready); // traces "NEW STATE    : Ready"
/// ```
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> DebugSink for WriterSink<W> {
    fn line(&mut self, line: &str) {
        let _ = writeln!(self.writer, "{line}");
    }
}

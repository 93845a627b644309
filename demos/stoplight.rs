//! Stoplight State Machine
//!
//! The classic compiled-FSM example: a stoplight cycling through its
//! colors, driven exactly the way compiler-generated transition code
//! drives the runtime context.
//!
//! Key concepts:
//! - Settling on an initial state
//! - The clear/set protocol around each transition
//! - Debug tracing to a writer sink
//!
//! Run with: cargo run --example stoplight

use statemap::core::{FsmContext, State, WriterSink};
use statemap::state_enum;

state_enum! {
    enum Light {
        Red,
        Green,
        Yellow,
    }
}

struct Stoplight {
    context: FsmContext<Light>,
}

impl Stoplight {
    fn new() -> Self {
        let mut context = FsmContext::new();
        context.set_debug_enabled(true);
        context.set_debug_sink(WriterSink::new(std::io::stderr()));
        context.set_state(Light::Red);
        Self { context }
    }

    fn current(&self) -> &Light {
        self.context.state().expect("stoplight is settled")
    }

    // One transition, in the shape a state-machine compiler emits:
    // name the transition, clear the state, settle on the next one.
    fn timeout(&mut self) {
        let next = match self.current() {
            Light::Red => Light::Green,
            Light::Green => Light::Yellow,
            Light::Yellow => Light::Red,
        };

        self.context.set_transition("timeout");
        self.context.clear_state();
        self.context.set_state(next);
        self.context.set_transition("");
    }
}

fn main() {
    println!("=== Stoplight State Machine ===\n");

    let mut stoplight = Stoplight::new();
    println!("Initial state: {}\n", stoplight.current().name());

    for _ in 0..6 {
        let before = stoplight.current().name().to_owned();
        stoplight.timeout();
        println!("timeout: {} -> {}", before, stoplight.current().name());
    }

    println!("\nTrace lines on stderr show the context's view of each move.");
    println!("\n=== Example Complete ===");
}

//! Menu Navigation with Push/Pop Transitions
//!
//! Nested states: entering a submenu suspends the current menu on the
//! state stack; leaving resumes whatever was suspended most recently.
//!
//! Key concepts:
//! - Push transitions suspending the enclosing state
//! - Pop transitions resuming it in LIFO order
//! - Resetting nested bookkeeping with empty_state_stack
//!
//! Run with: cargo run --example menu

use statemap::core::{FsmContext, State};
use statemap::state_enum;

state_enum! {
    enum Screen {
        Main,
        Settings,
        Audio,
        Video,
    }
}

struct Menu {
    context: FsmContext<Screen>,
}

impl Menu {
    fn new() -> Self {
        let mut context = FsmContext::new();
        context.set_state(Screen::Main);
        Self { context }
    }

    fn current(&self) -> &Screen {
        self.context.state().expect("menu is settled")
    }

    fn enter(&mut self, screen: Screen) {
        println!(
            "enter {:>8}: {} suspended (depth {})",
            screen.name(),
            self.current().name(),
            self.context.state_stack_depth() + 1
        );
        self.context.push_state(screen);
    }

    fn back(&mut self) {
        match self.context.pop_state() {
            Ok(()) => println!(
                "back        : resumed {} (depth {})",
                self.current().name(),
                self.context.state_stack_depth()
            ),
            Err(error) => println!("back        : {error}"),
        }
    }

    fn home(&mut self) {
        self.context.empty_state_stack();
        self.context.set_transition("home");
        self.context.clear_state();
        self.context.set_state(Screen::Main);
        self.context.set_transition("");
        println!("home        : back to Main, stack emptied");
    }
}

fn main() {
    println!("=== Menu Navigation ===\n");

    let mut menu = Menu::new();
    println!("Starting on {}\n", menu.current().name());

    menu.enter(Screen::Settings);
    menu.enter(Screen::Audio);
    menu.back();
    menu.enter(Screen::Video);

    // Jump straight home: suspended screens are discarded, not resumed.
    menu.home();

    // Nothing suspended anymore, so going back reports the empty stack.
    menu.back();

    println!("\n=== Example Complete ===");
}

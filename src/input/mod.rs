pub mod handler;
pub mod held;

pub use handler::{Control, InputHandler, KeyAction};
pub use held::{DEFAULT_HOLD_WINDOW, HeldKeys};

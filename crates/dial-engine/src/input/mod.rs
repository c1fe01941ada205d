//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events into `InputEvent`s through
//! `platform::winit`.

mod frame;
mod state;
mod types;

pub(crate) mod platform {
    pub(crate) mod winit;
}

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, PointerMoveEvent};

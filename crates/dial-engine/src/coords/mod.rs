//! Screen-space helpers.
//!
//! Screen space is logical pixels, origin top-left, +X right, +Y down. World
//! space (see `scene`) is right-handed with +Y up.

mod viewport;

pub use viewport::Viewport;

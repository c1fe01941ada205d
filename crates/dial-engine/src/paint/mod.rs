//! Colour model shared by the scene and the renderer.
//!
//! Colours are linear, premultiplied alpha.

pub mod color;

pub use color::Color;

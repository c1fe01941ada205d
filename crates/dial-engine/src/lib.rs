//! Dial engine crate.
//!
//! Platform + GPU runtime used by the dial: window loop, input, frame timing,
//! a small 3D scene graph with a perspective camera, and the mesh renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod camera;
pub mod scene;
pub mod render;

use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::input::{InputEvent, Key, KeyState, PointerMoveEvent};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub(crate) fn translate_window_event(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved(
            PointerMoveEvent {
                position: to_logical(window.scale_factor(), *position),
            },
        )),

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn to_logical(scale: f64, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(scale);
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(other) => Key::Unknown(other as u32),
        // NativeKeyCode is not a u32 in winit 0.30; keep "unknown" without a stable numeric.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_positions_become_logical() {
        let p = to_logical(2.0, PhysicalPosition::new(200.0, 100.0));
        assert_eq!(p, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn escape_is_mapped() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Unknown(_)));
    }
}

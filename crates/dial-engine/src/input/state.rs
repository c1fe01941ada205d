use std::collections::HashSet;

use glam::Vec2;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, PointerMoveEvent};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels. `None` while the pointer is outside.
    pub pointer_pos: Option<Vec2>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear held keys to avoid stuck keys.
                    self.keys_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { position }) => {
                self.pointer_pos = Some(*position);
                frame.pointer_moved = Some(*position);
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, repeat }
    }

    #[test]
    fn pointer_move_updates_state_and_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        for p in [Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0)] {
            state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { position: p }));
        }

        assert_eq!(state.pointer_pos, Some(Vec2::new(30.0, 40.0)));
        assert_eq!(frame.pointer_moved, Some(Vec2::new(30.0, 40.0)));
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn pointer_left_clears_position_only() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let p = Vec2::new(5.0, 5.0);

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { position: p }));
        state.apply_event(&mut frame, InputEvent::PointerLeft);

        assert_eq!(state.pointer_pos, None);
        assert_eq!(frame.pointer_moved, Some(p));
    }

    #[test]
    fn repeated_press_reports_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed, false));
        frame.clear();
        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed, true));

        assert!(state.key_down(Key::Escape));
        assert!(!frame.key_pressed(Key::Escape));
    }

    #[test]
    fn release_and_focus_loss() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Unknown(44), KeyState::Pressed, false));
        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed, false));
        state.apply_event(&mut frame, key(Key::Unknown(44), KeyState::Released, false));
        assert!(frame.keys_released.contains(&Key::Unknown(44)));

        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(state.keys_down.is_empty());
        assert!(!state.focused);
    }

    #[test]
    fn clear_resets_frame_deltas() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed, false));
        state.apply_event(
            &mut frame,
            InputEvent::PointerMoved(PointerMoveEvent { position: Vec2::ONE }),
        );
        frame.clear();

        assert!(frame.events.is_empty());
        assert!(frame.keys_pressed.is_empty());
        assert_eq!(frame.pointer_moved, None);
        assert!(state.key_down(Key::Escape));
    }
}

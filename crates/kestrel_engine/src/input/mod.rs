//! Input management system
//!
//! Converts continuously-queryable device state into frame-stable, edge-aware
//! signals. Two snapshots are kept: `current` and `previous`. The pair is
//! swapped exactly once per frame by [`Input::update`]; every query reads the
//! snapshots without side effects, so pressed/released edges fire exactly once
//! per transition.
//!
//! Raw device state arrives through the [`InputSource`] trait rather than
//! window-system callbacks. The engine's window implements it by polling GLFW;
//! tests implement it with scripted state. Keeping the source external means
//! no process-wide instance registry is needed to route callbacks, and the
//! design stays correct if multiple windows ever exist.

use crate::foundation::math::Vec2;
use thiserror::Error;

pub use glfw::{Key, MouseButton};

/// Number of tracked key slots, covering the full GLFW key code range.
const KEY_SLOT_COUNT: usize = 349; // GLFW_KEY_LAST + 1

/// Number of tracked mouse button slots.
const MOUSE_SLOT_COUNT: usize = 8; // GLFW_MOUSE_BUTTON_LAST + 1

/// Input query errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// A raw key or button code fell outside the tracked range
    ///
    /// This indicates a configuration bug in the caller (for example a
    /// remapping table producing bogus codes) and must not be masked by
    /// silently reporting the key as up.
    #[error("input code {0} is outside the tracked range")]
    OutOfRange(i32),
}

/// Source of raw device state polled once per frame
///
/// Implemented by [`crate::window::Window`] over GLFW and by scripted sources
/// in tests.
pub trait InputSource {
    /// Whether the given key is currently held down
    fn is_key_down(&self, key: Key) -> bool;

    /// Whether the given mouse button is currently held down
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;

    /// Current cursor position in window coordinates
    fn cursor_position(&self) -> Vec2;
}

/// One frame's worth of device state
#[derive(Clone)]
struct Snapshot {
    keys: [bool; KEY_SLOT_COUNT],
    mouse_buttons: [bool; MOUSE_SLOT_COUNT],
    cursor: Vec2,
}

impl Snapshot {
    fn all_up() -> Self {
        Self {
            keys: [false; KEY_SLOT_COUNT],
            mouse_buttons: [false; MOUSE_SLOT_COUNT],
            cursor: Vec2::zeros(),
        }
    }

    fn key(&self, code: i32) -> Result<bool, InputError> {
        usize::try_from(code)
            .ok()
            .and_then(|slot| self.keys.get(slot))
            .copied()
            .ok_or(InputError::OutOfRange(code))
    }

    fn mouse_button(&self, code: i32) -> Result<bool, InputError> {
        usize::try_from(code)
            .ok()
            .and_then(|slot| self.mouse_buttons.get(slot))
            .copied()
            .ok_or(InputError::OutOfRange(code))
    }
}

/// Double-buffered input state with per-frame edge detection
///
/// Before the first call to [`Input::update`] both snapshots hold identical
/// all-up state, so no spurious pressed/released edges are reported on the
/// first frame.
pub struct Input {
    current: Snapshot,
    previous: Snapshot,
    look_deadzone: f32,
}

impl Default for Input {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Input {
    /// Create input state with the given mouse-look deadzone
    ///
    /// Deltas with magnitude below `look_deadzone` are reported as zero by
    /// [`Input::look_delta`]. The raw delta from [`Input::mouse_delta`] is
    /// never filtered.
    #[must_use]
    pub fn new(look_deadzone: f32) -> Self {
        Self {
            current: Snapshot::all_up(),
            previous: Snapshot::all_up(),
            look_deadzone,
        }
    }

    /// Re-poll every tracked key, mouse button, and the cursor position
    ///
    /// Copies `current` into `previous` first, then fills `current` from the
    /// source. Must be called exactly once per frame, before any query for
    /// that frame; calling it more than once collapses edges.
    pub fn update<S: InputSource + ?Sized>(&mut self, source: &S) {
        self.previous = self.current.clone();

        for key in ALL_KEYS {
            // `as` is safe here: every listed key code is within the slot range
            self.current.keys[*key as usize] = source.is_key_down(*key);
        }
        for button in ALL_MOUSE_BUTTONS {
            self.current.mouse_buttons[*button as usize] = source.is_mouse_button_down(*button);
        }
        self.current.cursor = source.cursor_position();
    }

    /// Whether the key is down in the current frame
    #[must_use]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.checked(self.current.key(key as i32))
    }

    /// Whether the key transitioned up -> down this frame (rising edge)
    #[must_use]
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.is_key_down(key) && !self.checked(self.previous.key(key as i32))
    }

    /// Whether the key transitioned down -> up this frame (falling edge)
    #[must_use]
    pub fn is_key_released(&self, key: Key) -> bool {
        !self.is_key_down(key) && self.checked(self.previous.key(key as i32))
    }

    /// Whether the mouse button is down in the current frame
    #[must_use]
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.checked(self.current.mouse_button(button as i32))
    }

    /// Whether the mouse button transitioned up -> down this frame
    #[must_use]
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.is_mouse_button_down(button) && !self.checked(self.previous.mouse_button(button as i32))
    }

    /// Whether the mouse button transitioned down -> up this frame
    #[must_use]
    pub fn is_mouse_button_released(&self, button: MouseButton) -> bool {
        !self.is_mouse_button_down(button) && self.checked(self.previous.mouse_button(button as i32))
    }

    /// Query a raw key code, reporting out-of-range codes as an error
    pub fn key_state(&self, code: i32) -> Result<bool, InputError> {
        self.current.key(code)
    }

    /// Current cursor position in window coordinates
    #[must_use]
    pub fn mouse_position(&self) -> Vec2 {
        self.current.cursor
    }

    /// Cursor displacement since the previous frame
    ///
    /// This is a per-frame displacement, not a velocity; callers scale by
    /// elapsed time themselves.
    #[must_use]
    pub fn mouse_delta(&self) -> Vec2 {
        self.current.cursor - self.previous.cursor
    }

    /// Cursor displacement with the configured deadzone applied
    ///
    /// Deltas below the deadzone magnitude are reported as zero, filtering
    /// sensor jitter out of look controls.
    #[must_use]
    pub fn look_delta(&self) -> Vec2 {
        let delta = self.mouse_delta();
        if delta.norm() < self.look_deadzone {
            Vec2::zeros()
        } else {
            delta
        }
    }

    /// Unwrap a range-checked lookup for the enum-based query paths
    ///
    /// The key and button enums always map into the tracked range, so an error
    /// here is a programming bug: fail loudly in debug, report up in release.
    fn checked(&self, state: Result<bool, InputError>) -> bool {
        match state {
            Ok(down) => down,
            Err(err) => {
                debug_assert!(false, "{err}");
                log::warn!("{err}");
                false
            }
        }
    }
}

/// Every key tracked by [`Input::update`]
///
/// Covers the full GLFW key set so snapshots are complete regardless of which
/// keys an application binds.
const ALL_KEYS: &[Key] = &[
    Key::Space, Key::Apostrophe, Key::Comma, Key::Minus, Key::Period, Key::Slash,
    Key::Num0, Key::Num1, Key::Num2, Key::Num3, Key::Num4,
    Key::Num5, Key::Num6, Key::Num7, Key::Num8, Key::Num9,
    Key::Semicolon, Key::Equal,
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
    Key::LeftBracket, Key::Backslash, Key::RightBracket, Key::GraveAccent,
    Key::World1, Key::World2,
    Key::Escape, Key::Enter, Key::Tab, Key::Backspace, Key::Insert, Key::Delete,
    Key::Right, Key::Left, Key::Down, Key::Up,
    Key::PageUp, Key::PageDown, Key::Home, Key::End,
    Key::CapsLock, Key::ScrollLock, Key::NumLock, Key::PrintScreen, Key::Pause,
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6, Key::F7, Key::F8,
    Key::F9, Key::F10, Key::F11, Key::F12, Key::F13, Key::F14, Key::F15,
    Key::F16, Key::F17, Key::F18, Key::F19, Key::F20, Key::F21, Key::F22,
    Key::F23, Key::F24, Key::F25,
    Key::Kp0, Key::Kp1, Key::Kp2, Key::Kp3, Key::Kp4,
    Key::Kp5, Key::Kp6, Key::Kp7, Key::Kp8, Key::Kp9,
    Key::KpDecimal, Key::KpDivide, Key::KpMultiply, Key::KpSubtract,
    Key::KpAdd, Key::KpEnter, Key::KpEqual,
    Key::LeftShift, Key::LeftControl, Key::LeftAlt, Key::LeftSuper,
    Key::RightShift, Key::RightControl, Key::RightAlt, Key::RightSuper,
    Key::Menu,
];

/// Every mouse button tracked by [`Input::update`]
const ALL_MOUSE_BUTTONS: &[MouseButton] = &[
    MouseButton::Button1, MouseButton::Button2, MouseButton::Button3,
    MouseButton::Button4, MouseButton::Button5, MouseButton::Button6,
    MouseButton::Button7, MouseButton::Button8,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Scripted raw state for driving `Input` without a window
    #[derive(Default)]
    struct ScriptedSource {
        keys_down: HashSet<i32>,
        buttons_down: HashSet<i32>,
        cursor: Vec2,
    }

    impl ScriptedSource {
        fn press(&mut self, key: Key) {
            self.keys_down.insert(key as i32);
        }

        fn release(&mut self, key: Key) {
            self.keys_down.remove(&(key as i32));
        }
    }

    impl InputSource for ScriptedSource {
        fn is_key_down(&self, key: Key) -> bool {
            self.keys_down.contains(&(key as i32))
        }

        fn is_mouse_button_down(&self, button: MouseButton) -> bool {
            self.buttons_down.contains(&(button as i32))
        }

        fn cursor_position(&self) -> Vec2 {
            self.cursor
        }
    }

    #[test]
    fn test_no_edges_before_first_update() {
        let input = Input::default();
        assert!(!input.is_key_down(Key::W));
        assert!(!input.is_key_pressed(Key::W));
        assert!(!input.is_key_released(Key::W));
        assert!(!input.is_mouse_button_pressed(MouseButton::Button1));
    }

    #[test]
    fn test_key_edge_sequence() {
        // W down for frames 1-2, up at frame 3
        let mut source = ScriptedSource::default();
        let mut input = Input::default();

        source.press(Key::W);
        input.update(&source); // frame 1
        assert!(input.is_key_down(Key::W));
        assert!(input.is_key_pressed(Key::W));
        assert!(!input.is_key_released(Key::W));

        input.update(&source); // frame 2
        assert!(input.is_key_down(Key::W));
        assert!(!input.is_key_pressed(Key::W));
        assert!(!input.is_key_released(Key::W));

        source.release(Key::W);
        input.update(&source); // frame 3
        assert!(!input.is_key_down(Key::W));
        assert!(!input.is_key_pressed(Key::W));
        assert!(input.is_key_released(Key::W));

        input.update(&source); // frame 4
        assert!(!input.is_key_released(Key::W));
    }

    #[test]
    fn test_pressed_fires_once_per_transition() {
        let mut source = ScriptedSource::default();
        let mut input = Input::default();

        let mut pressed_frames = 0;
        for frame in 0..6 {
            // down on frames 1-2 and 4-5, up otherwise
            if frame == 1 || frame == 4 {
                source.press(Key::Space);
            }
            if frame == 3 {
                source.release(Key::Space);
            }
            input.update(&source);
            if input.is_key_pressed(Key::Space) {
                pressed_frames += 1;
            }
        }
        assert_eq!(pressed_frames, 2);
    }

    #[test]
    fn test_mouse_button_edges() {
        let mut source = ScriptedSource::default();
        let mut input = Input::default();

        source.buttons_down.insert(MouseButton::Button2 as i32);
        input.update(&source);
        assert!(input.is_mouse_button_down(MouseButton::Button2));
        assert!(input.is_mouse_button_pressed(MouseButton::Button2));

        source.buttons_down.clear();
        input.update(&source);
        assert!(input.is_mouse_button_released(MouseButton::Button2));
    }

    #[test]
    fn test_stationary_cursor_has_zero_delta() {
        let mut source = ScriptedSource {
            cursor: Vec2::new(120.0, 80.0),
            ..Default::default()
        };
        let mut input = Input::default();

        input.update(&source);
        input.update(&source);
        assert_eq!(input.mouse_delta(), Vec2::zeros());

        source.cursor = Vec2::new(125.0, 78.0);
        input.update(&source);
        assert_eq!(input.mouse_delta(), Vec2::new(5.0, -2.0));
        assert_eq!(input.mouse_position(), Vec2::new(125.0, 78.0));
    }

    #[test]
    fn test_look_delta_deadzone() {
        let mut source = ScriptedSource::default();
        let mut input = Input::new(2.0);

        input.update(&source);
        source.cursor = Vec2::new(1.0, 1.0); // magnitude ~1.41, below deadzone
        input.update(&source);
        assert_eq!(input.look_delta(), Vec2::zeros());
        assert_eq!(input.mouse_delta(), Vec2::new(1.0, 1.0));

        source.cursor = Vec2::new(5.0, 1.0);
        input.update(&source);
        assert_eq!(input.look_delta(), Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_out_of_range_code_is_an_error() {
        let input = Input::default();
        assert_eq!(input.key_state(-1), Err(InputError::OutOfRange(-1)));
        assert_eq!(input.key_state(10_000), Err(InputError::OutOfRange(10_000)));
        assert_eq!(input.key_state(Key::W as i32), Ok(false));
    }
}

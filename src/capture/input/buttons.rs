//! Mouse-button state shared between the meter and a platform hook
//!
//! Each meter owns one `ButtonState` and hands a clone of the `Arc` to the
//! hook it installs, so the hook callback never touches process globals.

use crate::capture::input::types::{ButtonEvent, MouseButton};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct ButtonState {
    left: AtomicBool,
    right: AtomicBool,
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, event: ButtonEvent) {
        match event {
            ButtonEvent::Down(button) => self.set(button, true),
            ButtonEvent::Up(button) => self.set(button, false),
        }
    }

    pub fn set(&self, button: MouseButton, pressed: bool) {
        self.flag(button).store(pressed, Ordering::Relaxed);
    }

    pub fn is_held(&self, button: MouseButton) -> bool {
        self.flag(button).load(Ordering::Relaxed)
    }

    /// True while the left or the right button is down
    pub fn is_any_held(&self) -> bool {
        self.is_held(MouseButton::Left) || self.is_held(MouseButton::Right)
    }

    pub fn clear(&self) {
        self.left.store(false, Ordering::Relaxed);
        self.right.store(false, Ordering::Relaxed);
    }

    fn flag(&self, button: MouseButton) -> &AtomicBool {
        match button {
            MouseButton::Left => &self.left,
            MouseButton::Right => &self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let state = ButtonState::new();
        assert!(!state.is_any_held());

        state.apply(ButtonEvent::Down(MouseButton::Left));
        assert!(state.is_held(MouseButton::Left));
        assert!(state.is_any_held());

        state.apply(ButtonEvent::Down(MouseButton::Right));
        state.apply(ButtonEvent::Up(MouseButton::Left));
        assert!(!state.is_held(MouseButton::Left));
        assert!(state.is_any_held());

        state.apply(ButtonEvent::Up(MouseButton::Right));
        assert!(!state.is_any_held());
    }

    #[test]
    fn test_clear() {
        let state = ButtonState::new();
        state.set(MouseButton::Left, true);
        state.set(MouseButton::Right, true);
        state.clear();
        assert!(!state.is_any_held());
    }
}

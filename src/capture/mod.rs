//! Platform-specific capture implementations
//!
//! This module provides cursor position queries and mouse-button hooks for
//! each platform.

pub mod input;
pub mod traits;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod windows;

pub use input::{ButtonEvent, ButtonState, MouseButton, Point};
pub use traits::{platform_backend, InputHook, PointerBackend, UnsupportedPointer};

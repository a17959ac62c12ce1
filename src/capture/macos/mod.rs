//! macOS capture implementations
//!
//! Uses AppKit's NSEvent class methods for cursor position and button state.

pub mod input;

pub use input::*;

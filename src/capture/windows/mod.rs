//! Windows capture implementations
//!
//! Uses GetCursorPos for positions and a WH_MOUSE_LL hook for buttons.

pub mod input;

pub use input::*;

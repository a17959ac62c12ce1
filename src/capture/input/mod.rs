//! Input tracking (cursor position, mouse buttons)
//!
//! Types shared by the platform hooks and the meter, plus the button state
//! that implements the hold-to-measure gate.

pub mod buttons;
pub mod types;

pub use buttons::ButtonState;
pub use types::{ButtonEvent, MouseButton, Point};

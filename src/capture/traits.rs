//! Platform seams for pointer capture
//!
//! The meter only talks to the OS through these traits, so the sampling
//! pipeline can be driven by a scripted backend in tests.

use crate::capture::input::buttons::ButtonState;
use crate::capture::input::types::Point;
use crate::meter::channel::{MeterError, MeterResult};
use std::sync::Arc;

/// Source of cursor positions and mouse-button events
pub trait PointerBackend: Send + Sync {
    /// Absolute cursor position in screen pixels
    fn cursor_position(&self) -> MeterResult<Point>;

    /// Install a global button hook that reports into `buttons`.
    ///
    /// The hook stays active until [`InputHook::uninstall`] is called or the
    /// returned value is dropped.
    fn install_hook(&self, buttons: Arc<ButtonState>) -> MeterResult<Box<dyn InputHook>>;
}

/// An installed OS-level input hook
pub trait InputHook: Send {
    /// Release the hook. Calling this more than once is a no-op.
    fn uninstall(&mut self) -> MeterResult<()>;
}

/// Backend for the platform this binary was built for
pub fn platform_backend() -> Arc<dyn PointerBackend> {
    #[cfg(target_os = "windows")]
    {
        Arc::new(crate::capture::windows::input::WindowsPointer::new())
    }

    #[cfg(target_os = "macos")]
    {
        Arc::new(crate::capture::macos::input::MacPointer::new())
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Arc::new(UnsupportedPointer)
    }
}

/// Stand-in for platforms without a backend; every call fails
#[derive(Debug, Default)]
pub struct UnsupportedPointer;

impl UnsupportedPointer {
    fn error() -> MeterError {
        MeterError::Platform(format!(
            "cursor metering is not supported on {}",
            std::env::consts::OS
        ))
    }
}

impl PointerBackend for UnsupportedPointer {
    fn cursor_position(&self) -> MeterResult<Point> {
        Err(Self::error())
    }

    fn install_hook(&self, _buttons: Arc<ButtonState>) -> MeterResult<Box<dyn InputHook>> {
        Err(Self::error())
    }
}

use crate::capture::input::buttons::ButtonState;
use crate::capture::input::types::{MouseButton, Point};
use crate::capture::traits::{InputHook, PointerBackend};
use crate::meter::channel::{MeterError, MeterResult};
use objc2_app_kit::NSEvent;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Button polling period, roughly 120Hz
const BUTTON_POLL_INTERVAL: Duration = Duration::from_micros(8_333);

/// AppKit cursor queries
///
/// There is no low-level hook here: button state is polled from
/// `NSEvent::pressedMouseButtons` on a helper thread, which needs no
/// accessibility permission.
#[derive(Debug, Default)]
pub struct MacPointer;

impl MacPointer {
    pub fn new() -> Self {
        Self
    }
}

impl PointerBackend for MacPointer {
    fn cursor_position(&self) -> MeterResult<Point> {
        // Global coordinates with the origin at the bottom-left; flip y so
        // angles match the top-left convention used everywhere else
        let pos = unsafe { NSEvent::mouseLocation() };
        Ok(Point::new(pos.x, -pos.y))
    }

    fn install_hook(&self, buttons: Arc<ButtonState>) -> MeterResult<Box<dyn InputHook>> {
        Ok(Box::new(MacButtonPoller::start(buttons)?))
    }
}

pub struct MacButtonPoller {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MacButtonPoller {
    fn start(buttons: Arc<ButtonState>) -> MeterResult<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();

        let handle = std::thread::Builder::new()
            .name("mouse-buttons".to_string())
            .spawn(move || {
                tracing::info!(
                    "macOS button polling started (poll_interval={:?})",
                    BUTTON_POLL_INTERVAL
                );

                while flag.load(Ordering::Relaxed) {
                    let loop_start = Instant::now();

                    // Bit 0 = left, bit 1 = right
                    let pressed = unsafe { NSEvent::pressedMouseButtons() };
                    buttons.set(MouseButton::Left, (pressed & 1) != 0);
                    buttons.set(MouseButton::Right, (pressed & 2) != 0);

                    let elapsed = loop_start.elapsed();
                    if elapsed < BUTTON_POLL_INTERVAL {
                        std::thread::sleep(BUTTON_POLL_INTERVAL - elapsed);
                    }
                }

                tracing::info!("macOS button polling stopped");
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }
}

impl InputHook for MacButtonPoller {
    fn uninstall(&mut self) -> MeterResult<()> {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| {
                MeterError::Platform("button polling thread panicked".to_string())
            })?;
        }
        Ok(())
    }
}

impl Drop for MacButtonPoller {
    fn drop(&mut self) {
        if let Err(e) = self.uninstall() {
            tracing::warn!("Failed to stop macOS button polling on drop: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poller_uninstall_is_idempotent() {
        let mut poller = MacButtonPoller::start(Arc::new(ButtonState::new())).unwrap();
        assert!(poller.uninstall().is_ok());
        assert!(poller.uninstall().is_ok());
        assert!(poller.handle.is_none());
    }
}

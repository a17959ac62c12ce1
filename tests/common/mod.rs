//! Scripted pointer backend shared by the integration tests

#![allow(dead_code)]

use cursor_meter_lib::capture::{ButtonEvent, ButtonState, InputHook, MouseButton, Point, PointerBackend};
use cursor_meter_lib::meter::{MeterError, MeterResult};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Replays a fixed list of cursor positions, then stays on the last one
pub struct ScriptedPointer {
    positions: Mutex<VecDeque<Point>>,
    last: Mutex<Point>,
    hooked: Mutex<Option<Arc<ButtonState>>>,
    fail_cursor: AtomicBool,
    pub reads: AtomicUsize,
    pub installs: AtomicUsize,
    pub uninstalls: Arc<AtomicUsize>,
}

impl ScriptedPointer {
    pub fn new(positions: impl IntoIterator<Item = (f64, f64)>) -> Arc<Self> {
        Arc::new(Self {
            positions: Mutex::new(positions.into_iter().map(|(x, y)| Point::new(x, y)).collect()),
            last: Mutex::new(Point::default()),
            hooked: Mutex::new(None),
            fail_cursor: AtomicBool::new(false),
            reads: AtomicUsize::new(0),
            installs: AtomicUsize::new(0),
            uninstalls: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Cursor walking right by `step` px per read
    pub fn walking(step: f64, count: usize) -> Arc<Self> {
        Self::new((0..count).map(|i| (i as f64 * step, 0.0)))
    }

    pub fn failing() -> Arc<Self> {
        let backend = Self::new([]);
        backend.fail_cursor.store(true, Ordering::SeqCst);
        backend
    }

    pub fn remaining(&self) -> usize {
        self.positions.lock().len()
    }

    /// Simulate the OS hook reporting a button transition
    pub fn send(&self, event: ButtonEvent) {
        if let Some(buttons) = self.hooked.lock().as_ref() {
            buttons.apply(event);
        }
    }

    pub fn press(&self, button: MouseButton) {
        self.send(ButtonEvent::Down(button));
    }

    pub fn release(&self, button: MouseButton) {
        self.send(ButtonEvent::Up(button));
    }

    pub fn installs(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }

    pub fn uninstalls(&self) -> usize {
        self.uninstalls.load(Ordering::SeqCst)
    }
}

impl PointerBackend for ScriptedPointer {
    fn cursor_position(&self) -> MeterResult<Point> {
        if self.fail_cursor.load(Ordering::SeqCst) {
            return Err(MeterError::Platform("cursor unavailable".to_string()));
        }
        self.reads.fetch_add(1, Ordering::SeqCst);

        let mut last = self.last.lock();
        if let Some(next) = self.positions.lock().pop_front() {
            *last = next;
        }
        Ok(*last)
    }

    fn install_hook(&self, buttons: Arc<ButtonState>) -> MeterResult<Box<dyn InputHook>> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        *self.hooked.lock() = Some(buttons);
        Ok(Box::new(ScriptedHook {
            uninstalls: self.uninstalls.clone(),
            installed: true,
        }))
    }
}

struct ScriptedHook {
    uninstalls: Arc<AtomicUsize>,
    installed: bool,
}

impl InputHook for ScriptedHook {
    fn uninstall(&mut self) -> MeterResult<()> {
        if self.installed {
            self.installed = false;
            self.uninstalls.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

impl Drop for ScriptedHook {
    fn drop(&mut self) {
        let _ = self.uninstall();
    }
}

use crate::capture::input::buttons::ButtonState;
use crate::capture::input::types::{ButtonEvent, MouseButton, Point};
use crate::capture::traits::{InputHook, PointerBackend};
use crate::meter::channel::{MeterError, MeterResult};
use std::cell::RefCell;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use windows::core::PCWSTR;
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetCursorPos, GetMessageW, PeekMessageW,
    PostThreadMessageW, SetWindowsHookExW, TranslateMessage, UnhookWindowsHookEx, HHOOK, MSG,
    PM_NOREMOVE, WH_MOUSE_LL, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_QUIT, WM_RBUTTONDOWN,
    WM_RBUTTONUP,
};

thread_local! {
    // Set on the hook thread only, for the lifetime of the hook
    static HOOK_BUTTONS: RefCell<Option<Arc<ButtonState>>> = const { RefCell::new(None) };
}

/// Win32 cursor queries and WH_MOUSE_LL button hook
#[derive(Debug, Default)]
pub struct WindowsPointer;

impl WindowsPointer {
    pub fn new() -> Self {
        Self
    }
}

impl PointerBackend for WindowsPointer {
    fn cursor_position(&self) -> MeterResult<Point> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point) }
            .map_err(|e| MeterError::Platform(format!("GetCursorPos failed: {}", e)))?;
        Ok(Point::new(point.x as f64, point.y as f64))
    }

    fn install_hook(&self, buttons: Arc<ButtonState>) -> MeterResult<Box<dyn InputHook>> {
        Ok(Box::new(WindowsMouseHook::install(buttons)?))
    }
}

/// Low-level mouse hook running on its own message-loop thread
///
/// WH_MOUSE_LL callbacks are delivered to the installing thread's message
/// queue, so the hook gets a dedicated thread that pumps messages until it
/// receives WM_QUIT.
pub struct WindowsMouseHook {
    thread_id: u32,
    handle: Option<JoinHandle<()>>,
}

impl WindowsMouseHook {
    fn install(buttons: Arc<ButtonState>) -> MeterResult<Self> {
        let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, String>>();

        let handle = std::thread::Builder::new()
            .name("mouse-hook".to_string())
            .spawn(move || run_hook_thread(buttons, ready_tx))?;

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => {
                tracing::info!("Mouse hook installed (thread_id={})", thread_id);
                Ok(Self {
                    thread_id,
                    handle: Some(handle),
                })
            }
            Ok(Err(message)) => {
                let _ = handle.join();
                Err(MeterError::Platform(message))
            }
            Err(_) => {
                let _ = handle.join();
                Err(MeterError::Platform(
                    "mouse hook thread exited during setup".to_string(),
                ))
            }
        }
    }
}

impl InputHook for WindowsMouseHook {
    fn uninstall(&mut self) -> MeterResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) }
            .map_err(|e| MeterError::Platform(format!("failed to stop mouse hook: {}", e)))?;
        let _ = handle.join();

        tracing::info!("Mouse hook removed");
        Ok(())
    }
}

impl Drop for WindowsMouseHook {
    fn drop(&mut self) {
        if let Err(e) = self.uninstall() {
            tracing::warn!("Mouse hook cleanup failed: {}", e);
        }
    }
}

fn run_hook_thread(buttons: Arc<ButtonState>, ready_tx: mpsc::Sender<Result<u32, String>>) {
    HOOK_BUTTONS.with(|slot| *slot.borrow_mut() = Some(buttons));

    let hook = unsafe {
        GetModuleHandleW(PCWSTR::null()).and_then(|module| {
            SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_hook_proc), HINSTANCE(module.0), 0)
        })
    };
    let hook = match hook {
        Ok(hook) => hook,
        Err(e) => {
            let _ = ready_tx.send(Err(format!("SetWindowsHookExW failed: {}", e)));
            return;
        }
    };

    let mut msg = MSG::default();
    unsafe {
        // Force creation of the thread message queue before reporting ready,
        // otherwise an early WM_QUIT would be lost
        let _ = PeekMessageW(&mut msg, HWND::default(), 0, 0, PM_NOREMOVE);
        let _ = ready_tx.send(Ok(GetCurrentThreadId()));

        while GetMessageW(&mut msg, HWND::default(), 0, 0).0 > 0 {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        if let Err(e) = UnhookWindowsHookEx(hook) {
            tracing::warn!("UnhookWindowsHookEx failed: {}", e);
        }
    }

    HOOK_BUTTONS.with(|slot| slot.borrow_mut().take());
}

unsafe extern "system" fn mouse_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 {
        if let Some(event) = button_event(wparam.0 as u32) {
            HOOK_BUTTONS.with(|slot| {
                if let Some(buttons) = slot.borrow().as_ref() {
                    buttons.apply(event);
                }
            });
        }
    }
    CallNextHookEx(HHOOK::default(), code, wparam, lparam)
}

fn button_event(message: u32) -> Option<ButtonEvent> {
    match message {
        WM_LBUTTONDOWN => Some(ButtonEvent::Down(MouseButton::Left)),
        WM_LBUTTONUP => Some(ButtonEvent::Up(MouseButton::Left)),
        WM_RBUTTONDOWN => Some(ButtonEvent::Down(MouseButton::Right)),
        WM_RBUTTONUP => Some(ButtonEvent::Up(MouseButton::Right)),
        _ => None,
    }
}

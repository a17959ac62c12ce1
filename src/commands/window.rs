//! Window management commands
//!
//! The meter window can be pinned above other windows; the choice is
//! persisted with the rest of the settings.

use crate::commands::meter::MeterState;
use crate::settings::SettingsPatch;
use tauri::{AppHandle, Manager, State};

/// Label of the meter window in `tauri.conf.json`
pub const MAIN_WINDOW: &str = "main";

/// Move the meter window into or out of the topmost z-order band
pub fn apply_always_on_top(app: &AppHandle, enabled: bool) -> tauri::Result<()> {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW) {
        window.set_always_on_top(enabled)?;
        tracing::debug!("Always on top: {}", enabled);
    }
    Ok(())
}

/// Toggle always-on-top and persist the flag
#[tauri::command]
pub async fn set_always_on_top(
    app: AppHandle,
    state: State<'_, MeterState>,
    enabled: bool,
) -> Result<(), String> {
    apply_always_on_top(&app, enabled).map_err(|e| e.to_string())?;

    let patch = SettingsPatch {
        always_on_top: Some(enabled),
        ..Default::default()
    };
    let mut settings = state.settings.lock();
    state
        .store
        .update(&mut settings, &patch)
        .map_err(|e| e.to_string())?;
    Ok(())
}

//! Settings commands

use crate::commands::meter::MeterState;
use crate::commands::window::apply_always_on_top;
use crate::settings::{Settings, SettingsPatch};
use tauri::{AppHandle, State};

/// Get the persisted settings
#[tauri::command]
pub async fn get_settings(state: State<'_, MeterState>) -> Result<Settings, String> {
    Ok(state.settings.lock().clone())
}

/// Apply a partial settings update, persist it and push it into the meter
#[tauri::command]
pub async fn update_settings(
    app: AppHandle,
    state: State<'_, MeterState>,
    patch: SettingsPatch,
) -> Result<Settings, String> {
    let updated = {
        let mut settings = state.settings.lock();
        if !state
            .store
            .update(&mut settings, &patch)
            .map_err(|e| e.to_string())?
        {
            return Ok(settings.clone());
        }
        settings.clone()
    };

    state
        .meter
        .lock()
        .apply_settings(&updated)
        .map_err(|e| e.to_string())?;

    if patch.always_on_top.is_some() {
        apply_always_on_top(&app, updated.always_on_top).map_err(|e| e.to_string())?;
    }

    tracing::info!("Settings updated: {:?}", updated);
    Ok(updated)
}

//! Meter-related Tauri commands

use crate::meter::channel::{MeterResult, SnapshotSink};
use crate::meter::session::{Meter, MeterSnapshot};
use crate::meter::ticker::{spawn_ticker, SharedMeter};
use crate::settings::{Settings, SettingsStore};
use parking_lot::Mutex as ParkingMutex;
use std::sync::Arc;
use tauri::{AppHandle, Emitter, State};
use tokio::task::JoinHandle;

/// Event carrying a [`MeterSnapshot`] after every tick
pub const SNAPSHOT_EVENT: &str = "meter://snapshot";

/// Application state for the meter
pub struct MeterState {
    pub meter: SharedMeter,
    pub settings: ParkingMutex<Settings>,
    pub store: SettingsStore,
    ticker: ParkingMutex<Option<JoinHandle<()>>>,
}

impl MeterState {
    pub fn new(meter: Meter, settings: Settings, store: SettingsStore) -> Self {
        Self {
            meter: Arc::new(ParkingMutex::new(meter)),
            settings: ParkingMutex::new(settings),
            store,
            ticker: ParkingMutex::new(None),
        }
    }

    fn start(&self, sink: Arc<dyn SnapshotSink>) -> MeterResult<()> {
        self.meter.lock().start()?;

        let handle = spawn_ticker(self.meter.clone(), sink);
        if let Some(previous) = self.ticker.lock().replace(handle) {
            previous.abort();
        }
        Ok(())
    }

    fn stop(&self) -> MeterResult<()> {
        if let Some(handle) = self.ticker.lock().take() {
            handle.abort();
        }
        self.meter.lock().stop()
    }

    /// Stop metering and release the input hook; used when the window goes away
    pub fn shutdown(&self) {
        if let Err(e) = self.stop() {
            tracing::warn!("Failed to stop meter during shutdown: {}", e);
        }
    }
}

/// Forwards snapshots to the webview
struct EventSink {
    app: AppHandle,
}

impl SnapshotSink for EventSink {
    fn publish(&self, snapshot: &MeterSnapshot) {
        if let Err(e) = self.app.emit(SNAPSHOT_EVENT, snapshot) {
            tracing::warn!("Failed to emit snapshot: {}", e);
        }
    }
}

/// Start measuring
#[tauri::command]
pub async fn start_meter(app: AppHandle, state: State<'_, MeterState>) -> Result<(), String> {
    state
        .start(Arc::new(EventSink { app }))
        .map_err(|e| e.to_string())
}

/// Stop measuring
#[tauri::command]
pub async fn stop_meter(state: State<'_, MeterState>) -> Result<(), String> {
    state.stop().map_err(|e| e.to_string())
}

/// Get the current readings and histories without sampling
#[tauri::command]
pub async fn get_snapshot(state: State<'_, MeterState>) -> Result<MeterSnapshot, String> {
    Ok(state.meter.lock().snapshot())
}

/// Check whether the meter is running
#[tauri::command]
pub async fn is_meter_running(state: State<'_, MeterState>) -> Result<bool, String> {
    Ok(state.meter.lock().is_running())
}

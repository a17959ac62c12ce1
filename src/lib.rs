//! Cursor Meter - live cursor speed and direction statistics.
//!
//! This is the main library crate for the Cursor Meter application. The
//! measurement pipeline (capture, processing, meter, settings) is always
//! built; the Tauri shell and its commands are behind the `desktop` feature.

pub mod capture;
pub mod meter;
pub mod processing;
pub mod settings;

#[cfg(feature = "desktop")]
pub mod commands;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG`; defaults to debug output for this crate.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cursor_meter=debug,tauri=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(feature = "desktop")]
fn setup(app: &tauri::AppHandle) -> anyhow::Result<()> {
    use anyhow::Context;
    use tauri::Manager;

    let config_dir = app
        .path()
        .app_config_dir()
        .context("cannot resolve app config directory")?;
    let store = settings::SettingsStore::in_dir(config_dir);
    let loaded = store.load().context("failed to load settings")?;

    let meter = meter::Meter::new(capture::platform_backend(), &loaded)?;

    if loaded.always_on_top {
        commands::window::apply_always_on_top(app, true)?;
    }

    tracing::info!("Loaded settings from {}: {:?}", store.path().display(), loaded);
    app.manage(commands::meter::MeterState::new(meter, loaded, store));
    Ok(())
}

/// Initialize the application
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    init_logging();

    tracing::info!("Starting Cursor Meter v{}", env!("CARGO_PKG_VERSION"));

    tauri::Builder::default()
        .setup(|app| {
            setup(app.handle())?;
            Ok(())
        })
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::Destroyed = event {
                if let Some(state) = window.try_state::<commands::meter::MeterState>() {
                    state.shutdown();
                }
            }
        })
        .invoke_handler(tauri::generate_handler![
            // Meter commands
            commands::meter::start_meter,
            commands::meter::stop_meter,
            commands::meter::get_snapshot,
            commands::meter::is_meter_running,
            // Settings commands
            commands::settings::get_settings,
            commands::settings::update_settings,
            // Window commands
            commands::window::set_always_on_top,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

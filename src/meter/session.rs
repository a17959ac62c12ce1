//! Meter lifecycle
//!
//! A `Meter` owns the sampler, the button state for the hold-to-measure gate
//! and the platform hook. Starting installs the hook and resets the sampler;
//! stopping (or dropping the meter) releases the hook.

use crate::capture::input::buttons::ButtonState;
use crate::capture::traits::{InputHook, PointerBackend};
use crate::meter::channel::{MeterError, MeterResult};
use crate::meter::sampler::{Reading, Sampler};
use crate::processing::stats::Summary;
use crate::settings::Settings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Everything the display needs after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterSnapshot {
    /// Identifies the start/stop cycle that produced this snapshot
    pub session_id: Option<Uuid>,
    pub unix_time_ms: i64,
    pub running: bool,
    /// Whether the hold-to-measure gate let this tick sample
    pub gate_open: bool,
    /// Latest reading; zeros while gated or priming
    pub current: Reading,
    pub speed: Option<Summary>,
    pub direction: Option<Summary>,
    pub speed_history: Vec<f64>,
    pub direction_history: Vec<f64>,
}

pub struct Meter {
    backend: Arc<dyn PointerBackend>,
    buttons: Arc<ButtonState>,
    hook: Option<Box<dyn InputHook>>,
    sampler: Sampler,
    hold_to_measure: bool,
    running: bool,
    session_id: Option<Uuid>,
    started_at: Option<DateTime<Utc>>,
    ticks: u64,
}

impl Meter {
    pub fn new(backend: Arc<dyn PointerBackend>, settings: &Settings) -> MeterResult<Self> {
        settings.validate()?;
        Ok(Self {
            backend,
            buttons: Arc::new(ButtonState::new()),
            hook: None,
            sampler: Sampler::new(settings.interval_ms, settings.max_records)?,
            hold_to_measure: settings.hold_to_measure,
            running: false,
            session_id: None,
            started_at: None,
            ticks: 0,
        })
    }

    pub fn start(&mut self) -> MeterResult<()> {
        if self.running {
            return Err(MeterError::AlreadyRunning);
        }

        self.sampler.reset();
        self.buttons.clear();
        self.hook = Some(self.backend.install_hook(self.buttons.clone())?);

        let session_id = Uuid::new_v4();
        self.session_id = Some(session_id);
        self.started_at = Some(Utc::now());
        self.ticks = 0;
        self.running = true;

        tracing::info!(
            "Meter started (session={}, interval={}ms, max_records={}, hold_to_measure={})",
            session_id,
            self.sampler.interval_ms(),
            self.sampler.max_records(),
            self.hold_to_measure
        );
        Ok(())
    }

    pub fn stop(&mut self) -> MeterResult<()> {
        if !self.running {
            return Ok(());
        }
        self.running = false;

        if let Some(mut hook) = self.hook.take() {
            hook.uninstall()?;
        }

        let elapsed = self
            .started_at
            .map(|t| Utc::now().signed_duration_since(t).num_milliseconds())
            .unwrap_or_default();
        tracing::info!(
            "Meter stopped (session={:?}, ticks={}, elapsed={}ms)",
            self.session_id,
            self.ticks,
            elapsed
        );
        Ok(())
    }

    /// Sample once if the gate is open and return the resulting snapshot
    pub fn tick(&mut self) -> MeterResult<MeterSnapshot> {
        if !self.running {
            return Err(MeterError::NotRunning);
        }
        self.ticks += 1;

        let gate_open = self.gate_open();
        let current = if gate_open {
            let position = self.backend.cursor_position()?;
            self.sampler.record(position).unwrap_or_default()
        } else {
            Reading::default()
        };

        Ok(self.build_snapshot(gate_open, current))
    }

    /// Current state without sampling
    pub fn snapshot(&self) -> MeterSnapshot {
        let current = self.sampler.latest().unwrap_or_default();
        self.build_snapshot(self.running && self.gate_open(), current)
    }

    /// Push new settings into a live meter
    pub fn apply_settings(&mut self, settings: &Settings) -> MeterResult<()> {
        settings.validate()?;
        self.hold_to_measure = settings.hold_to_measure;
        self.sampler.set_interval(settings.interval_ms);
        self.sampler.set_max_records(settings.max_records)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.sampler.interval_ms())
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Button state fed by the installed hook
    pub fn buttons(&self) -> Arc<ButtonState> {
        self.buttons.clone()
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    fn gate_open(&self) -> bool {
        !self.hold_to_measure || self.buttons.is_any_held()
    }

    fn build_snapshot(&self, gate_open: bool, current: Reading) -> MeterSnapshot {
        MeterSnapshot {
            session_id: self.session_id,
            unix_time_ms: Utc::now().timestamp_millis(),
            running: self.running,
            gate_open,
            current,
            speed: self.sampler.speed_summary(),
            direction: self.sampler.direction_summary(),
            speed_history: self.sampler.speed_history(),
            direction_history: self.sampler.direction_history(),
        }
    }
}

impl Drop for Meter {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            tracing::warn!("Failed to stop meter on drop: {}", e);
        }
    }
}

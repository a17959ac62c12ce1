//! Persisted user settings
//!
//! Four scalars survive restarts: always-on-top, hold-to-measure, the
//! sampling interval and the rolling window size. They are stored as pretty
//! JSON and only rewritten when a value actually changes.

use crate::meter::channel::{MeterError, MeterResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Largest rolling window accepted from the settings form
pub const MAX_RECORDS_LIMIT: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Keep the meter window above other windows
    pub always_on_top: bool,
    /// Only sample while the left or right mouse button is held
    pub hold_to_measure: bool,
    /// Sampling period in milliseconds
    pub interval_ms: u64,
    /// Samples kept per rolling window
    pub max_records: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            always_on_top: false,
            hold_to_measure: false,
            interval_ms: 50,
            max_records: 50,
        }
    }
}

/// Partial update coming from the settings form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub always_on_top: Option<bool>,
    pub hold_to_measure: Option<bool>,
    pub interval_ms: Option<u64>,
    pub max_records: Option<usize>,
}

impl Settings {
    /// Reject values the meter cannot run with
    pub fn validate(&self) -> MeterResult<()> {
        if self.interval_ms == 0 {
            return Err(MeterError::Configuration(
                "interval must be at least 1 ms".to_string(),
            ));
        }
        if self.max_records == 0 {
            return Err(MeterError::Configuration(
                "record count must be at least 1".to_string(),
            ));
        }
        if self.max_records > MAX_RECORDS_LIMIT {
            return Err(MeterError::Configuration(format!(
                "record count must be at most {}",
                MAX_RECORDS_LIMIT
            )));
        }
        Ok(())
    }

    /// Merge `patch` into these settings.
    ///
    /// Returns whether anything changed. On a validation error the settings
    /// are left as they were.
    pub fn apply(&mut self, patch: &SettingsPatch) -> MeterResult<bool> {
        let mut next = self.clone();
        if let Some(v) = patch.always_on_top {
            next.always_on_top = v;
        }
        if let Some(v) = patch.hold_to_measure {
            next.hold_to_measure = v;
        }
        if let Some(v) = patch.interval_ms {
            next.interval_ms = v;
        }
        if let Some(v) = patch.max_records {
            next.max_records = v;
        }
        next.validate()?;

        if next == *self {
            return Ok(false);
        }
        tracing::debug!("Settings changed: {:?} -> {:?}", self, next);
        *self = next;
        Ok(true)
    }
}

/// JSON-file backed settings storage
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `settings.json` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when the file doesn't exist
    pub fn load(&self) -> MeterResult<Settings> {
        if !self.path.exists() {
            tracing::warn!(
                "Settings file not found at '{}'; using defaults.",
                self.path.display()
            );
            return Ok(Settings::default());
        }

        let raw = std::fs::read_to_string(&self.path)?;
        let settings: Settings = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> MeterResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(settings)?;
        std::fs::write(&self.path, data)?;
        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }

    /// Apply `patch` to `current` and persist only if something changed.
    ///
    /// `current` is only replaced once the new settings are on disk.
    pub fn update(&self, current: &mut Settings, patch: &SettingsPatch) -> MeterResult<bool> {
        let mut next = current.clone();
        if !next.apply(patch)? {
            return Ok(false);
        }
        self.save(&next)?;
        *current = next;
        Ok(true)
    }
}

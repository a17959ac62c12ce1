//! Meter errors and the outbound snapshot channel
//!
//! Defines the error type shared by the sampling pipeline and the interface
//! through which tick snapshots reach the display (frontend, logs, tests).

use crate::meter::session::MeterSnapshot;
use thiserror::Error;

/// Errors that can occur while metering
#[derive(Error, Debug)]
pub enum MeterError {
    #[error("Meter already running")]
    AlreadyRunning,

    #[error("Meter not running")]
    NotRunning,

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for meter operations
pub type MeterResult<T> = Result<T, MeterError>;

/// Destination for the snapshots produced on every tick
///
/// The desktop shell forwards them to the webview as events; tests collect
/// them in memory.
pub trait SnapshotSink: Send + Sync {
    /// Deliver one snapshot. Must not block the ticker.
    fn publish(&self, snapshot: &MeterSnapshot);
}

impl<F> SnapshotSink for F
where
    F: Fn(&MeterSnapshot) + Send + Sync,
{
    fn publish(&self, snapshot: &MeterSnapshot) {
        self(snapshot)
    }
}

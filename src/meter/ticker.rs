//! Periodic driver for a running meter
//!
//! One task per measurement session. The interval is re-read before every
//! sleep so settings changes apply without a restart.

use crate::meter::channel::SnapshotSink;
use crate::meter::session::Meter;
use parking_lot::Mutex as ParkingMutex;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Meter shared between the command handlers and the ticker task
pub type SharedMeter = Arc<ParkingMutex<Meter>>;

/// Spawn the tick loop for the meter's current session.
///
/// The task ends when the meter is stopped, restarted under a new session,
/// or a tick fails. A failed tick stops the meter (releasing its hook) and
/// publishes one final snapshot with `running == false`.
pub fn spawn_ticker(meter: SharedMeter, sink: Arc<dyn SnapshotSink>) -> JoinHandle<()> {
    let session = meter.lock().session_id();

    tokio::spawn(async move {
        tracing::debug!("Ticker started (session={:?})", session);

        loop {
            let interval = {
                let guard = meter.lock();
                if !guard.is_running() || guard.session_id() != session {
                    break;
                }
                guard.interval()
            };

            tokio::time::sleep(interval).await;

            let result = {
                let mut guard = meter.lock();
                if !guard.is_running() || guard.session_id() != session {
                    break;
                }
                match guard.tick() {
                    Ok(snapshot) => Ok(snapshot),
                    Err(e) => {
                        // same lock as the tick, so no restart interleaves
                        if let Err(stop_err) = guard.stop() {
                            tracing::warn!("Failed to stop meter after tick error: {}", stop_err);
                        }
                        Err((e, guard.snapshot()))
                    }
                }
            };

            match result {
                Ok(snapshot) => sink.publish(&snapshot),
                Err((e, stopped)) => {
                    tracing::error!("Meter tick failed, measurement stopped: {}", e);
                    sink.publish(&stopped);
                    break;
                }
            }
        }

        tracing::debug!("Ticker stopped (session={:?})", session);
    })
}

//! Measurement pipeline
//!
//! The sampler turns cursor positions into speed/direction readings, the
//! session owns the start/stop lifecycle and the input gate, and the ticker
//! drives the session at the configured interval.

pub mod channel;
pub mod sampler;
pub mod session;
pub mod ticker;

pub use channel::{MeterError, MeterResult, SnapshotSink};
pub use sampler::{Reading, Sampler};
pub use session::{Meter, MeterSnapshot};
pub use ticker::{spawn_ticker, SharedMeter};

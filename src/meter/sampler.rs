//! Per-tick sampling state
//!
//! Holds the previous cursor position and the two rolling windows. Each
//! call to [`Sampler::record`] is one tick's worth of arithmetic.

use crate::capture::input::types::Point;
use crate::meter::channel::MeterResult;
use crate::processing::kinematics;
use crate::processing::rolling::RollingBuffer;
use crate::processing::stats::Summary;
use serde::{Deserialize, Serialize};

/// Speed and direction derived from one pair of consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// px/s, never negative
    pub speed: f64,
    /// Degrees in [0, 360)
    pub direction: f64,
}

#[derive(Debug, Clone)]
pub struct Sampler {
    interval_ms: u64,
    prev: Option<Point>,
    speeds: RollingBuffer,
    directions: RollingBuffer,
}

impl Sampler {
    pub fn new(interval_ms: u64, max_records: usize) -> MeterResult<Self> {
        Ok(Self {
            interval_ms,
            prev: None,
            speeds: RollingBuffer::new(max_records)?,
            directions: RollingBuffer::new(max_records)?,
        })
    }

    /// Feed the current cursor position.
    ///
    /// The first position after a reset only primes the sampler and returns
    /// `None`.
    pub fn record(&mut self, position: Point) -> Option<Reading> {
        let prev = self.prev.replace(position)?;

        let reading = Reading {
            speed: kinematics::speed(prev, position, self.interval_ms),
            direction: kinematics::direction(prev, position),
        };
        self.speeds.push(reading.speed);
        self.directions.push(reading.direction);

        Some(reading)
    }

    /// Forget the previous position and both histories
    pub fn reset(&mut self) {
        self.prev = None;
        self.speeds.clear();
        self.directions.clear();
    }

    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    pub fn set_max_records(&mut self, max_records: usize) -> MeterResult<()> {
        self.speeds.set_capacity(max_records)?;
        self.directions.set_capacity(max_records)
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn max_records(&self) -> usize {
        self.speeds.capacity()
    }

    /// Most recently recorded reading
    pub fn latest(&self) -> Option<Reading> {
        Some(Reading {
            speed: self.speeds.latest()?,
            direction: self.directions.latest()?,
        })
    }

    pub fn previous_position(&self) -> Option<Point> {
        self.prev
    }

    pub fn speed_summary(&self) -> Option<Summary> {
        Summary::of(self.speeds.iter())
    }

    pub fn direction_summary(&self) -> Option<Summary> {
        Summary::of(self.directions.iter())
    }

    pub fn speed_history(&self) -> Vec<f64> {
        self.speeds.to_vec()
    }

    pub fn direction_history(&self) -> Vec<f64> {
        self.directions.to_vec()
    }
}

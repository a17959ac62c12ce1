//! Fixed-capacity FIFO sample window
//!
//! Backs the speed and direction histories shown in the charts. Pushing into
//! a full buffer evicts the oldest sample first.

use crate::meter::channel::{MeterError, MeterResult};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RollingBuffer {
    values: VecDeque<f64>,
    capacity: usize,
}

impl RollingBuffer {
    /// Create an empty buffer holding at most `capacity` samples
    pub fn new(capacity: usize) -> MeterResult<Self> {
        check_capacity(capacity)?;
        Ok(Self {
            values: VecDeque::new(),
            capacity,
        })
    }

    /// Append a sample, evicting from the front until it fits
    pub fn push(&mut self, value: f64) {
        while self.values.len() >= self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Change the capacity, dropping the oldest samples if it shrank
    pub fn set_capacity(&mut self, capacity: usize) -> MeterResult<()> {
        check_capacity(capacity)?;
        self.capacity = capacity;
        while self.values.len() > capacity {
            self.values.pop_front();
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.values.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }
}

fn check_capacity(capacity: usize) -> MeterResult<()> {
    if capacity == 0 {
        return Err(MeterError::Configuration(
            "record count must be at least 1".to_string(),
        ));
    }
    Ok(())
}

//! Processing module for live cursor measurements
//!
//! This module contains the arithmetic applied on every tick: kinematics
//! between consecutive samples, the rolling sample windows, and the summary
//! statistics computed over them.

pub mod kinematics;
pub mod rolling;
pub mod stats;

pub use kinematics::{direction, speed};
pub use rolling::RollingBuffer;
pub use stats::Summary;

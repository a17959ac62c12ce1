//! Instantaneous cursor kinematics between two consecutive samples

use crate::capture::input::types::Point;

/// Speed in px/s for a move from `prev` to `curr` over the nominal sampling
/// interval.
///
/// The configured interval is used rather than measured wall time so that
/// readings stay comparable across ticks that fire late.
pub fn speed(prev: Point, curr: Point, interval_ms: u64) -> f64 {
    if interval_ms == 0 {
        return 0.0;
    }
    prev.distance_to(curr) / interval_ms as f64 * 1000.0
}

/// Angle of the move from `prev` to `curr` against the horizontal, in
/// degrees within `[0, 360)`.
///
/// Screen y grows downward, so 90 means straight down.
pub fn direction(prev: Point, curr: Point) -> f64 {
    let dx = curr.x - prev.x;
    let dy = curr.y - prev.y;

    let mut degrees = dy.atan2(dx).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    // -tiny + 360 rounds up to 360 in f64
    if degrees >= 360.0 {
        degrees = 0.0;
    }
    degrees
}

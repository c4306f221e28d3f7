//! Angle to segment mapping.
//!
//! Wheel-space angles are in degrees, measured clockwise from the wheel's anchor. Segment `i` of
//! `n` spans `[i * 360/n, (i + 1) * 360/n)`. Renderers must draw with the same convention.

use crate::animator::WheelError;

pub const FULL_TURN: f64 = 360.0;

pub fn width(count: usize) -> Result<f64, WheelError> {
    match count {
        0 => Err(WheelError::InvalidConfiguration),
        n => Ok(FULL_TURN / n as f64),
    }
}

/// Reduces any angle, negative or many turns deep, into `[0, 360)`.
pub fn normalize(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(FULL_TURN);
    // rem_euclid can round a tiny negative remainder up to exactly a full turn
    if reduced >= FULL_TURN { 0.0 } else { reduced }
}

pub fn index(angle: f64, count: usize) -> Result<usize, WheelError> {
    let width = width(count)?;
    let idx = (normalize(angle) / width).floor() as usize;
    Ok(idx.min(count - 1))
}

/// Start and end angle of segment `index`.
pub fn span(index: usize, count: usize) -> Result<(f64, f64), WheelError> {
    let width = width(count)?;
    let start = index as f64 * width;
    Ok((start, start + width))
}

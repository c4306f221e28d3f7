use rand::Rng;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;

/// Lower bound of the initial speed, in degrees per step.
pub const DEFAULT_SPEED_MIN: f64 = 20.0;
/// Upper bound of the initial speed, in degrees per step.
pub const DEFAULT_SPEED_MAX: f64 = 26.0;
/// Speed lost per step.
pub const DEFAULT_DECELERATION: f64 = 0.1;
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(20);
/// Hard bound after which a spin is forced to resolve.
pub const DEFAULT_STOP_AFTER: Duration = Duration::from_millis(100_000);

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Physics {
    pub speed_min: f64,
    pub speed_max: f64,
    pub deceleration: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "cadence_ms")]
    pub cadence: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "stop_after_ms")]
    pub stop_after: Duration,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            speed_min: DEFAULT_SPEED_MIN,
            speed_max: DEFAULT_SPEED_MAX,
            deceleration: DEFAULT_DECELERATION,
            cadence: DEFAULT_CADENCE,
            stop_after: DEFAULT_STOP_AFTER,
        }
    }
}

impl Physics {
    /// Replaces values that would stall or reverse the wheel with the defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |v: f64| v.is_finite() && v > 0.0;

        let valid_range = positive(self.speed_min)
            && positive(self.speed_max)
            && self.speed_min <= self.speed_max;

        let (speed_min, speed_max) = if valid_range {
            (self.speed_min, self.speed_max)
        } else {
            log::warn!(
                "Ignoring speed range {}..={}, using defaults",
                self.speed_min,
                self.speed_max
            );
            (defaults.speed_min, defaults.speed_max)
        };

        Self {
            speed_min,
            speed_max,
            deceleration: if positive(self.deceleration) {
                self.deceleration
            } else {
                log::warn!("Ignoring deceleration {}, using default", self.deceleration);
                defaults.deceleration
            },
            cadence: if self.cadence.is_zero() {
                defaults.cadence
            } else {
                self.cadence
            },
            stop_after: if self.stop_after.is_zero() {
                defaults.stop_after
            } else {
                self.stop_after
            },
        }
    }
}

/// Supplies the initial speed of each spin.
pub trait SpeedSource {
    fn initial_speed(&mut self, min: f64, max: f64) -> f64;
}

#[derive(Debug, Clone)]
pub struct RngSpeed<R>(pub R);

pub type ThreadSpeed = RngSpeed<ThreadRng>;

impl RngSpeed<ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl<R: Rng> SpeedSource for RngSpeed<R> {
    fn initial_speed(&mut self, min: f64, max: f64) -> f64 {
        if max > min {
            self.0.random_range(min..=max)
        } else {
            min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rng_speed_stays_in_range() {
        let mut source = RngSpeed(StdRng::seed_from_u64(7));
        for _ in 0..1000 {
            let v = source.initial_speed(DEFAULT_SPEED_MIN, DEFAULT_SPEED_MAX);
            assert!((DEFAULT_SPEED_MIN..=DEFAULT_SPEED_MAX).contains(&v), "{v}");
        }
    }

    #[test]
    fn test_degenerate_range_returns_min() {
        let mut source = RngSpeed(StdRng::seed_from_u64(1));
        assert_eq!(source.initial_speed(22.0, 22.0), 22.0);
    }

    #[test]
    fn test_physics_deserialization() {
        let json = r#"{ "deceleration": 0.25, "cadence_ms": 16, "stop_after_ms": 5000 }"#;
        let physics: Physics = serde_json::from_str(json).unwrap();
        assert_eq!(physics.deceleration, 0.25);
        assert_eq!(physics.cadence, Duration::from_millis(16));
        assert_eq!(physics.stop_after, Duration::from_secs(5));
        assert_eq!(physics.speed_min, DEFAULT_SPEED_MIN);
        assert_eq!(physics.speed_max, DEFAULT_SPEED_MAX);
    }

    #[test]
    fn test_sanitized_rejects_stalling_values() {
        let physics = Physics {
            speed_min: 30.0,
            speed_max: 10.0,
            deceleration: -1.0,
            cadence: Duration::ZERO,
            stop_after: Duration::from_secs(3),
        }
        .sanitized();

        assert_eq!(physics.speed_min, DEFAULT_SPEED_MIN);
        assert_eq!(physics.speed_max, DEFAULT_SPEED_MAX);
        assert_eq!(physics.deceleration, DEFAULT_DECELERATION);
        assert_eq!(physics.cadence, DEFAULT_CADENCE);
        assert_eq!(physics.stop_after, Duration::from_secs(3));
    }
}

use log::debug;
use serde::{Deserialize, Serialize};

/// Internal integration step. Updates with a larger `dt` are split into
/// substeps so the response is identical regardless of call cadence.
const MAX_STEP: f32 = 1.0 / 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    /// Once both the distance to the target and the velocity fall below
    /// this, the spring snaps to the target and stops.
    pub rest_delta: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 30.0,
            rest_delta: 1e-3,
        }
    }
}

/// Damped spring smoothing a raw progress signal in `[0, 1]`.
///
/// The response is floored at critical damping: progress overshooting its
/// target is meaningless here, so an under-damped configuration is
/// stiffened rather than honored.
#[derive(Debug, Clone)]
pub struct Spring {
    stiffness: f32,
    damping: f32,
    rest_delta: f32,
    value: f32,
    velocity: f32,
}

impl Spring {
    pub fn new(params: SpringParams) -> Self {
        let stiffness = params.stiffness.max(f32::EPSILON);
        let critical = 2.0 * stiffness.sqrt();
        let damping = params.damping.max(critical);
        if damping > params.damping {
            debug!(
                "spring damping {} below critical, using {}",
                params.damping, damping
            );
        }
        Self {
            stiffness,
            damping,
            rest_delta: params.rest_delta.max(0.0),
            value: 0.0,
            velocity: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Jumps the spring to `value` with no velocity, as when a track is
    /// (re)activated at a known scroll position.
    pub fn reset(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
        self.velocity = 0.0;
    }

    pub fn is_at_rest(&self, target: f32) -> bool {
        (target.clamp(0.0, 1.0) - self.value).abs() < self.rest_delta
            && self.velocity.abs() < self.rest_delta
    }

    /// Advances the smoothed value toward `target` over `dt` seconds and
    /// returns the new value. Targets outside `[0, 1]` are clamped;
    /// non-positive or non-finite `dt` leaves the state untouched.
    pub fn update(&mut self, target: f32, dt: f32) -> f32 {
        let target = target.clamp(0.0, 1.0);
        if !dt.is_finite() || dt <= 0.0 {
            return self.value;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP);
            remaining -= step;

            let accel = self.stiffness * (target - self.value) - self.damping * self.velocity;
            self.velocity += accel * step;
            self.value += self.velocity * step;

            if (target - self.value).abs() < self.rest_delta
                && self.velocity.abs() < self.rest_delta
            {
                self.value = target;
                self.velocity = 0.0;
                break;
            }
        }
        self.value
    }
}

use super::math::ease_in_out;

/// Fixed-duration ramp advanced by elapsed time, used to drive a raw
/// progress signal when no interactive source (scroll position) exists.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub duration: f32,
    pub elapsed: f32,
}

impl Timeline {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.elapsed += dt;
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn eased_progress(&self) -> f32 {
        ease_in_out(self.progress())
    }
}

// Frame-delta driven countdown used by time-gated states

/// Elapsed-time accumulator with a target duration.
///
/// Driven purely by the `dt` passed to [`Timer::tick`], never by a wall
/// clock, so a fixed frame step gives identical results on every run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    elapsed: f32,
    target: f32,
}

impl Timer {
    /// Start a timer at zero elapsed time
    pub fn new(target: f32) -> Self {
        Self {
            elapsed: 0.0,
            target,
        }
    }

    /// Advance by `dt` seconds and report whether the target has been reached.
    /// Negative deltas are ignored so elapsed time never goes backwards.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.target
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// `elapsed / target`, clamped to [0, 1]
    pub fn progress(&self) -> f32 {
        if self.target <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.target).clamp(0.0, 1.0)
    }
}
